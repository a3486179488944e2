use std::path::Path;

use anyhow::Context;
use opencv::core::Mat;
use opencv::prelude::MatTraitConst;
use opencv::videoio::{self, VideoCapture, VideoCaptureTrait, VideoCaptureTraitConst};

use super::VideoSourceTrait;

pub struct OpenCvVideo {
    capture: VideoCapture,
    height: u32,
    width: u32,
    frame_count: u32,
}

impl OpenCvVideo {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let name = path
            .to_str()
            .with_context(|| format!("invalid video path {}", path.display()))?;
        let capture = VideoCapture::from_file(name, videoio::CAP_ANY)?;
        if !VideoCaptureTraitConst::is_opened(&capture)? {
            anyhow::bail!("Could not open video {}", path.display());
        }

        let property = |id| -> anyhow::Result<u32> {
            Ok(VideoCaptureTraitConst::get(&capture, id)?.max(0.0) as u32)
        };
        let height = property(videoio::CAP_PROP_FRAME_HEIGHT)?;
        let width = property(videoio::CAP_PROP_FRAME_WIDTH)?;
        let frame_count = property(videoio::CAP_PROP_FRAME_COUNT)?;
        log::info!(
            "video {}: {}x{}, {} frames",
            path.display(),
            width,
            height,
            frame_count
        );
        Ok(Self {
            capture,
            height,
            width,
            frame_count,
        })
    }
}

impl VideoSourceTrait for OpenCvVideo {
    fn read_next_frame(&mut self) -> anyhow::Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !VideoCaptureTrait::read(&mut self.capture, &mut frame)? || frame.rows() == 0 {
            return Ok(None);
        }
        Ok(Some(frame))
    }

    fn frame_size(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    fn frame_count(&self) -> u32 {
        self.frame_count
    }
}
