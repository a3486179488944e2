//! 视频、窗口与图像编解码，基于 OpenCV。
//!
//! opencv
//! https://docs.rs/opencv/latest/opencv/all.html
mod capture;
mod codec;
mod window;

pub use capture::OpenCvVideo;
pub use codec::Imgcodecs;
pub use window::{HeadlessDisplay, HighGuiWindow};

use std::path::Path;

use opencv::core::{Mat, Vec3b, VecN, CV_8UC3};
use opencv::prelude::*;

use crate::annotator::FrameAnnotation;

/// 标线像素颜色 (B, G, R)
pub const MARK_COLOR: [u8; 3] = [0, 0, 255];

/// 视频源
pub trait VideoSourceTrait {
    /// 读取下一帧，流结束时返回 `None`
    fn read_next_frame(&mut self) -> anyhow::Result<Option<Mat>>;
    /// (height, width)
    fn frame_size(&self) -> (u32, u32);
    /// 总帧数，未知时为 0
    fn frame_count(&self) -> u32;
}

/// 显示窗口
pub trait DisplaySinkTrait {
    fn show(&mut self, frame: &Mat) -> anyhow::Result<()>;
    /// 等待按键，超时返回 `None`
    fn wait_key(&mut self, delay_ms: i32) -> anyhow::Result<Option<i32>>;
}

/// 图像写入
pub trait ImageCodecTrait {
    fn write_image(&self, path: &Path, frame: &Mat) -> anyhow::Result<()>;
}

/// 帧尺寸 (height, width)：优先用视频属性，与实际帧不符时以帧为准。
pub fn frame_dimensions(source: &impl VideoSourceTrait, frame: &Mat) -> (u32, u32) {
    let actual = (frame.rows().max(0) as u32, frame.cols().max(0) as u32);
    let reported = source.frame_size();
    if reported != actual {
        log::warn!(
            "video reports {}x{}, frame is {}x{}",
            reported.1,
            reported.0,
            actual.1,
            actual.0
        );
        return actual;
    }
    reported
}

/// 将匹配像素涂成 [`MARK_COLOR`]，返回涂色的像素数。
pub fn paint_matches(frame: &mut Mat, annotation: &FrameAnnotation) -> anyhow::Result<usize> {
    if frame.typ() != CV_8UC3 {
        anyhow::bail!("expected a BGR frame, got type {}", frame.typ());
    }
    let (rows, cols) = (frame.rows() as usize, frame.cols() as usize);
    let mut painted = 0;
    for (y, x) in annotation.matched_pixels() {
        if y >= rows || x >= cols {
            continue;
        }
        *frame.at_2d_mut::<Vec3b>(y as i32, x as i32)? = VecN(MARK_COLOR);
        painted += 1;
    }
    Ok(painted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use opencv::core::Scalar;

    #[test]
    fn test_paint_matches() {
        let mut frame =
            Mat::new_rows_cols_with_default(4, 4, CV_8UC3, Scalar::all(0.0)).unwrap();
        let mut mask = Array2::from_elem((4, 4), false);
        mask[(3, 1)] = true;
        let annotation = FrameAnnotation {
            mask,
            projected_rows: 1,
            matched: 1,
        };
        assert_eq!(paint_matches(&mut frame, &annotation).unwrap(), 1);
        assert_eq!(frame.at_2d::<Vec3b>(3, 1).unwrap().0, MARK_COLOR);
        assert_eq!(frame.at_2d::<Vec3b>(0, 0).unwrap().0, [0, 0, 0]);
    }

    struct FixedSizeVideo(u32, u32);

    impl VideoSourceTrait for FixedSizeVideo {
        fn read_next_frame(&mut self) -> anyhow::Result<Option<Mat>> {
            Ok(None)
        }

        fn frame_size(&self) -> (u32, u32) {
            (self.0, self.1)
        }

        fn frame_count(&self) -> u32 {
            0
        }
    }

    #[test]
    fn test_frame_dimensions() {
        let frame = Mat::new_rows_cols_with_default(3, 5, CV_8UC3, Scalar::all(0.0)).unwrap();
        assert_eq!(frame_dimensions(&FixedSizeVideo(3, 5), &frame), (3, 5));
        // 属性未知或有误
        assert_eq!(frame_dimensions(&FixedSizeVideo(0, 0), &frame), (3, 5));
        assert_eq!(frame_dimensions(&FixedSizeVideo(5, 3), &frame), (3, 5));
    }
}
