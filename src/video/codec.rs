use std::path::Path;

use anyhow::Context;
use opencv::core::{Mat, Vector};
use opencv::imgcodecs;

use super::ImageCodecTrait;

#[derive(Debug, Default)]
pub struct Imgcodecs;

impl ImageCodecTrait for Imgcodecs {
    fn write_image(&self, path: &Path, frame: &Mat) -> anyhow::Result<()> {
        let name = path
            .to_str()
            .with_context(|| format!("invalid image path {}", path.display()))?;
        if !imgcodecs::imwrite(name, frame, &Vector::<i32>::new())? {
            anyhow::bail!("could not write {}", path.display());
        }
        Ok(())
    }
}
