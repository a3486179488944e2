use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::projector::ProjectedRow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionRecord {
    pub row: u32,
    pub column: u32,
    pub baseline_distance: f64,
    pub east: i32,
    pub north: i32,
    pub matched: bool,
}

/// 导出一帧的逐像素投影结果
pub struct ProjectionCsv {
    writer: csv::Writer<File>,
    records: usize,
}

impl ProjectionCsv {
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let writer = super::csv_writer(path)
            .with_context(|| format!("could not create {}", path.display()))?;
        Ok(Self { writer, records: 0 })
    }

    pub fn write_row(&mut self, row: &ProjectedRow, matches: &[bool]) -> anyhow::Result<()> {
        for (pixel, &matched) in row.pixels.iter().zip(matches) {
            let (east, north) = pixel.micro();
            self.writer.serialize(ProjectionRecord {
                row: pixel.row,
                column: pixel.column,
                baseline_distance: row.baseline.distance_mm,
                east,
                north,
                matched,
            })?;
            self.records += 1;
        }
        Ok(())
    }

    /// 返回写入的记录数
    pub fn finish(mut self) -> anyhow::Result<usize> {
        self.writer.flush()?;
        Ok(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectorConfig;
    use crate::global_types::{CameraIntrinsics, CameraPose};
    use crate::projector::GroundProjector;

    #[test]
    fn test_projection_csv() {
        let projector = GroundProjector::new(CameraIntrinsics::default(), ProjectorConfig::default());
        let pose = CameraPose {
            position_latitude: 48.0,
            position_longitude: 16.0,
            tilt_degrees: 60.0,
            heading_degrees: 0.0,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projection.csv");
        let mut csv = ProjectionCsv::create(&path).unwrap();
        for row in projector.rows(&pose, 3, 2) {
            let matches = vec![false; row.pixels.len()];
            csv.write_row(&row, &matches).unwrap();
        }
        assert_eq!(csv.finish().unwrap(), 6);

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("row;column;baseline_distance;east;north;matched")
        );
        assert_eq!(lines.count(), 6);
    }
}
