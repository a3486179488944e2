//! 帧标注
//!
//! 对每个投影像素做标线匹配，结果保存为 (height, width) 的掩码。

use ndarray::Array2;

use crate::global_types::CameraPose;
use crate::matcher::MarkMatcher;
use crate::projector::{GroundProjector, ProjectedRow};

#[derive(Debug, Clone)]
pub struct FrameAnnotation {
    /// `mask[[y, x]]` 为图像坐标
    pub mask: Array2<bool>,
    pub projected_rows: u32,
    pub matched: usize,
}

impl FrameAnnotation {
    /// 匹配像素的图像坐标 (y, x)
    pub fn matched_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask
            .indexed_iter()
            .filter(|(_, m)| **m)
            .map(|(index, _)| index)
    }
}

/// 投影行列 (从 1 开始，第 1 行为底部) -> 图像坐标 (y, x)
#[inline]
pub fn image_position(row: u32, column: u32, frame_height: u32) -> (usize, usize) {
    ((frame_height - row) as usize, (column - 1) as usize)
}

pub struct FrameAnnotator<'a> {
    projector: &'a GroundProjector,
    matcher: MarkMatcher<'a>,
}

impl<'a> FrameAnnotator<'a> {
    pub fn new(projector: &'a GroundProjector, matcher: MarkMatcher<'a>) -> Self {
        Self { projector, matcher }
    }

    pub fn annotate(&self, pose: &CameraPose, frame_height: u32, frame_width: u32) -> FrameAnnotation {
        self.annotate_with(pose, frame_height, frame_width, |_, _| {})
    }

    /// 同 [`Self::annotate`]，每行投影与匹配结果交给 `inspect`。
    pub fn annotate_with<F>(
        &self,
        pose: &CameraPose,
        frame_height: u32,
        frame_width: u32,
        mut inspect: F,
    ) -> FrameAnnotation
    where
        F: FnMut(&ProjectedRow, &[bool]),
    {
        let mut mask = Array2::from_elem((frame_height as usize, frame_width as usize), false);
        let mut projected_rows = 0;
        let mut matched = 0;
        let mut row_matches = Vec::with_capacity(frame_width as usize);

        for row in self.projector.rows(pose, frame_height, frame_width) {
            projected_rows += 1;
            row_matches.clear();
            for pixel in &row.pixels {
                let (east, north) = pixel.micro();
                let is_marked = self.matcher.is_marked(east, north);
                if is_marked {
                    mask[image_position(pixel.row, pixel.column, frame_height)] = true;
                    matched += 1;
                }
                row_matches.push(is_marked);
            }
            inspect(&row, &row_matches);
        }

        FrameAnnotation {
            mask,
            projected_rows,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::{DebugVerbosity, ProjectionVariant, ProjectorConfig};
    use crate::global_types::{CameraIntrinsics, GeoPoint, LineMarkPoint, Segment};
    use crate::line_mark::LineMarks;
    use crate::plan::Plan;

    fn projector(variant: ProjectionVariant) -> GroundProjector {
        GroundProjector::new(
            CameraIntrinsics::default(),
            ProjectorConfig {
                variant,
                debug: DebugVerbosity::Quiet,
            },
        )
    }

    fn pose(tilt: f64) -> CameraPose {
        CameraPose {
            position_latitude: 48.0,
            position_longitude: 16.0,
            tilt_degrees: tilt,
            heading_degrees: 0.0,
        }
    }

    #[test]
    fn test_image_position() {
        assert_eq!(image_position(1, 1, 4), (3, 0));
        assert_eq!(image_position(4, 4, 4), (0, 3));
    }

    /// 规划 (48.0,16.0)-(48.0,16.00001)，4x4 帧，tilt 89°，航向 0°
    #[test]
    fn test_end_to_end() {
        let plan = Plan::from_text("S:48.0000000/16.0000000\nE:48.0000000/16.0000100\n").unwrap();
        let marks = LineMarks::generate(plan.segments());
        assert_eq!(marks.len(), 11);
        let mark_set: HashSet<LineMarkPoint> = marks.iter().copied().collect();

        for variant in [ProjectionVariant::Trigonometric, ProjectionVariant::Interpolated] {
            let projector = projector(variant);
            let annotator = FrameAnnotator::new(&projector, MarkMatcher::new(&marks));

            let mut seen = Vec::new();
            let annotation = annotator.annotate_with(&pose(89.0), 4, 4, |row, matches| {
                assert_eq!(row.pixels.len(), matches.len());
                for (p, &m) in row.pixels.iter().zip(matches) {
                    let (east, north) = p.micro();
                    assert_eq!(m, mark_set.contains(&LineMarkPoint::new(north, east)));
                    seen.push((p.row, p.column, east, north));
                }
            });

            // 第 3 行起超过 87°
            assert_eq!(annotation.projected_rows, 2);
            assert_eq!(annotation.mask.dim(), (4, 4));
            let unique: HashSet<(i32, i32)> = seen.iter().map(|s| (s.2, s.3)).collect();
            assert_eq!(unique.len(), seen.len());
            for w in seen.windows(2) {
                if w[0].0 == w[1].0 {
                    assert!(w[1].2 > w[0].2);
                } else {
                    assert!(w[1].3 > w[0].3);
                }
            }
            let expected = seen
                .iter()
                .filter(|s| mark_set.contains(&LineMarkPoint::new(s.3, s.2)))
                .count();
            assert_eq!(annotation.matched, expected);
            assert_eq!(annotation.matched_pixels().count(), expected);
        }
    }

    /// 标线经过投影像素时该像素被标注
    #[test]
    fn test_marks_projected_pixel() {
        for variant in [ProjectionVariant::Trigonometric, ProjectionVariant::Interpolated] {
            let projector = projector(variant);
            let pixels = projector.project_frame(&pose(60.0), 4, 4);
            let target = pixels.iter().find(|p| p.row == 2 && p.column == 3).unwrap();
            let (east, north) = target.micro();

            // 过该像素的东西向标线
            let start = GeoPoint::new(north as f64 / 1e6, (east - 2) as f64 / 1e6);
            let end = GeoPoint::new(north as f64 / 1e6, (east + 2) as f64 / 1e6);
            let marks = LineMarks::generate(&[Segment::new(start, end)]);
            assert!(marks.iter().any(|p| *p == LineMarkPoint::new(north, east)));

            let annotator = FrameAnnotator::new(&projector, MarkMatcher::new(&marks));
            let annotation = annotator.annotate(&pose(60.0), 4, 4);
            assert_eq!(annotation.projected_rows, 4);
            assert!(annotation.mask[image_position(2, 3, 4)]);
            // 同一行纬度相同，其余行不同
            assert!(annotation.matched_pixels().all(|(y, _)| y == 2));
        }
    }

    #[test]
    fn test_no_marks() {
        let projector = projector(ProjectionVariant::Interpolated);
        let marks = LineMarks::default();
        let annotator = FrameAnnotator::new(&projector, MarkMatcher::new(&marks));
        let annotation = annotator.annotate(&pose(60.0), 6, 8);
        assert_eq!(annotation.matched, 0);
        assert_eq!(annotation.mask.dim(), (6, 8));
        assert!(annotation.mask.iter().all(|m| !m));
    }
}
