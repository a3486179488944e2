use crate::config::ProjectionVariant;
use crate::global_types::PixelGroundCoordinate;
use crate::utility::Utility;

use super::{Baseline, FrameGeometry, RowProjectionTrait};

/// 逐像素三角计算。
///
/// 每一列按其相对中心列的侧向角求侧线距离，左半幅向左、右半幅向右偏移。
#[derive(Debug, Default, Clone, Copy)]
pub struct Trigonometric;

impl Trigonometric {
    /// 第 `column` 列的侧向角（度）和方向，左侧为 -1。
    #[inline]
    pub fn side_angle(horizontal_fov: f64, frame_width: u32, column: u32) -> (f64, f64) {
        let half_width = frame_width as f64 / 2.0;
        let offset = (column - 1) as f64;
        if offset < half_width {
            ((horizontal_fov / 2.0) * (half_width - offset) / half_width, -1.0)
        } else {
            ((horizontal_fov / 2.0) * (offset - half_width) / half_width, 1.0)
        }
    }
}

impl RowProjectionTrait for Trigonometric {
    fn project_row(
        &self,
        frame: &FrameGeometry,
        baseline: &Baseline,
        out: &mut Vec<PixelGroundCoordinate>,
    ) {
        let h_fov = frame.intrinsics.horizontal_fov;
        for column in 1..=frame.width {
            let (angle, side) = Self::side_angle(h_fov, frame.width, column);
            let sideline_mm = Utility::degree_to_radian(angle).tan() * baseline.distance_mm;
            let offset_mm = baseline.center_mm + frame.right * (side * sideline_mm);
            let position = frame.offset_to_degree(&offset_mm);
            out.push(PixelGroundCoordinate {
                row: baseline.row,
                column,
                east: position.x,
                north: position.y,
            });
        }
    }

    fn variant(&self) -> ProjectionVariant {
        ProjectionVariant::Trigonometric
    }
}
