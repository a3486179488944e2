use crate::config::ProjectionVariant;
use crate::global_types::PixelGroundCoordinate;
use crate::utility::Utility;

use super::{Baseline, FrameGeometry, RowProjectionTrait};

/// 每行只算左右边缘，列之间线性插值。
///
/// 与逐像素三角计算相比存在近似误差，列坐标在地面上等距分布。
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpolated;

impl RowProjectionTrait for Interpolated {
    fn project_row(
        &self,
        frame: &FrameGeometry,
        baseline: &Baseline,
        out: &mut Vec<PixelGroundCoordinate>,
    ) {
        let half_fov = frame.intrinsics.horizontal_fov / 2.0;
        let sideline_mm = Utility::degree_to_radian(half_fov).tan() * baseline.distance_mm;
        let left = frame.offset_to_degree(&(baseline.center_mm - frame.right * sideline_mm));
        let right = frame.offset_to_degree(&(baseline.center_mm + frame.right * sideline_mm));
        let stepping = (right - left) / frame.width as f64;

        for column in 1..=frame.width {
            let position = left + stepping * column as f64;
            out.push(PixelGroundCoordinate {
                row: baseline.row,
                column,
                east: position.x,
                north: position.y,
            });
        }
    }

    fn variant(&self) -> ProjectionVariant {
        ProjectionVariant::Interpolated
    }
}
