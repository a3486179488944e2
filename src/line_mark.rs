//! 标线点生成
//!
//! 对每条线段按微度分辨率插值，合并后按纬度稳定排序。

use crate::config::MICRO_DEGREE;
use crate::global_types::{LineMarkPoint, Segment};
use crate::utility::Utility;

/// 按纬度升序排列的标线点，生成后只读。
#[derive(Debug, Default, Clone)]
pub struct LineMarks {
    points: Vec<LineMarkPoint>,
}

impl LineMarks {
    pub fn generate(segments: &[Segment]) -> Self {
        let mut points = Vec::new();
        for segment in segments {
            interpolate_segment(segment, &mut points);
        }
        // 稳定排序，纬度相同的点保持生成顺序
        points.sort_by_key(|p| p.latitude);
        log::debug!(
            "generated {} line marks from {} segments",
            points.len(),
            segments.len()
        );
        Self { points }
    }

    pub fn as_slice(&self) -> &[LineMarkPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineMarkPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a LineMarks {
    type Item = &'a LineMarkPoint;
    type IntoIter = std::slice::Iter<'a, LineMarkPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// 插值步数：主方向上每微度一个采样点，包含两个端点。
///
/// 合法 GPS 线段最多 360° 即 3.6 亿步；超出范围或非有限的坐标饱和到 `usize::MAX`。
#[inline]
pub fn step_count(segment: &Segment) -> usize {
    let delta_latitude = segment.end.latitude - segment.start.latitude;
    let delta_longitude = segment.end.longitude - segment.start.longitude;
    let dominant = delta_latitude.abs().max(delta_longitude.abs());
    if dominant.is_nan() {
        return usize::MAX;
    }
    ((dominant * MICRO_DEGREE).round() as usize).saturating_add(1)
}

fn interpolate_segment(segment: &Segment, out: &mut Vec<LineMarkPoint>) {
    let steps = step_count(segment);
    if steps == 1 {
        // 起点终点重合（或相距不足半个微度），只保留起点
        out.push(segment.start.to_micro());
        return;
    }

    let delta_latitude = segment.end.latitude - segment.start.latitude;
    let delta_longitude = segment.end.longitude - segment.start.longitude;
    let last = (steps - 1) as f64;
    out.reserve(steps);
    out.extend((0..steps).map(|i| {
        let i = i as f64;
        LineMarkPoint {
            latitude: Utility::to_micro_degree(
                segment.start.latitude + i * (delta_latitude / last),
            ),
            longitude: Utility::to_micro_degree(
                segment.start.longitude + i * (delta_longitude / last),
            ),
        }
    }));
}
