//! 全局类型
//!
//! 规划文件、标线点、相机位姿和像素地面坐标。

use serde::{Deserialize, Serialize};

use crate::utility::Utility;

/// GPS 点，单位：度
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// 转换为微度坐标
    pub fn to_micro(&self) -> LineMarkPoint {
        LineMarkPoint {
            latitude: Utility::to_micro_degree(self.latitude),
            longitude: Utility::to_micro_degree(self.longitude),
        }
    }
}

/// 规划文件中的一条直线段 S:/E:
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl Segment {
    pub const fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// 标线点，微度（度 × 10⁶）整数坐标，便于精确比较。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineMarkPoint {
    pub latitude: i32,
    pub longitude: i32,
}

impl LineMarkPoint {
    pub const fn new(latitude: i32, longitude: i32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// 相机内参
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// 垂直视场角，度
    pub vertical_fov: f64,
    /// 水平视场角，度
    pub horizontal_fov: f64,
    /// 离地高度，mm
    pub height_above_ground_mm: f64,
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        use crate::config::*;
        Self {
            vertical_fov: AOV_V,
            horizontal_fov: AOV_H,
            height_above_ground_mm: HEIGHT_MM,
        }
    }
}

/// 每帧的相机位姿
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraPose {
    pub position_latitude: f64,
    pub position_longitude: f64,
    /// 俯仰角，90° 为水平方向
    pub tilt_degrees: f64,
    /// 航向，0° 为正北，顺时针
    pub heading_degrees: f64,
}

/// 单个像素投影到地面的坐标
///
/// `row` 和 `column` 从 1 开始，第 1 行为图像底部。
/// `east` 为经度，`north` 为纬度，单位：度。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelGroundCoordinate {
    pub row: u32,
    pub column: u32,
    pub east: f64,
    pub north: f64,
}

impl PixelGroundCoordinate {
    /// 微度坐标 (east, north)
    #[inline]
    pub fn micro(&self) -> (i32, i32) {
        (
            Utility::to_micro_degree(self.east),
            Utility::to_micro_degree(self.north),
        )
    }
}

#[test]
fn test_geo_point_to_micro() {
    let p = GeoPoint::new(48.378986, 16.825719);
    assert_eq!(p.to_micro(), LineMarkPoint::new(48_378_986, 16_825_719));
}

#[test]
fn test_degenerate_segment() {
    let p = GeoPoint::new(48.0, 16.0);
    assert!(Segment::new(p, p).is_degenerate());
    assert!(!Segment::new(p, GeoPoint::new(48.0, 16.00001)).is_degenerate());
}
