use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::global_types::{CameraIntrinsics, GeoPoint};

/// 垂直视场角 AngleOfView_Vertically，度
pub const AOV_V: f64 = 31.0;
/// 水平视场角 AngleOfView_Horizontally，度
pub const AOV_H: f64 = 67.0;
/// 拍摄时相机离地高度，mm
pub const HEIGHT_MM: f64 = 1400.0;
/// 基线角超过该值后，剩余行的地面距离不再计算。
pub const HORIZON_CUTOFF_DEGREES: f64 = 87.0;

/// 度 -> 微度
pub const MICRO_DEGREE: f64 = 1_000_000.0;
pub const MM_PER_KM: f64 = 1_000_000.0;
/// 每度对应的地面距离，km
pub const KM_PER_DEGREE: f64 = 111.32;

/// 坐标最少有效数字位数
pub const MIN_COORDINATE_DIGITS: usize = 9;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;
/// 标线匹配的分桶数
pub const MATCH_BUCKETS: usize = 19;

/// 每帧等待按键的时间，ms
pub const WAIT_KEY_MS: i32 = 1;
pub const WINDOW_LABEL: &str = "Source Video";

/// 地面投影算法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionVariant {
    /// 逐像素三角计算
    Trigonometric,
    /// 每行只算左右边缘，中间线性插值
    #[default]
    Interpolated,
}

/// 调试输出等级
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugVerbosity {
    #[default]
    Quiet,
    /// 每行的基线距离
    Rows,
    /// 每个像素的地面坐标
    Pixels,
}

impl DebugVerbosity {
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Self::Quiet,
            1 => Self::Rows,
            _ => Self::Pixels,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Info,
            Self::Rows => log::LevelFilter::Debug,
            Self::Pixels => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    pub variant: ProjectionVariant,
    pub debug: DebugVerbosity,
}

/// 视频拍摄时相机的起止位置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPathConfig {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub heading_degrees: f64,
    pub tilt_degrees: f64,
}

impl Default for CameraPathConfig {
    fn default() -> Self {
        Self {
            start: GeoPoint::new(48.378986, 16.825719),
            end: GeoPoint::new(48.378914, 16.825755),
            heading_degrees: 150.0,
            tilt_degrees: 89.0,
        }
    }
}

/// 运行配置，启动时解析一次。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub intrinsics: CameraIntrinsics,
    pub camera_path: CameraPathConfig,
    pub projector: ProjectorConfig,
    pub window_label: String,
    pub wait_key_ms: i32,
    /// 保存每一帧 VideoFrame{n}.png
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            intrinsics: CameraIntrinsics::default(),
            camera_path: CameraPathConfig::default(),
            projector: ProjectorConfig::default(),
            window_label: WINDOW_LABEL.to_string(),
            wait_key_ms: WAIT_KEY_MS,
            snapshot_dir: None,
        }
    }
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }
}
