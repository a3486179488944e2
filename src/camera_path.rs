use crate::config::CameraPathConfig;
use crate::global_types::CameraPose;

/// 相机轨迹：在起止位置之间按帧号线性插值，航向和俯仰角不变。
#[derive(Debug, Clone, Copy)]
pub struct CameraPath {
    config: CameraPathConfig,
    frame_count: u32,
}

impl CameraPath {
    pub fn new(config: CameraPathConfig, frame_count: u32) -> Self {
        Self {
            config,
            frame_count: frame_count.max(1),
        }
    }

    /// 第 `frame_index` 帧（从 0 开始）的位姿
    pub fn pose_at(&self, frame_index: u32) -> CameraPose {
        let n = self.frame_count as f64;
        let i = frame_index as f64;
        let start = self.config.start;
        let end = self.config.end;
        CameraPose {
            position_latitude: start.latitude + ((end.latitude - start.latitude) / n) * i,
            position_longitude: start.longitude + ((end.longitude - start.longitude) / n) * i,
            tilt_degrees: self.config.tilt_degrees,
            heading_degrees: self.config.heading_degrees,
        }
    }
}
