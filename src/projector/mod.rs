//! 地面投影
//!
//! 根据相机位置、航向、俯仰角和视场角，计算视频帧每个像素对应的地面 GPS 坐标。
//! 行号与列号从 1 开始，第 1 行为图像底部（离相机最近）。
//!
//! 两种算法：
//! - [`Trigonometric`]：逐像素计算侧向角
//! - [`Interpolated`]：每行只计算左右边缘，中间线性插值
mod interpolated;
mod trigonometric;

pub use interpolated::Interpolated;
pub use trigonometric::Trigonometric;

use nalgebra::Vector2;

use crate::config::{DebugVerbosity, ProjectionVariant, ProjectorConfig, HORIZON_CUTOFF_DEGREES};
use crate::global_types::{CameraIntrinsics, CameraPose, PixelGroundCoordinate};
use crate::utility::Utility;

/// 一帧内不变的几何量
#[derive(Debug, Clone, Copy)]
pub struct FrameGeometry {
    pub intrinsics: CameraIntrinsics,
    pub height: u32,
    pub width: u32,
    /// 相机位置 (经度, 纬度)，度
    pub position: Vector2<f64>,
    /// 航向方向单位向量 (east, north)
    pub forward: Vector2<f64>,
    /// 航向右侧单位向量 (east, north)
    pub right: Vector2<f64>,
}

impl FrameGeometry {
    pub fn new(intrinsics: CameraIntrinsics, pose: &CameraPose, height: u32, width: u32) -> Self {
        let heading = Utility::degree_to_radian(pose.heading_degrees);
        let (sin, cos) = heading.sin_cos();
        Self {
            intrinsics,
            height,
            width,
            position: Vector2::new(pose.position_longitude, pose.position_latitude),
            forward: Vector2::new(sin, cos),
            right: Vector2::new(cos, -sin),
        }
    }

    /// 地面偏移 (mm) -> 绝对坐标 (度)
    #[inline]
    pub fn offset_to_degree(&self, offset_mm: &Vector2<f64>) -> Vector2<f64> {
        self.position + offset_mm.map(Utility::mm_to_degree)
    }
}

/// 基线：一行像素对应的地面距离
#[derive(Debug, Clone, Copy)]
pub struct Baseline {
    pub row: u32,
    pub angle_degrees: f64,
    /// 相机到基线中心的水平距离，mm
    pub distance_mm: f64,
    /// 基线中心相对相机的偏移 (east, north)，mm
    pub center_mm: Vector2<f64>,
}

/// 一行像素的投影方式
pub trait RowProjectionTrait {
    fn project_row(
        &self,
        frame: &FrameGeometry,
        baseline: &Baseline,
        out: &mut Vec<PixelGroundCoordinate>,
    );
    fn variant(&self) -> ProjectionVariant;
}

/// 一行的投影结果
#[derive(Debug, Clone)]
pub struct ProjectedRow {
    pub baseline: Baseline,
    pub pixels: Vec<PixelGroundCoordinate>,
}

pub struct GroundProjector {
    intrinsics: CameraIntrinsics,
    debug: DebugVerbosity,
    row_projector: Box<dyn RowProjectionTrait>,
}

impl GroundProjector {
    pub fn new(intrinsics: CameraIntrinsics, config: ProjectorConfig) -> Self {
        let row_projector: Box<dyn RowProjectionTrait> = match config.variant {
            ProjectionVariant::Trigonometric => Box::new(Trigonometric),
            ProjectionVariant::Interpolated => Box::new(Interpolated),
        };
        Self {
            intrinsics,
            debug: config.debug,
            row_projector,
        }
    }

    pub fn variant(&self) -> ProjectionVariant {
        self.row_projector.variant()
    }

    /// 计算第 `row` 行的基线。
    ///
    /// 基线角超过 [`HORIZON_CUTOFF_DEGREES`] 时返回 `None`，之后的行都不再计算。
    pub fn baseline(&self, frame: &FrameGeometry, tilt_degrees: f64, row: u32) -> Option<Baseline> {
        let v_fov = self.intrinsics.vertical_fov;
        let height = frame.height as f64;
        let angle_degrees =
            tilt_degrees + v_fov / 2.0 - ((height - (row - 1) as f64) / height) * v_fov;
        if angle_degrees > HORIZON_CUTOFF_DEGREES {
            return None;
        }
        let distance_mm = Utility::degree_to_radian(angle_degrees).tan()
            * self.intrinsics.height_above_ground_mm;
        Some(Baseline {
            row,
            angle_degrees,
            distance_mm,
            center_mm: frame.forward * distance_mm,
        })
    }

    /// 逐行投影，惰性计算。
    pub fn rows(&self, pose: &CameraPose, frame_height: u32, frame_width: u32) -> ProjectedRows<'_> {
        ProjectedRows {
            projector: self,
            frame: FrameGeometry::new(self.intrinsics, pose, frame_height, frame_width),
            tilt_degrees: pose.tilt_degrees,
            next_row: 1,
            done: false,
        }
    }

    /// 整帧投影，按行优先展开。
    pub fn project_frame(
        &self,
        pose: &CameraPose,
        frame_height: u32,
        frame_width: u32,
    ) -> Vec<PixelGroundCoordinate> {
        self.rows(pose, frame_height, frame_width)
            .flat_map(|row| row.pixels)
            .collect()
    }
}

pub struct ProjectedRows<'a> {
    projector: &'a GroundProjector,
    frame: FrameGeometry,
    tilt_degrees: f64,
    next_row: u32,
    done: bool,
}

impl<'a> Iterator for ProjectedRows<'a> {
    type Item = ProjectedRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.next_row > self.frame.height {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;

        let Some(baseline) = self.projector.baseline(&self.frame, self.tilt_degrees, row) else {
            // 超过截止角，剩余行放弃
            self.done = true;
            if self.projector.debug >= DebugVerbosity::Rows {
                log::debug!(
                    "row {} beyond {}°, skipping {} rows",
                    row,
                    HORIZON_CUTOFF_DEGREES,
                    self.frame.height - row + 1
                );
            }
            return None;
        };

        if self.projector.debug >= DebugVerbosity::Rows {
            log::debug!(
                "row {}: angle {:.4}° baseline {:.1} mm center {:.1}/{:.1}",
                row,
                baseline.angle_degrees,
                baseline.distance_mm,
                baseline.center_mm.x,
                baseline.center_mm.y
            );
        }

        let mut pixels = Vec::with_capacity(self.frame.width as usize);
        self.projector
            .row_projector
            .project_row(&self.frame, &baseline, &mut pixels);

        if self.projector.debug >= DebugVerbosity::Pixels {
            for p in &pixels {
                let (east, north) = p.micro();
                log::trace!("{};{};{};{}", p.row, p.column, east, north);
            }
        }
        Some(ProjectedRow { baseline, pixels })
    }
}
