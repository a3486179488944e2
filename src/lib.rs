//! 视频帧地面投影与标线叠加
//!
//! 规划文件 -> 标线点 -> (每帧) 地面投影 -> 标线匹配 -> 帧标注
//!
//! nalgebra
//! https://docs.rs/nalgebra/latest/nalgebra/
//!
//! ndarray
//! https://docs.rs/ndarray/latest/ndarray/all.html
pub mod annotator;
pub mod camera_path;
pub mod config;
pub mod error;
pub mod global_types;
pub mod line_mark;
pub mod matcher;
pub mod plan;
pub mod projector;
pub mod save;
pub mod utility;
#[cfg(feature = "video")]
pub mod video;
