use thiserror::Error;

use crate::config::MIN_COORDINATE_DIGITS;

/// 规划文件解析错误，行号从 1 开始。
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Could not open plan file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {token:?} is not a coordinate")]
    InvalidNumber { line: usize, token: String },
    #[error(
        "line {line}: error processing {point} point of GPS line {segment}, too few significant digits in {token:?} (need {})",
        MIN_COORDINATE_DIGITS
    )]
    TooFewDigits {
        line: usize,
        segment: usize,
        point: PointKind,
        token: String,
    },
    #[error("line {line}: {token:?} is outside the valid GPS range")]
    OutOfRange { line: usize, token: String },
    #[error("line {line}: missing '/' between latitude and longitude")]
    MissingSeparator { line: usize },
    #[error("line {line}: starting point of GPS line {segment} has no ending point")]
    MissingEnd { line: usize, segment: usize },
    #[error("line {line}: ending point without a starting point")]
    UnexpectedEnd { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Start,
    End,
}

impl std::fmt::Display for PointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointKind::Start => write!(f, "starting"),
            PointKind::End => write!(f, "ending"),
        }
    }
}
