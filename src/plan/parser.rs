use crate::config::{MAX_LATITUDE, MAX_LONGITUDE, MIN_COORDINATE_DIGITS};
use crate::error::{PlanError, PointKind};
use crate::global_types::{GeoPoint, Segment};

pub const START_MARKER: &str = "S:";
pub const END_MARKER: &str = "E:";
pub const SEPARATOR: char = '/';

/// 解析规划文本。
///
/// `S:` 行记录待定的起点，紧随的 `E:` 行闭合成一条线段。
/// 其他行忽略。遇到第一个错误即返回，不保留部分结果。
pub fn parse_plan(text: &str) -> Result<Vec<Segment>, PlanError> {
    let mut segments = Vec::new();
    // (起点, 所在行号)
    let mut pending: Option<(GeoPoint, usize)> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if let Some(rest) = line.strip_prefix(START_MARKER) {
            if let Some((_, start_line)) = pending {
                return Err(PlanError::MissingEnd {
                    line: start_line,
                    segment: segments.len() + 1,
                });
            }
            let start = parse_point(rest, line_no, segments.len() + 1, PointKind::Start)?;
            pending = Some((start, line_no));
        } else if let Some(rest) = line.strip_prefix(END_MARKER) {
            let Some((start, _)) = pending.take() else {
                return Err(PlanError::UnexpectedEnd { line: line_no });
            };
            let end = parse_point(rest, line_no, segments.len() + 1, PointKind::End)?;
            segments.push(Segment::new(start, end));
        }
    }

    if let Some((_, start_line)) = pending {
        return Err(PlanError::MissingEnd {
            line: start_line,
            segment: segments.len() + 1,
        });
    }
    Ok(segments)
}

/// `<纬度>/<经度>`
fn parse_point(
    text: &str,
    line: usize,
    segment: usize,
    point: PointKind,
) -> Result<GeoPoint, PlanError> {
    let (latitude, longitude) = text
        .split_once(SEPARATOR)
        .ok_or(PlanError::MissingSeparator { line })?;
    let latitude = parse_coordinate(latitude, MAX_LATITUDE, line, segment, point)?;
    let longitude = parse_coordinate(longitude, MAX_LONGITUDE, line, segment, point)?;
    Ok(GeoPoint::new(latitude, longitude))
}

/// 有效数字位数：从第一个非零数字起计数，前导零不算。值为 0 时计全部数字。
fn significant_digits(token: &str) -> usize {
    let mut digits = token.chars().filter(char::is_ascii_digit).peekable();
    let total = digits.clone().count();
    while digits.next_if_eq(&'0').is_some() {}
    match digits.count() {
        0 => total,
        n => n,
    }
}

fn parse_coordinate(
    token: &str,
    limit: f64,
    line: usize,
    segment: usize,
    point: PointKind,
) -> Result<f64, PlanError> {
    let token = token.trim();
    let value = token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PlanError::InvalidNumber {
            line,
            token: token.to_string(),
        })?;

    if significant_digits(token) < MIN_COORDINATE_DIGITS {
        return Err(PlanError::TooFewDigits {
            line,
            segment,
            point,
            token: token.to_string(),
        });
    }
    if value.abs() > limit {
        return Err(PlanError::OutOfRange {
            line,
            token: token.to_string(),
        });
    }
    Ok(value)
}
