//! 规划文件处理
//!
//! 每行以 `S:` 或 `E:` 开头，后接 `<纬度>/<经度>`，一对 S/E 定义一条线段。
mod parser;

use std::path::Path;

pub use parser::{parse_plan, END_MARKER, SEPARATOR, START_MARKER};

use crate::error::PlanError;
use crate::global_types::Segment;
use crate::line_mark::LineMarks;

/// 解析后的规划，按文件顺序保存线段。
#[derive(Debug, Default)]
pub struct Plan {
    segments: Vec<Segment>,
}

impl Plan {
    pub fn from_text(text: &str) -> Result<Self, PlanError> {
        let segments = parse_plan(text)?;
        Ok(Self { segments })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let text = std::fs::read_to_string(path)?;
        let plan = Self::from_text(&text)?;
        for (i, segment) in plan.segments.iter().enumerate() {
            log::debug!(
                "GPS line {}: start {:.8}/{:.8} end {:.8}/{:.8}",
                i + 1,
                segment.start.latitude,
                segment.start.longitude,
                segment.end.latitude,
                segment.end.longitude
            );
        }
        Ok(plan)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// 读取规划文件并生成排好序的标线点
pub fn load_line_marks(path: impl AsRef<Path>) -> Result<(Plan, LineMarks), PlanError> {
    let path = path.as_ref();
    let plan = Plan::read(path)?;
    if plan.is_empty() {
        log::warn!("plan {} has no GPS lines", path.display());
    }
    let marks = LineMarks::generate(plan.segments());
    log::info!(
        "plan {}: {} GPS lines, {} line marks",
        path.display(),
        plan.len(),
        marks.len()
    );
    Ok((plan, marks))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_read_missing_plan() {
        let err = Plan::read("plans/does_not_exist.txt").unwrap_err();
        assert!(matches!(err, PlanError::Io(_)));
    }

    #[test]
    fn test_read_sample_plan() {
        let plan = Plan::read("plans/sample.txt").unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.segments()[1].start.latitude, 48.3788083);
    }

    #[test]
    fn test_read_plan_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "S:48.3789860/16.8257190\nE:48.3789140/16.8257550").unwrap();
        let plan = Plan::read(file.path()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.segments()[0].end.longitude, 16.825755);
    }

    #[test]
    fn test_load_line_marks() {
        let (plan, marks) = load_line_marks("plans/sample.txt").unwrap();
        assert_eq!(plan.len(), 2);
        let expected: usize = plan.segments().iter().map(crate::line_mark::step_count).sum();
        assert_eq!(marks.len(), expected);
    }

    #[test]
    fn test_load_line_marks_errors() {
        let err = load_line_marks("plans/does_not_exist.txt").unwrap_err();
        assert!(matches!(err, PlanError::Io(_)));
        assert!(err.to_string().starts_with("Could not open plan file"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "S:48.378986/16.8257190\nE:48.3789140/16.8257550").unwrap();
        let err = load_line_marks(file.path()).unwrap_err();
        assert!(matches!(err, PlanError::TooFewDigits { line: 1, .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "S:0.00000000/0.00000000\nE:1000000000000000000000000.0/0.00000000").unwrap();
        let err = load_line_marks(file.path()).unwrap_err();
        assert!(matches!(err, PlanError::OutOfRange { line: 2, .. }));
    }

    #[test]
    fn test_load_empty_plan() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let (plan, marks) = load_line_marks(file.path()).unwrap();
        assert!(plan.is_empty());
        assert!(marks.is_empty());
    }
}
