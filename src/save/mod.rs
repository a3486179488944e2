//! CSV 导出，分号分隔。
mod marks;
mod projection;

pub use marks::write_line_marks;
pub use projection::{ProjectionCsv, ProjectionRecord};

pub(crate) fn csv_writer(path: &std::path::Path) -> anyhow::Result<csv::Writer<std::fs::File>> {
    let writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    Ok(writer)
}
