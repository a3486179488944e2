use std::path::Path;

use anyhow::Context;

use crate::line_mark::LineMarks;

/// 导出标线点 `latitude;longitude`（微度）
pub fn write_line_marks(path: impl AsRef<Path>, marks: &LineMarks) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut writer = super::csv_writer(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    for mark in marks {
        writer.serialize(mark)?;
    }
    writer.flush()?;
    log::info!("wrote {} line marks to {}", marks.len(), path.display());
    Ok(())
}
