use opencv::core::Mat;
use opencv::highgui;

use super::DisplaySinkTrait;

pub struct HighGuiWindow {
    label: String,
}

impl HighGuiWindow {
    pub fn new(label: &str) -> anyhow::Result<Self> {
        highgui::named_window(label, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            label: label.to_string(),
        })
    }
}

impl DisplaySinkTrait for HighGuiWindow {
    fn show(&mut self, frame: &Mat) -> anyhow::Result<()> {
        highgui::imshow(&self.label, frame)?;
        Ok(())
    }

    fn wait_key(&mut self, delay_ms: i32) -> anyhow::Result<Option<i32>> {
        let key = highgui::wait_key(delay_ms)?;
        // 部分平台无按键时返回 255
        Ok((key >= 0 && key != 255).then_some(key))
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_window(&self.label) {
            log::warn!("destroy window {}: {}", self.label, e);
        }
    }
}

/// 不显示，从不返回按键
#[derive(Debug, Default)]
pub struct HeadlessDisplay;

impl DisplaySinkTrait for HeadlessDisplay {
    fn show(&mut self, _frame: &Mat) -> anyhow::Result<()> {
        Ok(())
    }

    fn wait_key(&mut self, _delay_ms: i32) -> anyhow::Result<Option<i32>> {
        Ok(None)
    }
}
