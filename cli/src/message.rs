use crate::error::{Result, ResultExt};
use crate::ui;
use std::path::Path;

pub fn render(template_file: &Path, data_file: &Path, output_file: &Path) -> Result<()> {
    template::render_file(template_file, data_file, output_file)
        .with_context(|| format!("Failed to render {}", template_file.display()))?;

    ui::success_message(&format!("Message written to {}", output_file.display()));
    Ok(())
}
