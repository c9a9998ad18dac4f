use crate::error::{Result, ResultExt};
use crate::ui;
use sarif::{CheckType, ConversionOutcome};
use std::path::Path;

pub fn convert(input_file: &Path, output_file: &Path, check_type: CheckType) -> Result<()> {
    ui::status_message(&format!(
        "Converting {} report {}",
        check_type,
        input_file.display()
    ));

    let outcome = sarif::convert_file(input_file, output_file, check_type)
        .with_context(|| format!("Failed to convert {}", input_file.display()))?;

    match outcome {
        ConversionOutcome::Written { total_files } => ui::success_message(&format!(
            "Wrote {} ({total_files} files with findings)",
            output_file.display()
        )),
        ConversionOutcome::NoFindings => ui::info_message(&format!(
            "No {check_type} findings; {} was not written",
            output_file.display()
        )),
    }

    Ok(())
}
