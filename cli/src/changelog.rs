use crate::error::{Result, ResultExt};
use crate::progress::ProgressTracker;
use crate::ui;
use changelog::{AddOutcome, ChangelogConfig, EntryRequest, environment_label};
use std::path::PathBuf;

pub struct AddEntryArgs {
    pub repository: String,
    pub pr_number: String,
    pub pr_title: String,
    pub environment: String,
    pub changelog_path: PathBuf,
    pub create_if_missing: bool,
}

pub fn add_entry(args: AddEntryArgs, config: ChangelogConfig) -> Result<()> {
    let mut progress = ProgressTracker::new("Changelog Entry")
        .with_steps([format!("Adding PR #{} to {}", args.pr_number, args.changelog_path.display())]);

    let request = EntryRequest::new(
        args.repository,
        args.pr_number,
        args.pr_title,
        environment_label(&args.environment),
    );
    let config = config.with_create_if_missing(args.create_if_missing);

    progress.start_step();
    let outcome = ::changelog::add_entry(&args.changelog_path, &request, config)
        .with_context(|| format!("Failed to update {}", args.changelog_path.display()))?;

    match outcome {
        AddOutcome::Added {
            placement,
            created_file,
        } => {
            progress.complete_step();
            progress.complete();
            if created_file {
                ui::info_message(&format!("Created {}", args.changelog_path.display()));
            }
            ui::success_message(&format!(
                "PR #{} added to {} {} ({placement})",
                request.pr_number,
                args.changelog_path.display(),
                request.environment
            ));
        }
        AddOutcome::AlreadyListed => {
            progress.skip_step("already listed");
            ui::warning_message(&format!(
                "PR #{} is already listed in {}; nothing to do",
                request.pr_number,
                args.changelog_path.display()
            ));
        }
    }

    Ok(())
}
