use crate::error::{Result, ResultExt};
use crate::progress::ProgressTracker;
use crate::ui;
use git::RealGitRepository;
use std::path::PathBuf;
use version::BuildContext;

pub struct GenerateArgs {
    pub context: BuildContext,
    pub update_dotnet_project_files: bool,
    pub dotnet_projects: String,
    pub github_output: Option<PathBuf>,
}

pub fn generate(args: GenerateArgs) -> Result<()> {
    let mut progress = ProgressTracker::new("Build Version").with_steps([
        "Opening git repository",
        "Computing version",
        "Publishing outputs",
        "Updating .NET project files",
    ]);

    progress.start_step();
    let repo = RealGitRepository::open()?;
    progress.complete_step();

    progress.start_step();
    let info = version::get_version(&repo, &args.context)
        .with_context(|| format!("Failed to compute version for {}", args.context.git_ref))?;
    progress.complete_step();

    progress.start_step();
    ui::info_message(&format!("{} {}", info.description, info.major_minor_patch));
    for (name, value) in info.outputs() {
        ui::output_line(name, value);
    }
    if let Some(output) = &args.github_output {
        info.append_outputs(output)
            .with_context(|| format!("Failed to write outputs to {}", output.display()))?;
        progress.complete_step();
    } else {
        progress.skip_step("GITHUB_OUTPUT not set");
    }

    progress.start_step();
    if args.update_dotnet_project_files {
        let updated =
            version::dotnet::update_project_files(&args.dotnet_projects, &info.informational_version)?;
        progress.complete_step();
        ui::info_message(&format!("Updated {} project files", updated.len()));
    } else {
        progress.skip_step("not requested");
    }

    progress.complete();
    Ok(())
}
