use clap::{Parser, Subcommand, ValueEnum};
use sarif::CheckType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "actions-kit")]
#[command(
    author,
    version,
    about = "Helpers for CI pipelines: changelog entries, scan reports, messages and build versions"
)]
pub struct Cli {
    /// Configuration file (optional; defaults are used when it does not exist)
    #[clap(long, global = true, default_value = ".actions-kit.toml")]
    pub config: PathBuf,

    /// Enable verbose output with additional information
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Maintain the changelog of merged pull requests
    Changelog {
        #[clap(subcommand)]
        action: ChangelogAction,
    },

    /// Work with SARIF scan reports
    Sarif {
        #[clap(subcommand)]
        action: SarifAction,
    },

    /// Render a message template with variables from a JSON file
    RenderMessage {
        /// Template file using {{ variable }} placeholders
        template_file: PathBuf,

        /// JSON file with the template variables
        data_file: PathBuf,

        /// File to write the rendered message to
        output_file: PathBuf,
    },

    /// Compute build versions from the CI ref
    Version {
        #[clap(subcommand)]
        action: VersionAction,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum ChangelogAction {
    /// Add a pull request entry under today's date and the given environment
    #[clap(name = "add-entry")]
    AddEntry {
        /// Repository as owner/name, used in the pull request link
        #[clap(long, env = "GITHUB_REPOSITORY")]
        repository: String,

        /// Pull request number
        #[clap(long)]
        pr_number: String,

        /// Pull request title
        #[clap(long)]
        pr_title: String,

        /// Deployment environment, with or without brackets (e.g. staging or [staging])
        #[clap(long)]
        environment: String,

        /// Path to the changelog file
        #[clap(long)]
        changelog_path: PathBuf,

        /// Create the changelog when it does not exist
        #[clap(long, value_enum, default_value_t = Switch::Disabled)]
        create_if_missing: Switch,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum SarifAction {
    /// Convert a SARIF report into the simplified JSON used by CI summaries
    Convert {
        /// SARIF report to read
        input_file: PathBuf,

        /// JSON file to write
        output_file: PathBuf,

        /// Scanner that produced the report (trivy or gitleaks)
        check_type: CheckType,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum VersionAction {
    /// Generate version numbers for the current build
    Generate {
        /// Name of the main branch carrying release tags
        #[clap(long, default_value = "main")]
        main_branch_name: String,

        /// Git ref being built
        #[clap(long = "ref", env = "GITHUB_REF")]
        git_ref: String,

        /// CI run number
        #[clap(long, env = "GITHUB_RUN_NUMBER")]
        run_number: String,

        /// Commit being built
        #[clap(long, env = "GITHUB_SHA")]
        sha: String,

        /// Write the informational version into .NET project files
        #[clap(long, default_value_t = false)]
        update_dotnet_project_files: bool,

        /// Glob selecting the .NET project files to update
        #[clap(long, default_value = "**/*.csproj")]
        dotnet_projects: String,

        /// File receiving name=value step outputs
        #[clap(long, env = "GITHUB_OUTPUT")]
        github_output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Switch {
    Enabled,
    Disabled,
}

impl Switch {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}
