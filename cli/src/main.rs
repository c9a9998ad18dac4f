mod changelog;
mod cli;
mod config;
mod error;
mod message;
mod progress;
mod sarif;
mod ui;
mod version;

use clap::Parser;
use cli::{ChangelogAction, Cli, Commands, SarifAction, VersionAction};
use colored::Colorize;
use config::AppConfig;
use std::process;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Changelog {
            action:
                ChangelogAction::AddEntry {
                    repository,
                    pr_number,
                    pr_title,
                    environment,
                    changelog_path,
                    create_if_missing,
                },
        } => changelog::add_entry(
            changelog::AddEntryArgs {
                repository,
                pr_number,
                pr_title,
                environment,
                changelog_path,
                create_if_missing: create_if_missing.is_enabled(),
            },
            AppConfig::load(&cli.config).changelog,
        ),
        Commands::Sarif {
            action:
                SarifAction::Convert {
                    input_file,
                    output_file,
                    check_type,
                },
        } => sarif::convert(&input_file, &output_file, check_type),
        Commands::RenderMessage {
            template_file,
            data_file,
            output_file,
        } => message::render(&template_file, &data_file, &output_file),
        Commands::Version {
            action:
                VersionAction::Generate {
                    main_branch_name,
                    git_ref,
                    run_number,
                    sha,
                    update_dotnet_project_files,
                    dotnet_projects,
                    github_output,
                },
        } => version::generate(version::GenerateArgs {
            context: ::version::BuildContext::new(main_branch_name, git_ref, run_number, sha),
            update_dotnet_project_files,
            dotnet_projects,
            github_output,
        }),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
