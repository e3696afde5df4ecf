use anyhow::Context;
use bitlet::areas::repository::Repository;
use bitlet::artifacts::core::error::as_user_error;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bitlet",
    version = "0.1.0",
    about = "A miniature local version-control system",
    long_about = "bitlet keeps snapshots of the files in a single flat directory. \
    It supports staging, commits, branches, checkout, reset and three-way merges, \
    all stored locally under .bitlet.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, global = true, help = "Run as if started in <DIR> instead of the current directory")]
    dir: Option<String>,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Log more details to stderr (repeatable)")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a new repository",
        long_about = "This command creates a repository with a single root commit and a master branch."
    )]
    Init,
    #[command(
        name = "add",
        about = "Stage a file for addition",
        long_about = "This command stages the current content of a file. \
        Adding a file whose content matches the last commit unstages it instead."
    )]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file or stage its removal",
        long_about = "This command unstages a file staged for addition. \
        If the file is tracked by the last commit it is staged for removal and deleted."
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged changes as a new commit on the active branch."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the history of the current commit")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the IDs of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command lists branches, staged files, removed files, \
        unstaged modifications and untracked files."
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch. \
        checkout -- <file> restores a file from the current commit. \
        checkout <commit> -- <file> restores a file from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit ID when a file is given")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to a commit",
        long_about = "This command checks out every file of the given commit \
        and moves the active branch to it."
    )]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current branch",
        long_about = "This command merges the given branch into the active one, \
        fast-forwarding when possible and recording a merge commit otherwise."
    )]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match as_user_error(&error) {
            Some(user_error) => {
                println!("{}", user_error);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("fatal: {:#}", error);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .context("Unable to read the current directory")?
            .to_string_lossy()
            .to_string(),
    };

    if let Commands::Init = cli.command {
        std::fs::create_dir_all(&dir).with_context(|| format!("Unable to create directory {}", dir))?;
    }

    let repository = Repository::new(&dir, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Rm { file } => repository.rm(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (Some(branch), None) => repository.checkout_branch(branch),
            (commit, Some(file)) => repository.checkout_file(commit.as_deref(), file),
            (None, None) => Cli::command()
                .error(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "checkout needs a branch, -- <file> or <commit> -- <file>",
                )
                .exit(),
        },
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit } => repository.reset(commit),
        Commands::Merge { branch } => repository.merge(branch),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by `-v`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
