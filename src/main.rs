use anyhow::Result;
use babygit::areas::repository::Repository;
use babygit::errors::{RepositoryError, kind_of};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

const DEFAULT_AUTHOR: &str = "babygit <babygit@localhost>";

#[derive(Parser)]
#[command(
    name = "babygit",
    version = "0.1.0",
    about = "A minimal content-addressed version control system",
    long_about = "babygit stores snapshots of a flat working directory as content-addressed \
    objects, keeps branches as ref files, and merges branches with a three-way, \
    per-file strategy.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages files of the working directory. \
        Use '.' to stage every file at the top level of the working directory."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "Files to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged files on top of the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(long, env = "BABYGIT_AUTHOR", default_value = DEFAULT_AUTHOR, help = "The commit author")]
        author: String,
        #[arg(long, env = "BABYGIT_AUTHOR_DATE", help = "Commit time as unix seconds")]
        date: Option<i64>,
    },
    #[command(
        name = "branch",
        about = "Create or list branches",
        long_about = "This command creates a branch at the current head, or lists branches when no name is given."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch to another branch",
        long_about = "This command switches the current branch and updates the working directory to its head."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
    #[command(
        name = "merge",
        about = "Merge another branch into the current branch",
        long_about = "This command fast-forwards the current branch when possible and otherwise \
        writes a merge commit, leaving conflict markers in files changed on both sides."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        name: String,
        #[arg(long, env = "BABYGIT_AUTHOR", default_value = DEFAULT_AUTHOR, help = "The merge commit author")]
        author: String,
        #[arg(long, env = "BABYGIT_AUTHOR_DATE", help = "Merge commit time as unix seconds")]
        date: Option<i64>,
    },
    #[command(
        name = "status",
        about = "Show the current branch and staged files",
        long_about = "This command shows the current branch and how each staged file compares with its head."
    )]
    Status,
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as a blob and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::load(&pwd, Box::new(std::io::stdout()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => path,
                None => std::env::current_dir()?,
            };
            Repository::init(&path, Box::new(std::io::stdout()))?;
        }
        Commands::Add { paths } => open_repository()?.add(&paths)?,
        Commands::Commit {
            message,
            author,
            date,
        } => {
            let mut repository = open_repository()?;
            let message = message.trim();
            match date {
                Some(timestamp) => repository.commit_at(message, &author, timestamp)?,
                None => repository.commit(message, &author)?,
            };
        }
        Commands::Branch { name } => {
            let mut repository = open_repository()?;
            match name {
                Some(name) => {
                    repository.create_branch(&name)?;
                }
                None => repository.list_branches()?,
            }
        }
        Commands::Checkout { name } => open_repository()?.checkout(&name)?,
        Commands::Merge { name, author, date } => {
            let mut repository = open_repository()?;
            let outcome = match date {
                Some(timestamp) => repository.merge_at(&name, &author, timestamp)?,
                None => repository.merge(&name, &author)?,
            };
            outcome.ensure_clean()?;
        }
        Commands::Status => {
            open_repository()?.status()?;
        }
        Commands::HashObject { write, file } => {
            open_repository()?.hash_object(&file, write)?;
        }
        Commands::CatFile { sha } => open_repository()?.cat_file(&sha)?,
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        match kind_of(&error) {
            Some(RepositoryError::MergeConflict(_)) | Some(RepositoryError::CheckoutConflict(_)) => {
                eprintln!("{} {}", "error:".red().bold(), error.to_string().red())
            }
            _ => eprintln!("{} {:#}", "error:".red().bold(), error),
        }
        std::process::exit(1);
    }
}
