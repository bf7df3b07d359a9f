use anyhow::Result;
use clap::{Parser, Subcommand};
use twig::areas::repository::Repository;
use twig::artifacts::treebuild::batch::MktreeOptions;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A git tree construction toolkit",
    long_about = "Builds git tree objects from index-info formatted descriptions. \
    The mktree command validates, sorts, and deduplicates entries before writing \
    each tree to the loose object database; companion plumbing commands cover \
    hashing blobs and listing stored trees.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
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
        path: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes an object file and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists one level of a stored tree object. \
        It requires the SHA of the tree to be specified."
    )]
    LsTree {
        #[arg(index = 1, help = "The tree SHA to list")]
        sha: String,
    },
    #[command(
        name = "mktree",
        about = "Build a tree object from ls-tree formatted input",
        long_about = "This command reads index-info formatted entries from standard input, \
        one per line, and writes a tree object to the object database, printing its SHA. \
        With --batch, a blank line separates input for multiple trees."
    )]
    Mktree {
        #[arg(short = 'z', help = "Input entries are NUL terminated")]
        nul_terminated: bool,
        #[arg(long = "missing", help = "Allow entries whose objects are not in the database")]
        allow_missing: bool,
        #[arg(long, help = "Write the tree exactly as given, without sorting or validation")]
        literally: bool,
        #[arg(long, help = "Build more than one tree, separated by blank lines")]
        batch: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::HashObject { write, file } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.hash_object(file, *write)?
        }
        Commands::LsTree { sha } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.ls_tree(sha)?
        }
        Commands::Mktree {
            nul_terminated,
            allow_missing,
            literally,
            batch,
        } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            let options = MktreeOptions::new(*nul_terminated, *allow_missing, *literally, *batch);

            repository.mktree(options, std::io::stdin().lock())?
        }
    }

    Ok(())
}
