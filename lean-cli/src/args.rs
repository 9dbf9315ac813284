use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration and library management for the containerized engine.
#[derive(Parser, Debug)]
#[command(name = "lean")]
#[command(about = "Configuration and library management for the lean engine", long_about = None)]
pub struct Cli {
    /// Directory holding the config and credentials files (default: ~/.lean).
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// CLI root directory (default: nearest directory containing a lean.json).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read and write configurable options.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Store API credentials. Missing values are prompted for.
    Login {
        #[arg(short, long, help = "User id used for API requests")]
        user_id: Option<String>,

        #[arg(short = 't', long, help = "API token used for API requests")]
        api_token: Option<String>,
    },
    /// Remove stored API credentials.
    Logout,
    /// Link library projects into projects.
    Library {
        #[command(subcommand)]
        command: LibraryCommands,
    },
    /// List the projects under the CLI root.
    Projects,
    /// Print the docker image that would be used.
    Image {
        /// Resolve the research image instead of the engine image.
        #[arg(long)]
        research: bool,

        /// Image tag to combine with the default image name.
        #[arg(long, conflicts_with = "image")]
        version: Option<String>,

        /// Full image name overriding the configured one.
        #[arg(long)]
        image: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set an option.
    Set { key: String, value: String },
    /// Print the value of an option.
    Get { key: String },
    /// Remove the stored value of an option.
    Unset { key: String },
    /// List every option with its value.
    List,
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommands {
    /// Reference a library from a project.
    Add {
        /// Path to the consuming project.
        project: PathBuf,
        /// Path to the library (under the Library directory).
        library: PathBuf,
    },
    /// Drop a library reference from a project.
    Remove { project: PathBuf, library: PathBuf },
    /// Show the libraries a project references.
    List { project: PathBuf },
}
