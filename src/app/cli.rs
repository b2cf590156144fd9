use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Print a folder's tree and selected Python, Docker and TOML contents"
)]
pub struct Cli {
    /// Folders to scan (defaults to the current directory)
    pub paths: Vec<PathBuf>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Skip .git folders and files
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub skip_git: Option<bool>,

    /// Skip virtual environment folders (venv, .venv, env, .env)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub skip_venv: Option<bool>,

    /// Skip __pycache__ folders and .pyc/.pyo/.pyd files
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub skip_python_aux: Option<bool>,

    /// Show top-level classes of .py files
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub py: Option<bool>,

    /// Show Dockerfile contents
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub docker: Option<bool>,

    /// Show .toml file contents
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub toml: Option<bool>,

    /// Show contents of every supported file type
    #[arg(long)]
    pub all: bool,

    /// Show only the directory tree structure
    #[arg(long)]
    pub tree: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
