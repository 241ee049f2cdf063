use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Flatten a source tree into a single directory of files"
)]
pub struct Cli {
    /// Directory names to exclude (prefix match, case-insensitive)
    #[arg(long, short = 'd', num_args = 1.., value_delimiter = ',')]
    pub exclude_dirs: Option<Vec<String>>,

    /// File names or single-wildcard patterns to exclude (e.g. '*.log')
    #[arg(long, short = 'f', num_args = 1.., value_delimiter = ',')]
    pub exclude_files: Option<Vec<String>>,

    /// File extensions to include (e.g., .js,.ts)
    #[arg(long, short = 'e', num_args = 1.., value_delimiter = ',')]
    pub include_extensions: Option<Vec<String>>,

    /// Source directory [default: current directory]
    #[arg(long, short = 's')]
    pub source: Option<PathBuf>,

    /// Target directory [default: <current directory>/context-output]
    #[arg(long, short = 't')]
    pub target: Option<PathBuf>,

    /// Use a predefined set of filters from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Read presets from this file instead of the user config directory
    #[arg(long)]
    pub presets_file: Option<PathBuf>,

    /// Log failed copies and continue instead of aborting the run
    #[arg(long)]
    pub keep_going: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
