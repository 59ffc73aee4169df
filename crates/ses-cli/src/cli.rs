use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ses",
    about = "Shortest edit script diff for bytes and lines",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with diff options; flags override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff two files byte by byte
    Bytes(BytesArgs),
    /// Diff two files line by line
    Lines(LinesArgs),
}

#[derive(Args)]
pub struct BytesArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Give up once the edit distance reaches this value
    #[arg(long)]
    pub budget: Option<usize>,
}

#[derive(Args)]
pub struct LinesArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Ignore differences in whitespace runs and line ends
    #[arg(short = 'w', long)]
    pub skip_whitespace: bool,
    /// Give up once the edit distance reaches this value
    #[arg(long)]
    pub budget: Option<usize>,
    /// Use the number of distinct lines as the budget
    #[arg(long, conflicts_with = "budget")]
    pub vocabulary_budget: bool,
}
