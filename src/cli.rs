use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "restamp",
    about = "Generate deployment configs from a YAML template by filling placeholders interactively",
    version
)]
pub struct Cli {
    /// Path to the YAML template
    #[arg(short, long)]
    pub template: PathBuf,

    /// Base name for the generated deployment files
    #[arg(short = 'n', long = "name")]
    pub deployment_name: String,

    /// Number of deployments to generate
    #[arg(short = 'c', long = "count")]
    pub deployment_count: u32,

    /// Delimiter wrapped around placeholder strings (e.g. "%%host%%")
    #[arg(short = 'p', long, default_value = "%%")]
    pub delimiter: String,

    /// Sentinel integer marking numeric placeholders
    #[arg(short = 'm', long, default_value_t = -99999, allow_negative_numbers = true)]
    pub sentinel: i64,

    /// Print intermediate trees to stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Skip the shared constants pass
    #[arg(short, long)]
    pub skip_constants: bool,
}
