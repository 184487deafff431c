use std::path::PathBuf;

use clap::Parser;
use shaderpack::{Encoding, EscapeMode};

#[derive(Parser, Debug)]
#[command(
    name = "shaderpack",
    about = "Pack .vs/.fs shader sources into C headers",
    version
)]
pub struct Cli {
    /// Directory to scan for shader files [default: ./shaders]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory to write generated headers into [default: src/gen]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Escaping of embedded lines: escaped or compat
    #[arg(long, conflicts_with = "compat")]
    pub escape: Option<EscapeMode>,

    /// Embed lines without escaping quotes or backslashes (same as --escape compat)
    #[arg(long)]
    pub compat: bool,

    /// Constant layout: lines or bytes
    #[arg(long)]
    pub encoding: Option<Encoding>,

    /// Also pack shaders in subdirectories
    #[arg(short, long, overrides_with = "no_recursive")]
    pub recursive: bool,

    /// Only pack the top level of the input directory
    #[arg(long, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// Create the output directory if it does not exist
    #[arg(long, overrides_with = "no_create_output")]
    pub create_output: bool,

    /// Fail when the output directory does not exist
    #[arg(long, overrides_with = "create_output")]
    pub no_create_output: bool,

    /// Config file to use instead of searching for shaderpack.toml
    #[arg(long, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore any shaderpack.toml
    #[arg(long)]
    pub no_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
