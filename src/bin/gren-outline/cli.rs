//! CLI definitions using clap.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use gren_outline::core::outline::Platform;
use gren_outline::core::package_name::PackageName;

/// gren-outline - check, format and create gren.json project outlines
#[derive(Parser)]
#[command(name = "gren-outline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to use colored output
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ColorChoice::Auto,
        env = "GREN_OUTLINE_COLOR"
    )]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Whether diagnostics on stderr should be colored.
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that gren.json is valid for this project
    Check(CheckArgs),

    /// Rewrite gren.json in canonical form
    Fmt(FmtArgs),

    /// Create gren.json in a new or existing directory
    Init(InitArgs),

    /// List the modules a package exposes
    Exposed(ExposedArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct FmtArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Exit with an error instead of rewriting when gren.json is not canonical
    #[arg(long)]
    pub check: bool,
}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Create a package with this `author/project` name instead of an application
    #[arg(long, value_name = "NAME")]
    pub package: Option<PackageName>,

    /// Platform the project runs on (defaults to config, then browser)
    #[arg(long)]
    pub platform: Option<Platform>,
}

#[derive(Args)]
pub struct ExposedArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
