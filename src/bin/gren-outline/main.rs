//! gren-outline CLI - check, format and create gren.json project outlines

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gren_outline::ops::LoadError;
use gren_outline::util::diagnostic::{emit, emit_error, suggestions};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = cli.color.enabled();

    if let Err(e) = run(cli, color) {
        report(e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("gren_outline=debug")
    } else {
        EnvFilter::new("gren_outline=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .init();

    let _ = miette::set_hook(Box::new(move |_| {
        Box::new(miette::MietteHandlerOpts::new().color(color).build())
    }));

    // Execute command
    match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Fmt(args) => commands::fmt::execute(args, color),
        Commands::Init(args) => commands::init::execute(args),
        Commands::Exposed(args) => commands::exposed::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Outline problems get a rendered diagnostic; anything else prints its
/// context chain.
fn report(e: anyhow::Error, color: bool) {
    match e.downcast::<LoadError>() {
        Ok(LoadError::Invalid(report)) if report.has_span() => {
            eprintln!("{:?}", miette::Report::new(*report));
        }
        Ok(LoadError::Invalid(report)) => emit(&report.to_diagnostic(), color),
        Ok(LoadError::NoOutline { path, source }) => {
            let reason = source.to_string();
            emit_error(
                &format!("could not read {}", path.display()),
                &[reason.as_str()],
                &[suggestions::NO_OUTLINE],
                color,
            );
        }
        Err(e) => eprintln!("error: {:#}", e),
    }
}
