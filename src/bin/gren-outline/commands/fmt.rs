//! `gren-outline fmt` command

use anyhow::Result;

use crate::cli::FmtArgs;
use gren_outline::core::outline::OUTLINE_FILE;
use gren_outline::ops::{format_outline, FormatOutcome};
use gren_outline::util::config;
use gren_outline::util::diagnostic::{emit, suggestions, Diagnostic};

use super::project_root;

pub fn execute(args: FmtArgs, color: bool) -> Result<()> {
    let root = project_root(args.path)?;
    let config = config::discover(&root);

    match format_outline(&root, config.indent(), args.check)? {
        FormatOutcome::Unchanged => {}
        FormatOutcome::Rewritten => eprintln!("   Formatted {}", root.join(OUTLINE_FILE).display()),
        FormatOutcome::NeedsFormatting => {
            let diag = Diagnostic::warning(format!("{} is not formatted", OUTLINE_FILE))
                .with_location(root.join(OUTLINE_FILE))
                .with_suggestion(suggestions::NOT_CANONICAL);
            emit(&diag, color);
            std::process::exit(1);
        }
    }

    Ok(())
}
