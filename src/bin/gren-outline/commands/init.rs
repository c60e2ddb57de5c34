//! `gren-outline init` command

use anyhow::Result;

use crate::cli::InitArgs;
use gren_outline::ops::{init_project, NewOptions};
use gren_outline::util::config::{self, Config};

use super::project_root;

/// Combine command-line choices with configured defaults.
pub fn new_options(args: &InitArgs, config: &Config) -> NewOptions {
    NewOptions {
        package: args.package.clone(),
        platform: args.platform.unwrap_or_else(|| config.platform()),
        indent: config.indent(),
    }
}

pub fn execute(args: InitArgs) -> Result<()> {
    let root = project_root(args.path.clone())?;
    let config = config::discover(&root);
    let opts = new_options(&args, &config);

    let outline = init_project(&root, &opts)?;

    match outline.name() {
        Some(name) => eprintln!("     Initialized package `{}`", name),
        None => eprintln!("     Initialized {} application", outline.platform()),
    }

    Ok(())
}
