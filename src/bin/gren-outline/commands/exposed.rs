//! `gren-outline exposed` command

use anyhow::{bail, Result};

use crate::cli::ExposedArgs;
use gren_outline::core::outline::Outline;
use gren_outline::ops::load;
use gren_outline::util::diagnostic::suggestions;
use gren_outline::util::fs::RealFs;

use super::project_root;

pub fn execute(args: ExposedArgs) -> Result<()> {
    let root = project_root(args.path)?;

    match load(&RealFs, &root)? {
        Outline::Pkg(pkg) => {
            for module in pkg.exposed.flatten() {
                println!("{}", module);
            }
            Ok(())
        }
        Outline::App(_) => bail!(
            "{} describes an application, which exposes no modules\n{}",
            root.display(),
            suggestions::NOT_A_PACKAGE
        ),
    }
}
