//! `gren-outline check` command

use anyhow::Result;

use crate::cli::CheckArgs;
use gren_outline::core::outline::Outline;
use gren_outline::ops::load;
use gren_outline::util::fs::RealFs;

use super::project_root;

/// One line describing a valid outline.
pub fn summarize(outline: &Outline) -> String {
    match outline {
        Outline::App(app) => format!(
            "application for {} with {} source director{}, {} direct and {} indirect dependencies",
            app.platform,
            app.source_dirs.len(),
            if app.source_dirs.len() == 1 { "y" } else { "ies" },
            app.direct.len(),
            app.indirect.len()
        ),
        Outline::Pkg(pkg) => format!(
            "package {} {} for {} exposing {} module{}",
            pkg.name,
            pkg.version,
            pkg.platform,
            pkg.exposed.flatten().len(),
            if pkg.exposed.flatten().len() == 1 { "" } else { "s" }
        ),
    }
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let root = project_root(args.path)?;
    let outline = load(&RealFs, &root)?;

    println!("ok: {}", summarize(&outline));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gren_outline::core::outline::Platform;
    use gren_outline::core::version::Version;

    #[test]
    fn test_summarize_application() {
        let outline = Outline::default_application(Version::COMPILER, Platform::Node);
        assert_eq!(
            summarize(&outline),
            "application for node with 1 source directory, 1 direct and 0 indirect dependencies"
        );
    }

    #[test]
    fn test_summarize_package() {
        let outline = Outline::default_package(
            "someone/thing".parse().unwrap(),
            Version::COMPILER,
            Platform::Common,
        );
        assert_eq!(
            summarize(&outline),
            "package someone/thing 1.0.0 for common exposing 0 modules"
        );
    }
}
