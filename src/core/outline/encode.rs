//! Writing an [`Outline`] back out as canonical JSON.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{json, Map, Value};

use crate::core::module_name::ModuleName;
use crate::core::package_name::PackageName;

use super::{Exposed, Outline};

/// Indentation used when none is configured.
pub const DEFAULT_INDENT: usize = 4;

/// The JSON form of an outline. Keys come out in a fixed order.
pub fn encode(outline: &Outline) -> Value {
    match outline {
        Outline::App(app) => json!({
            "type": "application",
            "platform": app.platform.as_str(),
            "source-directories": app
                .source_dirs
                .iter()
                .map(|dir| dir.path().to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
            "gren-version": app.gren_version.to_string(),
            "dependencies": {
                "direct": dependencies(&app.direct),
                "indirect": dependencies(&app.indirect),
            },
        }),
        Outline::Pkg(pkg) => json!({
            "type": "package",
            "platform": pkg.platform.as_str(),
            "name": pkg.name.to_string(),
            "summary": pkg.summary,
            "license": pkg.license.as_str(),
            "version": pkg.version.to_string(),
            "exposed-modules": exposed(&pkg.exposed),
            "gren-version": pkg.gren_version.to_string(),
            "dependencies": dependencies(&pkg.dependencies),
        }),
    }
}

fn dependencies<V: Display>(deps: &BTreeMap<PackageName, V>) -> Value {
    Value::Object(
        deps.iter()
            .map(|(name, v)| (name.to_string(), Value::String(v.to_string())))
            .collect::<Map<String, Value>>(),
    )
}

fn modules(names: &[ModuleName]) -> Value {
    Value::Array(
        names
            .iter()
            .map(|name| Value::String(name.to_string()))
            .collect(),
    )
}

fn exposed(exposed: &Exposed) -> Value {
    match exposed {
        Exposed::List(names) => modules(names),
        Exposed::Dict(sections) => Value::Object(
            sections
                .iter()
                .map(|(header, names)| (header.clone(), modules(names)))
                .collect(),
        ),
    }
}

/// Render with the default indentation.
pub fn to_string(outline: &Outline) -> serde_json::Result<String> {
    to_string_with_indent(outline, DEFAULT_INDENT)
}

/// Render as pretty JSON indented by `indent` spaces, ending in a newline.
pub fn to_string_with_indent(outline: &Outline, indent: usize) -> serde_json::Result<String> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));

    encode(outline).serialize(&mut ser)?;

    let mut text = String::from_utf8(out).map_err(serde_json::Error::custom)?;
    text.push('\n');
    Ok(text)
}
