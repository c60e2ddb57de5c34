//! Decoding `gren.json` into an [`Outline`].
//!
//! Fields are read in a fixed order and the first failure is reported. The
//! `type` field is always read first and decides which branch runs.

use std::collections::{BTreeMap, HashSet};

use crate::core::module_name::ModuleName;
use crate::core::non_empty::NonEmpty;
use crate::core::package_name::PackageName;
use crate::core::version::{Constraint, Version};
use crate::json::{self, DecodeError, Decoder, Node, Str};

use super::{
    AppOutline, Exposed, Outline, PkgOutline, Platform, Problem, SrcDir, SECTION_HEADER_LIMIT,
    SUMMARY_LIMIT,
};

type Result<T> = std::result::Result<T, DecodeError<Problem>>;

enum Kind {
    App,
    Pkg,
}

/// Decode an outline from the text of a `gren.json` file.
pub fn decode(src: &str) -> Result<Outline> {
    let root = json::parse(src).map_err(DecodeError::syntax)?;
    let d = Decoder::new();

    let kind = d.field(&root, "type", |node| {
        d.custom_string(node, |s| match s.value.as_str() {
            "application" => Ok(Kind::App),
            "package" => Ok(Kind::Pkg),
            other => Err(Problem::BadType(other.to_string())),
        })
    })?;

    match kind {
        Kind::App => app(d, &root).map(Outline::App),
        Kind::Pkg => pkg(d, &root).map(Outline::Pkg),
    }
}

fn app(d: Decoder, root: &Node) -> Result<AppOutline> {
    let gren_version = d.field(root, "gren-version", |n| version(d, n))?;
    let platform = d.field(root, "platform", |n| platform(d, n))?;
    let source_dirs = d.field(root, "source-directories", |n| source_dirs(d, n))?;
    let (direct, indirect) = d.field(root, "dependencies", |deps| {
        let direct = d.field(deps, "direct", |n| dependencies(d, n, |v| version(d, v)))?;
        let indirect = d.field(deps, "indirect", |n| dependencies(d, n, |v| version(d, v)))?;
        Ok((direct, indirect))
    })?;

    Ok(AppOutline {
        gren_version,
        platform,
        source_dirs,
        direct,
        indirect,
    })
}

fn pkg(d: Decoder, root: &Node) -> Result<PkgOutline> {
    let name = d.field(root, "name", |n| package_name(d, n))?;
    let summary = d.field(root, "summary", |n| {
        d.bounded_string(n, SUMMARY_LIMIT, |_| Problem::SummaryTooLong)
    })?;
    let license = d.field(root, "license", |n| {
        d.custom_string(n, |s| s.value.parse().map_err(Problem::BadLicense))
    })?;
    let version = d.field(root, "version", |n| version(d, n))?;
    let exposed = d.field(root, "exposed-modules", |n| exposed(d, n))?;
    let dependencies = d.field(root, "dependencies", |n| {
        dependencies(d, n, |v| constraint(d, v))
    })?;
    let gren_version = d.field(root, "gren-version", |n| constraint(d, n))?;
    let platform = d.field(root, "platform", |n| platform(d, n))?;

    Ok(PkgOutline {
        name,
        summary,
        license,
        version,
        exposed,
        dependencies,
        gren_version,
        platform,
    })
}

fn version(d: Decoder, node: &Node) -> Result<Version> {
    d.custom_string(node, |s| s.value.parse().map_err(Problem::BadVersion))
}

fn constraint(d: Decoder, node: &Node) -> Result<Constraint> {
    d.custom_string(node, |s| s.value.parse().map_err(Problem::BadConstraint))
}

fn platform(d: Decoder, node: &Node) -> Result<Platform> {
    d.custom_string(node, |s| s.value.parse().map_err(Problem::BadPlatform))
}

fn package_name(d: Decoder, node: &Node) -> Result<PackageName> {
    d.custom_string(node, |s| {
        s.value.parse().map_err(|reason| Problem::BadPackageName {
            given: s.value.clone(),
            reason,
        })
    })
}

fn source_dirs(d: Decoder, node: &Node) -> Result<NonEmpty<SrcDir>> {
    let dirs = d.list(node, |item| {
        d.string(item).map(|s| SrcDir::classify(s.value.as_str()))
    })?;
    NonEmpty::from_vec(dirs).ok_or_else(|| DecodeError::failure(node.start, Problem::NoSourceDirs))
}

/// Package names used as object keys fail as dependency names, not as
/// package names.
fn dependency_name(key: &Str) -> Result<PackageName> {
    key.value.parse().map_err(|reason| {
        DecodeError::failure(
            key.start,
            Problem::BadDependencyName {
                given: key.value.clone(),
                reason,
            },
        )
    })
}

/// Decode a dependency object. A repeated key keeps its first value.
fn dependencies<V>(
    d: Decoder,
    node: &Node,
    value: impl FnMut(&Node) -> Result<V>,
) -> Result<BTreeMap<PackageName, V>> {
    let mut deps = BTreeMap::new();
    for (name, v) in d.pairs(node, dependency_name, value)? {
        deps.entry(name).or_insert(v);
    }
    Ok(deps)
}

fn module_list(d: Decoder, node: &Node) -> Result<Vec<ModuleName>> {
    d.list(node, |item| {
        d.custom_string(item, |s| s.value.parse().map_err(Problem::BadModuleName))
    })
}

/// A flat list of modules, or failing that an object of named sections
/// with distinct headers.
fn exposed(d: Decoder, node: &Node) -> Result<Exposed> {
    let as_list = |n: &Node| -> Result<Exposed> { module_list(d, n).map(Exposed::List) };
    let as_sections = |n: &Node| -> Result<Exposed> {
        let mut seen = HashSet::new();
        d.pairs(
            n,
            |header: &Str| -> Result<String> {
                let text =
                    d.bounded(header, SECTION_HEADER_LIMIT, |_| Problem::SectionHeaderTooLong)?;
                if !seen.insert(text.clone()) {
                    return Err(DecodeError::failure(
                        header.start,
                        Problem::RepeatedSectionHeader(text),
                    ));
                }
                Ok(text)
            },
            |modules| module_list(d, modules),
        )
        .map(Exposed::Dict)
    };

    let alternatives: [&dyn Fn(&Node) -> Result<Exposed>; 2] = [&as_list, &as_sections];
    d.one_of(node, &alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::license::License;
    use crate::core::outline::encode;
    use crate::json::{Expected, Reason, SyntaxProblem};
    use crate::test_support::fixtures;
    use std::path::PathBuf;

    fn modules(names: &[&str]) -> Vec<ModuleName> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    fn package_with_summary(summary: &str) -> String {
        format!(
            r#"{{
    "type": "package",
    "name": "someone/thing",
    "summary": "{}",
    "license": "MIT",
    "version": "1.0.0",
    "exposed-modules": ["Thing"],
    "dependencies": {{ "core-pkg/core": "6.0.0 <= v < 7.0.0" }},
    "gren-version": "0.5.0 <= v < 0.6.0",
    "platform": "common"
}}"#,
            summary
        )
    }

    #[test]
    fn test_decode_application() {
        let outline = decode(fixtures::APPLICATION).unwrap();
        let Outline::App(app) = outline else {
            panic!("expected an application");
        };

        assert_eq!(app.gren_version, Version::new(0, 5, 0));
        assert_eq!(app.platform, Platform::Browser);
        assert_eq!(
            app.source_dirs.into_vec(),
            vec![
                SrcDir::Relative(PathBuf::from("src")),
                SrcDir::Relative(PathBuf::from("lib"))
            ]
        );
        assert_eq!(
            app.direct.get(&PackageName::core()),
            Some(&Version::new(6, 0, 0))
        );
        assert_eq!(app.indirect.len(), 1);
    }

    #[test]
    fn test_decode_package() {
        let outline = decode(fixtures::PACKAGE).unwrap();
        let Outline::Pkg(pkg) = outline else {
            panic!("expected a package");
        };

        assert_eq!(pkg.name.to_string(), "someone/parser");
        assert_eq!(pkg.license, "BSD-3-Clause".parse::<License>().unwrap());
        assert_eq!(
            pkg.exposed,
            Exposed::Dict(vec![
                ("Parsing".to_string(), modules(&["Parser", "Parser.Advanced"])),
                ("Errors".to_string(), modules(&["Parser.Error"])),
            ])
        );
        assert_eq!(pkg.gren_version.to_string(), "0.5.0 <= v < 0.6.0");
        assert_eq!(pkg.platform, Platform::Common);
    }

    #[test]
    fn test_round_trip() {
        for src in [fixtures::APPLICATION, fixtures::PACKAGE] {
            let outline = decode(src).unwrap();
            let again = decode(&encode::to_string(&outline).unwrap()).unwrap();
            assert_eq!(again, outline);
        }

        let defaults = [
            Outline::default_application(Version::COMPILER, Platform::Node),
            Outline::default_package(
                "someone/thing".parse().unwrap(),
                Version::COMPILER,
                Platform::Browser,
            ),
            Outline::default_package(PackageName::core(), Version::COMPILER, Platform::Common),
        ];
        for outline in defaults {
            assert_eq!(decode(&encode::to_string(&outline).unwrap()).unwrap(), outline);
        }
    }

    fn package(edit: impl FnOnce(&mut PkgOutline)) -> Outline {
        let Outline::Pkg(mut pkg) = Outline::default_package(
            "someone/thing".parse().unwrap(),
            Version::COMPILER,
            Platform::Common,
        ) else {
            unreachable!();
        };
        edit(&mut pkg);
        Outline::Pkg(pkg)
    }

    fn application(dirs: &[&str]) -> Outline {
        let Outline::App(mut app) = Outline::default_application(Version::COMPILER, Platform::Node)
        else {
            unreachable!();
        };
        app.source_dirs =
            NonEmpty::from_vec(dirs.iter().map(|dir| SrcDir::classify(*dir)).collect()).unwrap();
        Outline::App(app)
    }

    #[test]
    fn test_round_trip_edge_cases() {
        let absolute = if cfg!(windows) { r"C:\shared" } else { "/opt/shared" };
        assert!(matches!(SrcDir::classify(absolute), SrcDir::Absolute(_)));

        let cases = vec![
            (
                "absolute and relative directories",
                application(&["src", absolute, "../vendor/lib"]),
            ),
            (
                "flat exposed list",
                package(|p| p.exposed = Exposed::List(modules(&["Parser", "Parser.Advanced"]))),
            ),
            (
                "summary at limit ending in a quote",
                package(|p| p.summary = format!("{}\"", "s".repeat(79))),
            ),
            (
                "summary with escapes",
                package(|p| p.summary = "tab\there \\ back\nslash \u{1} \"q\"".to_string()),
            ),
            (
                "non-ASCII summary at limit",
                package(|p| p.summary = "\u{e9}".repeat(40)),
            ),
            (
                "section headers with escapes and non-ASCII",
                package(|p| {
                    p.exposed = Exposed::Dict(vec![
                        (format!("{}\"", "h".repeat(19)), modules(&["Parser"])),
                        ("\u{dc}n\u{ef}c\u{f6}d\u{e9}".to_string(), modules(&["Parser.Error"])),
                        ("Empty".to_string(), Vec::new()),
                    ])
                }),
            ),
            ("no sections", package(|p| p.exposed = Exposed::Dict(Vec::new()))),
        ];

        for (name, outline) in cases {
            let text = encode::to_string(&outline).unwrap();
            assert_eq!(decode(&text).as_ref(), Ok(&outline), "{}", name);
        }
    }

    #[test]
    fn test_summary_limit_counts_unescaped_bytes() {
        let escaped = format!("{}\\\"", "s".repeat(79));
        let Outline::Pkg(pkg) = decode(&package_with_summary(&escaped)).unwrap() else {
            panic!("expected a package");
        };
        assert_eq!(pkg.summary.len(), 80);

        let escaped = format!("{}\\\"", "s".repeat(80));
        let src = package_with_summary(&escaped);
        let err = decode(&src).unwrap_err();
        assert_eq!(err.problem(), Some(&Problem::SummaryTooLong));
        assert_eq!(err.at.offset, src.find(&escaped).unwrap());
    }

    #[test]
    fn test_repeated_section_header_is_rejected() {
        let src = package_with_summary("x").replace(
            r#"["Thing"]"#,
            r#"{"A": ["Thing"], "B": [], "A": ["Other"]}"#,
        );
        let err = decode(&src).unwrap_err();

        assert_eq!(err.path_string(), "exposed-modules");
        let Reason::OneOf(alternatives) = &err.reason else {
            panic!("expected OneOf, got {:?}", err.reason);
        };
        assert_eq!(
            alternatives[1].problem(),
            Some(&Problem::RepeatedSectionHeader("A".to_string()))
        );
        assert_eq!(alternatives[1].at.offset, src.rfind("\"A\"").unwrap() + 1);
    }

    #[test]
    fn test_summary_at_limit_decodes() {
        let summary = "s".repeat(80);
        let Outline::Pkg(pkg) = decode(&package_with_summary(&summary)).unwrap() else {
            panic!("expected a package");
        };
        assert_eq!(pkg.summary, summary);
    }

    #[test]
    fn test_summary_over_limit_fails_at_summary_start() {
        let summary = "s".repeat(81);
        let src = package_with_summary(&summary);

        let err = decode(&src).unwrap_err();
        assert_eq!(err.problem(), Some(&Problem::SummaryTooLong));
        assert_eq!(err.path_string(), "summary");

        let text_start = src.find(&summary).unwrap();
        assert_eq!(err.at.offset, text_start);
        assert_eq!(err.at.row, 4);
        assert_eq!(err.at.col, 17);
    }

    #[test]
    fn test_bad_type_is_checked_first() {
        let err = decode(r#"{"platform": 5, "type": "library"}"#).unwrap_err();
        assert_eq!(err.problem(), Some(&Problem::BadType("library".to_string())));
        assert_eq!(err.path_string(), "type");

        let err = decode(r#"{"type": "application"}"#).unwrap_err();
        assert_eq!(err.reason, Reason::MissingField("gren-version".to_string()));

        let err = decode(r#"{"name": "someone/thing"}"#).unwrap_err();
        assert_eq!(err.reason, Reason::MissingField("type".to_string()));
    }

    #[test]
    fn test_exposed_list_wins_over_sections() {
        let src = package_with_summary("x").replace(r#"["Thing"]"#, "[]");
        let Outline::Pkg(pkg) = decode(&src).unwrap() else {
            panic!("expected a package");
        };
        assert_eq!(pkg.exposed, Exposed::List(Vec::new()));
    }

    #[test]
    fn test_exposed_neither_shape() {
        let src = package_with_summary("x").replace(r#"["Thing"]"#, r#"["thing"]"#);
        let err = decode(&src).unwrap_err();

        assert_eq!(err.path_string(), "exposed-modules");
        let Reason::OneOf(alternatives) = &err.reason else {
            panic!("expected OneOf, got {:?}", err.reason);
        };
        assert_eq!(alternatives[0].path_string(), "[0]");
        assert!(matches!(
            alternatives[0].problem(),
            Some(Problem::BadModuleName(_))
        ));
        assert_eq!(alternatives[1].reason, Reason::Expecting(Expected::Object));
    }

    #[test]
    fn test_section_header_too_long() {
        let header = "h".repeat(21);
        let src = package_with_summary("x").replace(
            r#"["Thing"]"#,
            &format!(r#"{{"{}": ["Thing"]}}"#, header),
        );
        let err = decode(&src).unwrap_err();
        let Reason::OneOf(alternatives) = &err.reason else {
            panic!("expected OneOf, got {:?}", err.reason);
        };
        assert_eq!(alternatives[1].problem(), Some(&Problem::SectionHeaderTooLong));
        assert_eq!(alternatives[1].at.offset, src.find(&header).unwrap());

        let ok = package_with_summary("x").replace(
            r#"["Thing"]"#,
            &format!(r#"{{"{}": ["Thing"]}}"#, "h".repeat(20)),
        );
        assert!(decode(&ok).is_ok());
    }

    #[test]
    fn test_bad_dependency_name() {
        let src = package_with_summary("x").replace(r#""core-pkg/core": "#, r#""Core": "#);
        let err = decode(&src).unwrap_err();

        assert!(matches!(
            err.problem(),
            Some(Problem::BadDependencyName { given, .. }) if given == "Core"
        ));
        assert_eq!(err.path_string(), "dependencies");
        assert_eq!(err.at.offset, src.find("Core").unwrap());
    }

    #[test]
    fn test_empty_source_directories() {
        let src = fixtures::APPLICATION.replace(r#"["src", "lib"]"#, "[]");
        let err = decode(&src).unwrap_err();
        assert_eq!(err.problem(), Some(&Problem::NoSourceDirs));
        assert_eq!(err.path_string(), "source-directories");
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_source_directory_is_classified() {
        let src = fixtures::APPLICATION.replace(r#""lib""#, r#""/opt/shared""#);
        let Outline::App(app) = decode(&src).unwrap() else {
            panic!("expected an application");
        };
        assert_eq!(
            app.source_dirs.iter().nth(1),
            Some(&SrcDir::Absolute(PathBuf::from("/opt/shared")))
        );
    }

    #[test]
    fn test_field_errors_carry_paths() {
        let src = fixtures::APPLICATION.replace(r#""6.0.0""#, r#""6.0""#);
        let err = decode(&src).unwrap_err();
        assert_eq!(err.path_string(), "dependencies.direct.core-pkg/core");
        assert!(matches!(err.problem(), Some(Problem::BadVersion(_))));

        let src = fixtures::APPLICATION.replace(r#""browser""#, r#""deno""#);
        let err = decode(&src).unwrap_err();
        assert_eq!(err.path_string(), "platform");
        assert!(matches!(err.problem(), Some(Problem::BadPlatform(_))));
    }

    #[test]
    fn test_repeated_dependency_keeps_first() {
        let src = package_with_summary("x").replace(
            r#"{ "core-pkg/core": "6.0.0 <= v < 7.0.0" }"#,
            r#"{ "core-pkg/core": "6.0.0 <= v < 7.0.0", "core-pkg/core": "1.0.0 <= v < 2.0.0" }"#,
        );
        let Outline::Pkg(pkg) = decode(&src).unwrap() else {
            panic!("expected a package");
        };
        assert_eq!(
            pkg.dependencies[&PackageName::core()].to_string(),
            "6.0.0 <= v < 7.0.0"
        );
    }

    #[test]
    fn test_syntax_error() {
        let err = decode("{\"type\": \"application\",\n}").unwrap_err();
        assert_eq!(err.reason, Reason::Syntax(SyntaxProblem::UnexpectedChar('}')));
        assert_eq!(err.at.row, 2);
    }
}
