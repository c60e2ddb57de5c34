//! Sample outlines for tests.

/// An application with two source directories.
pub const APPLICATION: &str = r#"{
    "type": "application",
    "platform": "browser",
    "source-directories": ["src", "lib"],
    "gren-version": "0.5.0",
    "dependencies": {
        "direct": {
            "core-pkg/core": "6.0.0",
            "gren-lang/browser": "4.1.0"
        },
        "indirect": {
            "gren-lang/url": "3.0.2"
        }
    }
}
"#;

/// A package exposing its modules in sections.
pub const PACKAGE: &str = r#"{
    "type": "package",
    "platform": "common",
    "name": "someone/parser",
    "summary": "Parse text into structured data",
    "license": "BSD-3-Clause",
    "version": "2.1.0",
    "exposed-modules": {
        "Parsing": ["Parser", "Parser.Advanced"],
        "Errors": ["Parser.Error"]
    },
    "gren-version": "0.5.0 <= v < 0.6.0",
    "dependencies": {
        "core-pkg/core": "6.0.0 <= v < 7.0.0"
    }
}
"#;

/// The core package, which depends on nothing.
pub const CORE_PACKAGE: &str = r#"{
    "type": "package",
    "platform": "common",
    "name": "core-pkg/core",
    "summary": "Core types and functions",
    "license": "BSD-3-Clause",
    "version": "6.0.0",
    "exposed-modules": ["Basics", "Array", "String"],
    "gren-version": "0.5.0 <= v < 0.6.0",
    "dependencies": {}
}
"#;

/// A package that forgot to depend on core.
pub const PACKAGE_WITHOUT_CORE: &str = r#"{
    "type": "package",
    "platform": "node",
    "name": "someone/stream",
    "summary": "Streams",
    "license": "MIT",
    "version": "1.0.0",
    "exposed-modules": ["Stream"],
    "gren-version": "0.5.0 <= v < 0.6.0",
    "dependencies": {}
}
"#;
