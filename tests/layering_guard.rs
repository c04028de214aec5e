//! Layering guardrails for the workspace.
//!
//! `vbsyn_core` is the vocabulary registry every other crate builds on, so it must stay free of
//! dependencies. `vbsyn_syntax` is a library and must not pull in the CLI stack.

/// Entries of the `[dependencies]` table of a manifest, by crate name.
fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = dependencies(include_str!("../crates/vbsyn_core/Cargo.toml"));
    assert!(deps.is_empty(), "`vbsyn_core` must not have dependencies, found {deps:?}");
}

#[test]
fn syntax_crate_does_not_depend_on_cli_stack() {
    let deps = dependencies(include_str!("../crates/vbsyn_syntax/Cargo.toml"));
    for forbidden in ["clap", "tracing-subscriber", "serde_json", "vbsyn"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in vbsyn_syntax [dependencies]"
        );
    }
    assert!(deps.iter().any(|d| d == "vbsyn_core"));
}
