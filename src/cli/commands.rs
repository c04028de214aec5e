//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use miette::{NamedSource, Report};
use serde_json::{Value, json};

use crate::ast::{CompilationUnit, MemberDecl, NamespaceMember, Span, TypeDecl, dump};
use crate::diagnostics::{self, Diagnostic};
use crate::lexer;
use crate::parser::{self, ParseError, ParseOptions, ParseOutput, Snippet};

use super::{CliError, CliResult, ExitCode, OutputFormat};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during parsing.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Settings for `check`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    pub snippet: bool,
    pub outline: bool,
    pub format: OutputFormat,
    pub jobs: Option<usize>,
}

impl CheckOptions {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_snippet_mode(self.snippet)
            .with_method_bodies(!self.outline)
    }
}

/// A parsed file together with everything needed to report on it.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub source: String,
    pub output: ParseOutput,
    /// Lexer and parser diagnostics merged in source order.
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// Reading and parsing
// ============================================================================

/// Read a source file with size validation.
///
/// ## Errors
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> CliResult<String> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_error)?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }
    fs::read_to_string(path).map_err(io_error)
}

/// Lex and parse source text, merging lexical and syntax diagnostics.
///
/// ## Errors
/// Only the fatal conditions of [`parser::parse`]; syntax errors come back as diagnostics.
pub fn parse_source(source: &str, options: &ParseOptions) -> Result<(ParseOutput, Vec<Diagnostic>), ParseError> {
    let lexed = if options.snippet_mode {
        lexer::lex_snippet(source)
    } else {
        lexer::lex(source)
    };
    let output = parser::parse(&lexed.tokens, options)?;
    let mut all = lexed.diagnostics;
    all.extend(output.diagnostics.iter().cloned());
    diagnostics::sort_in_source_order(&mut all);
    Ok((output, all))
}

/// Read and parse one file.
pub fn parse_file(path: &Path, options: &ParseOptions) -> CliResult<FileReport> {
    let source = read_source(path)?;
    let (output, diagnostics) = parse_source(&source, options).map_err(|e| CliError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(
        path = %path.display(),
        diagnostics = diagnostics.len(),
        skipped = output.stats.tokens_skipped,
        "parsed"
    );
    Ok(FileReport {
        path: path.to_path_buf(),
        source,
        output,
        diagnostics,
    })
}

/// Parse many files on scoped worker threads. Results keep the order of `files`.
pub fn parse_all(files: &[PathBuf], options: &ParseOptions, jobs: usize) -> Vec<CliResult<FileReport>> {
    if files.is_empty() {
        return Vec::new();
    }
    let jobs = jobs.clamp(1, files.len());
    let per_worker = files.len().div_ceil(jobs);
    tracing::debug!(files = files.len(), jobs, "parsing");

    thread::scope(|scope| {
        let workers: Vec<_> = files
            .chunks(per_worker)
            .map(|group| scope.spawn(move || group.iter().map(|path| parse_file(path, options)).collect::<Vec<_>>()))
            .collect();
        workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}

fn default_jobs() -> usize {
    thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

// ============================================================================
// Commands
// ============================================================================

/// Check files and report every syntax error.
///
/// Unreadable files are reported and skipped; the remaining files are still checked.
pub fn check_files(files: &[PathBuf], options: &CheckOptions) -> CliResult<ExitCode> {
    let parse_options = options.parse_options();
    let results = parse_all(files, &parse_options, options.jobs.unwrap_or_else(default_jobs));

    let mut reports = Vec::with_capacity(results.len());
    let mut unreadable = 0usize;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::warn!("{e}");
                unreadable += 1;
            }
        }
    }

    match options.format {
        OutputFormat::Text => {
            for report in &reports {
                print!("{}", render_report(report));
            }
        }
        OutputFormat::Json => {
            let files: Vec<Value> = reports.iter().map(report_json).collect();
            println!("{}", to_json(&json!({ "files": files }))?);
        }
    }

    let errors: usize = reports.iter().map(|r| r.diagnostics.len()).sum();
    Ok(if unreadable > 0 {
        ExitCode::FAILURE
    } else if errors > 0 {
        ExitCode::SYNTAX_ERRORS
    } else {
        ExitCode::SUCCESS
    })
}

/// Print the declaration outline of a file. Member bodies are skipped, not parsed.
pub fn outline_file(path: &Path, format: OutputFormat) -> CliResult<ExitCode> {
    let report = parse_file(path, &ParseOptions::outline())?;
    match format {
        OutputFormat::Text => {
            print!("{}", dump::outline(&report.output.unit));
            eprint!("{}", render_diagnostics(&report));
        }
        OutputFormat::Json => {
            let doc = json!({
                "path": report.path.display().to_string(),
                "members": outline_json(&report.output.unit),
                "diagnostics": report.diagnostics.iter().map(diagnostic_json).collect::<Vec<_>>(),
            });
            println!("{}", to_json(&doc)?);
        }
    }
    Ok(exit_code_for(&report))
}

/// Print the syntax tree of a file as S-expressions.
pub fn dump_file(path: &Path, snippet: bool) -> CliResult<ExitCode> {
    let options = ParseOptions::default().with_snippet_mode(snippet);
    let report = parse_file(path, &options)?;
    println!("{}", render_tree(&report.output));
    eprint!("{}", render_diagnostics(&report));
    Ok(exit_code_for(&report))
}

fn exit_code_for(report: &FileReport) -> ExitCode {
    if report.diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::SYNTAX_ERRORS
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// The tree printed by `dump`: the snippet when one was parsed, otherwise the whole unit.
pub fn render_tree(output: &ParseOutput) -> String {
    match &output.snippet {
        Some(Snippet::Statements(stmts)) => dump::statements(stmts),
        Some(Snippet::Expression(e)) => dump::expr(&e.node),
        None => dump::unit(&output.unit),
    }
}

/// A per-file summary line followed by every diagnostic with source context.
pub fn render_report(report: &FileReport) -> String {
    let path = report.path.display();
    match report.diagnostics.len() {
        0 => format!("✓ {path}: no syntax errors\n"),
        n => {
            let noun = if n == 1 { "error" } else { "errors" };
            format!("{}✗ {path}: {n} syntax {noun}\n", render_diagnostics(report))
        }
    }
}

/// Every diagnostic of a report, rendered by miette against the file's source.
pub fn render_diagnostics(report: &FileReport) -> String {
    let name = report.path.display().to_string();
    report
        .diagnostics
        .iter()
        .map(|d| {
            let report = Report::new(d.clone()).with_source_code(NamedSource::new(&name, report.source.clone()));
            format!("{report:?}\n")
        })
        .collect()
}

fn to_json(value: &Value) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
}

fn span_json(span: Span) -> Value {
    json!({
        "start": { "line": span.start.line, "column": span.start.column, "offset": span.start.offset },
        "end": { "line": span.end.line, "column": span.end.column, "offset": span.end.offset },
    })
}

pub fn diagnostic_json(d: &Diagnostic) -> Value {
    json!({
        "code": d.code.as_str(),
        "category": d.category.to_string(),
        "message": d.message,
        "line": d.line,
        "column": d.column,
        "span": span_json(d.span),
    })
}

fn report_json(report: &FileReport) -> Value {
    json!({
        "path": report.path.display().to_string(),
        "diagnostics": report.diagnostics.iter().map(diagnostic_json).collect::<Vec<_>>(),
        "stats": {
            "blocks_pushed": report.output.stats.blocks_pushed,
            "blocks_popped": report.output.stats.blocks_popped,
            "max_block_depth": report.output.stats.max_block_depth,
            "tokens_skipped": report.output.stats.tokens_skipped,
        },
    })
}

/// Namespaces, types and member headers as nested JSON objects.
pub fn outline_json(unit: &CompilationUnit) -> Vec<Value> {
    unit.members.iter().map(|m| namespace_member_json(&m.node, m.span)).collect()
}

fn namespace_member_json(member: &NamespaceMember, span: Span) -> Value {
    match member {
        NamespaceMember::Namespace(ns) => json!({
            "kind": "Namespace",
            "name": ns.name.to_string(),
            "span": span_json(span),
            "members": ns.members.iter().map(|m| namespace_member_json(&m.node, m.span)).collect::<Vec<_>>(),
        }),
        NamespaceMember::Type(t) => type_json(t, span),
    }
}

fn type_json(t: &TypeDecl, span: Span) -> Value {
    let members: Vec<Value> = t
        .members
        .iter()
        .map(|m| match &m.node {
            MemberDecl::Type(nested) => type_json(nested, m.span),
            other => {
                let (kind, name) = member_label(other);
                json!({ "kind": kind, "name": name, "span": span_json(m.span) })
            }
        })
        .collect();
    json!({
        "kind": format!("{:?}", t.kind),
        "name": t.name,
        "span": span_json(span),
        "members": members,
    })
}

fn member_label(member: &MemberDecl) -> (&'static str, String) {
    match member {
        MemberDecl::Method(m) if m.signature.is_function => ("Function", m.name.clone()),
        MemberDecl::Method(m) => ("Sub", m.name.clone()),
        MemberDecl::Constructor(_) => ("Constructor", "New".to_string()),
        MemberDecl::Property(p) => ("Property", p.name.clone()),
        MemberDecl::Field(f) => {
            let names: Vec<&str> = f
                .declarators
                .iter()
                .flat_map(|d| d.node.names.iter().map(|n| n.node.name.as_str()))
                .collect();
            ("Field", names.join(", "))
        }
        MemberDecl::Event(e) => ("Event", e.name.clone()),
        MemberDecl::Operator(o) => ("Operator", format!("{:?}", o.operator)),
        MemberDecl::Declare(d) => ("Declare", d.name.clone()),
        MemberDecl::EnumMember(e) => ("EnumMember", e.name.clone()),
        MemberDecl::Type(t) => ("Type", t.name.clone()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn report(path: &str, source: &str, options: &ParseOptions) -> FileReport {
        let (output, diagnostics) = parse_source(source, options).unwrap();
        FileReport {
            path: PathBuf::from(path),
            source: source.to_string(),
            output,
            diagnostics,
        }
    }

    #[test]
    fn test_clean_file_summary() {
        let r = report("ok.vb", "Module M\nEnd Module\n", &ParseOptions::default());
        assert_eq!(render_report(&r), "✓ ok.vb: no syntax errors\n");
        assert_eq!(exit_code_for(&r), ExitCode::SUCCESS);
    }

    #[test]
    fn test_error_report_names_code_and_count() {
        let r = report("bad.vb", "Class A\n", &ParseOptions::default());
        let text = render_report(&r);
        assert!(text.contains("VBS"), "{text}");
        assert!(text.ends_with("✗ bad.vb: 1 syntax error\n"), "{text}");
        assert_eq!(exit_code_for(&r), ExitCode::SYNTAX_ERRORS);
    }

    #[test]
    fn test_lexer_and_parser_diagnostics_are_merged_in_order() {
        let (_, diagnostics) = parse_source("x = \"open\ny = )\n", &ParseOptions::snippet()).unwrap();
        let lines: Vec<u32> = diagnostics.iter().map(|d| d.line).collect();
        assert!(lines.len() >= 2, "{diagnostics:?}");
        assert!(lines.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_render_tree_prefers_the_snippet() {
        let (output, _) = parse_source("1 + 2 * 3", &ParseOptions::snippet()).unwrap();
        assert_eq!(render_tree(&output), "(Add 1 (Multiply 2 3))");
    }

    #[test]
    fn test_outline_json_nests_types() {
        let source = "Namespace N\nClass A\nSub M()\nEnd Sub\nEnd Class\nEnd Namespace\n";
        let (output, _) = parse_source(source, &ParseOptions::outline()).unwrap();
        let members = outline_json(&output.unit);
        assert_eq!(members[0]["kind"], "Namespace");
        assert_eq!(members[0]["members"][0]["name"], "A");
        assert_eq!(members[0]["members"][0]["members"][0]["kind"], "Sub");
    }

    #[test]
    fn test_diagnostic_json_fields() {
        let (_, diagnostics) = parse_source("Class A", &ParseOptions::default()).unwrap();
        let value = diagnostic_json(&diagnostics[0]);
        assert_eq!(value["code"], diagnostics[0].code.as_str());
        assert_eq!(value["line"], 1);
        assert_eq!(value["category"], diagnostics[0].category.to_string());
    }

    #[test]
    fn test_parse_all_keeps_input_order_and_reports_missing_files() {
        let missing = PathBuf::from("definitely/not/here.vb");
        let results = parse_all(&[missing.clone(), missing], &ParseOptions::default(), 4);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(r, Err(CliError::Io { .. }))));
    }
}
