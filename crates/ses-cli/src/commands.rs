use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use ses_diff::{diff_bytes_with, diff_lines_with, DiffConfig, DiffError, EditScript, Op, Rendered};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    let config = match &cli.config {
        Some(path) => DiffConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DiffConfig::default(),
    };
    tracing::debug!(?config, "resolved config");
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Bytes(args) => cmd_bytes(args, config, &cli.format, &mut out),
        Command::Lines(args) => cmd_lines(args, config, &cli.format, &mut out),
    }
}

fn cmd_bytes(
    args: BytesArgs,
    mut config: DiffConfig,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if args.budget.is_some() {
        config.budget = args.budget;
    }
    let old = read(&args.old)?;
    let new = read(&args.new)?;
    let diff = diff_bytes_with(&old, &new, &config);
    report(diff.script(), &diff.rendered(), format, out)?;
    finish(diff.script())
}

fn cmd_lines(
    args: LinesArgs,
    mut config: DiffConfig,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if args.budget.is_some() {
        config.budget = args.budget;
        config.vocabulary_budget = false;
    }
    if args.vocabulary_budget {
        config.budget = None;
        config.vocabulary_budget = true;
    }
    if args.skip_whitespace {
        config = config.skipping_whitespace();
    }

    let old = read_text(&args.old)?;
    let new = read_text(&args.new)?;
    let diff = diff_lines_with(&old, &new, &config);
    report(diff.script(), &diff.rendered(), format, out)?;
    finish(diff.script())
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn report<P: Clone + Serialize>(
    script: &EditScript<P>,
    rendered: &[Rendered],
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "identical": script.is_identical(),
                "truncated": script.is_truncated(),
                "distance": script.distance(),
                "edits": script.diffs(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
        OutputFormat::Text => {
            if script.is_identical() {
                writeln!(out, "{}", "No differences.".green())?;
            }
            for entry in rendered {
                let header = match entry.op {
                    Op::Insert => entry.header.green().bold(),
                    Op::Delete => entry.header.red().bold(),
                    Op::Match => entry.header.normal(),
                };
                writeln!(out, "{header}")?;
                writeln!(out, "{}", entry.body)?;
            }
        }
    }
    Ok(())
}

fn finish<P>(script: &EditScript<P>) -> anyhow::Result<()> {
    if script.is_truncated() {
        return Err(DiffError::BudgetExceeded {
            budget: script.budget(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn write_pair(dir: &tempfile::TempDir, old: &str, new: &str) -> (PathBuf, PathBuf) {
        let (a, b) = (dir.path().join("old"), dir.path().join("new"));
        fs::write(&a, old).unwrap();
        fs::write(&b, new).unwrap();
        (a, b)
    }

    fn run_lines(args: LinesArgs, config: DiffConfig, format: OutputFormat) -> (anyhow::Result<()>, String) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let res = cmd_lines(args, config, &format, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn lines_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let (old, new) = write_pair(&dir, "a\nb\nc\n", "a\nx\nc\n");
        let args = LinesArgs { old, new, skip_whitespace: false, budget: None, vocabulary_budget: false };
        let (res, out) = run_lines(args, DiffConfig::default(), OutputFormat::Text);
        res.unwrap();
        assert_eq!(out, "< Line 2 Delete 1 lines\nb\n> Line 2 Insert 1 lines\nx\n");
    }

    #[test]
    fn lines_identical_with_whitespace_flag() {
        let dir = tempfile::tempdir().unwrap();
        let (old, new) = write_pair(&dir, "a  b\n", "a b\n");
        let args = LinesArgs { old, new, skip_whitespace: true, budget: None, vocabulary_budget: false };
        let (res, out) = run_lines(args, DiffConfig::default(), OutputFormat::Text);
        res.unwrap();
        assert_eq!(out, "No differences.\n");
    }

    #[test]
    fn lines_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let (old, new) = write_pair(&dir, "a\n", "a\nb\n");
        let args = LinesArgs { old, new, skip_whitespace: false, budget: None, vocabulary_budget: false };
        let (res, out) = run_lines(args, DiffConfig::default(), OutputFormat::Json);
        res.unwrap();
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["truncated"], false);
        assert_eq!(doc["distance"], 1);
        assert_eq!(doc["edits"][0]["op"], "insert");
        assert_eq!(doc["edits"][0]["payload"][0], "b");
    }

    #[test]
    fn truncated_lines_fail_after_report() {
        let dir = tempfile::tempdir().unwrap();
        let (old, new) = write_pair(&dir, "a\na\na", "b\nb\nb");
        let args = LinesArgs { old, new, skip_whitespace: false, budget: None, vocabulary_budget: true };
        let (res, _) = run_lines(args, DiffConfig::default(), OutputFormat::Text);
        let err = res.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiffError>(),
            Some(DiffError::BudgetExceeded { .. })
        ));
    }

    #[test]
    fn vocabulary_flag_overrides_config_budget() {
        let dir = tempfile::tempdir().unwrap();
        let (old, new) = write_pair(&dir, "a\na\na", "b\nb\nb");
        let args = LinesArgs { old, new, skip_whitespace: false, budget: None, vocabulary_budget: true };
        let (res, _) = run_lines(args, DiffConfig::default().with_budget(100), OutputFormat::Text);
        assert!(res.is_err());
    }

    #[test]
    fn conflicting_budgets_in_config_file_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (old, new) = write_pair(&dir, "a\n", "b\n");
        let config = dir.path().join("ses.toml");
        fs::write(&config, "budget = 5\nvocabulary_budget = true\n").unwrap();
        let argv: Vec<OsString> = vec![
            "ses".into(),
            "--config".into(),
            config.into(),
            "lines".into(),
            old.into(),
            new.into(),
        ];
        let cli = Cli::try_parse_from(argv).unwrap();
        let err = run_command(cli).unwrap_err();
        assert!(format!("{err:#}").contains("cannot both be set"));
    }

    #[test]
    fn budget_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let (old, new) = write_pair(&dir, "abc", "abd");
        let args = BytesArgs { old, new, budget: Some(100) };
        let config = DiffConfig::default().with_budget(1);
        let mut out = Vec::new();
        cmd_bytes(args, config, &OutputFormat::Text, &mut out).unwrap();
    }

    #[test]
    fn bytes_budget_from_config_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let (old, new) = write_pair(&dir, "abc", "abd");
        let args = BytesArgs { old, new, budget: None };
        let config = DiffConfig::default().with_budget(1);
        let mut out = Vec::new();
        assert!(cmd_bytes(args, config, &OutputFormat::Text, &mut out).is_err());
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let args = BytesArgs {
            old: dir.path().join("nope"),
            new: dir.path().join("nope2"),
            budget: None,
        };
        let mut out = Vec::new();
        let err = cmd_bytes(args, DiffConfig::default(), &OutputFormat::Text, &mut out).unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
