use std::fmt::{Display, Write as _};

use anyhow::bail;
use colored::Colorize;
use tracing::debug;

use relist_diff::{
    diff_indexed, diff_sectioned, replay_indexed, replay_sectioned, validate_identities,
    validate_sections, IndexedDiff, SectionedDiff, Side,
};
use relist_types::{Diffable, SectionDiffable};

use crate::cli::*;
use crate::config::{CliConfig, OutputFormat};
use crate::snapshot::{load_flat, load_sectioned};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let base = CliConfig::resolve(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => {
            let config = settings(base, &args.keys, cli.format);
            cmd_diff(args, &config)
        }
        Command::Check(args) => {
            let config = settings(base, &args.keys, cli.format);
            cmd_check(args, &config)
        }
    }
}

fn settings(base: CliConfig, keys: &KeyArgs, format: Option<OutputFormat>) -> CliConfig {
    base.with_overrides(keys.id_key.clone(), keys.items_key.clone(), format)
}

fn cmd_diff(args: DiffArgs, config: &CliConfig) -> anyhow::Result<()> {
    debug!(from = %args.from.display(), to = %args.to.display(), sectioned = args.keys.sectioned, "diffing snapshots");

    if args.keys.sectioned {
        let from = load_sectioned(&args.from, &config.id_key, &config.items_key)?;
        let to = load_sectioned(&args.to, &config.id_key, &config.items_key)?;
        let diff = diff_sectioned(&from, &to)?;

        match config.format {
            OutputFormat::Text => print!("{}", render_sectioned(&diff)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        }
        if args.verify {
            let layout = replay_sectioned(&from, &to, &diff)?;
            let expected: Vec<_> = to
                .iter()
                .map(|s| (s.diff_id(), s.section_items().iter().map(Diffable::diff_id).collect::<Vec<_>>()))
                .collect();
            if layout != expected {
                bail!("replayed layout does not match {}", args.to.display());
            }
            report_verified(config.format);
        }
    } else {
        let from = load_flat(&args.from, &config.id_key)?;
        let to = load_flat(&args.to, &config.id_key)?;
        let diff = diff_indexed(&from, &to)?;

        match config.format {
            OutputFormat::Text => print!("{}", render_indexed(&diff)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        }
        if args.verify {
            let replayed = replay_indexed(&from, &to, &diff)?;
            let expected: Vec<_> = to.iter().map(Diffable::diff_id).collect();
            if replayed != expected {
                bail!("replayed order does not match {}", args.to.display());
            }
            report_verified(config.format);
        }
    }
    Ok(())
}

fn report_verified(format: OutputFormat) {
    // Keep stdout parseable in JSON mode.
    match format {
        OutputFormat::Text => println!("{} replay reproduces target", "✓".green().bold()),
        OutputFormat::Json => eprintln!("replay reproduces target"),
    }
}

fn cmd_check(args: CheckArgs, config: &CliConfig) -> anyhow::Result<()> {
    if args.keys.sectioned {
        let sections = load_sectioned(&args.file, &config.id_key, &config.items_key)?;
        validate_sections(&sections, Side::From)?;
        let rows: usize = sections.iter().map(|s| s.section_items().len()).sum();
        println!(
            "{} {} sections, {} rows, identities unique",
            "✓".green().bold(),
            sections.len(),
            rows
        );
    } else {
        let items = load_flat(&args.file, &config.id_key)?;
        validate_identities(&items, Side::From)?;
        println!("{} {} items, identities unique", "✓".green().bold(), items.len());
    }
    Ok(())
}

fn joined<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let parts: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    if parts.is_empty() {
        "-".dimmed().to_string()
    } else {
        parts.join(", ")
    }
}

fn render_indexed(diff: &IndexedDiff) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:<8} {}", "deletes".red(), joined(&diff.deletes));
    let _ = writeln!(out, "  {:<8} {}", "inserts".green(), joined(&diff.inserts));
    let _ = writeln!(out, "  {:<8} {}", "moves".yellow(), joined(&diff.moves));
    let _ = writeln!(out, "  {:<8} {}", "reloads".cyan(), joined(&diff.reloads));
    let _ = writeln!(
        out,
        "{} structural changes, {} reloads",
        diff.changed_count().to_string().bold(),
        diff.reloads.len()
    );
    out
}

fn render_sectioned(diff: &SectionedDiff) -> String {
    let rows = &diff.rows;
    let mut out = String::new();
    let _ = writeln!(out, "{}", "sections".bold());
    out.push_str(&render_indexed(&diff.sections));
    let _ = writeln!(out, "{}", "rows".bold());
    let _ = writeln!(out, "  {:<8} {}", "deletes".red(), joined(&rows.deletes));
    let _ = writeln!(out, "  {:<8} {}", "inserts".green(), joined(&rows.inserts));
    let _ = writeln!(out, "  {:<8} {}", "moves".yellow(), joined(&rows.moves));
    let _ = writeln!(out, "  {:<8} {}", "reloads".cyan(), joined(&rows.reloads));
    let _ = writeln!(
        out,
        "{} structural changes, {} reloads",
        rows.changed_count().to_string().bold(),
        rows.reloads.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use relist_types::{IndexMove, IndexPath, RowMove};
    use serde_json::json;
    use std::io::Write;

    fn write_json(value: serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn renders_flat_diff() {
        plain();
        let mut diff = IndexedDiff::new();
        diff.deletes.extend([0, 2]);
        diff.moves.insert(IndexMove::new(3, 0));
        let text = render_indexed(&diff);
        assert!(text.contains("deletes  0, 2"));
        assert!(text.contains("moves    3 -> 0"));
        assert!(text.contains("inserts  -"));
        assert!(text.contains("3 structural changes, 0 reloads"));
    }

    #[test]
    fn renders_sectioned_rows() {
        plain();
        let mut diff = SectionedDiff::default();
        diff.rows.deletes.push(IndexPath::new(1, 0));
        diff.rows
            .moves
            .insert(RowMove::new(IndexPath::new(0, 1), IndexPath::new(1, 2)));
        let text = render_sectioned(&diff);
        assert!(text.contains("deletes  1:0"));
        assert!(text.contains("moves    0:1 -> 1:2"));
    }

    #[test]
    fn diff_command_verifies_flat_snapshots() {
        let from = write_json(json!([{"id": 1, "v": "a"}, {"id": 2}, {"id": 3}]));
        let to = write_json(json!([{"id": 3}, {"id": 1, "v": "b"}, {"id": 4}]));
        let args = DiffArgs {
            from: from.path().to_path_buf(),
            to: to.path().to_path_buf(),
            keys: KeyArgs { sectioned: false, id_key: None, items_key: None },
            verify: true,
        };
        cmd_diff(args, &CliConfig::default()).unwrap();
    }

    #[test]
    fn diff_command_verifies_sectioned_snapshots() {
        let from = write_json(json!([
            {"id": "A", "items": [1, 2, 3]},
            {"id": "B", "items": [4]}
        ]));
        let to = write_json(json!([
            {"id": "B", "items": [4, 5]},
            {"id": "A", "items": [3, 1]}
        ]));
        let args = DiffArgs {
            from: from.path().to_path_buf(),
            to: to.path().to_path_buf(),
            keys: KeyArgs { sectioned: true, id_key: None, items_key: None },
            verify: true,
        };
        let config = CliConfig { format: OutputFormat::Json, ..CliConfig::default() };
        cmd_diff(args, &config).unwrap();
    }

    #[test]
    fn diff_command_reports_duplicates() {
        let from = write_json(json!([1, 2, 1]));
        let to = write_json(json!([1]));
        let args = DiffArgs {
            from: from.path().to_path_buf(),
            to: to.path().to_path_buf(),
            keys: KeyArgs { sectioned: false, id_key: None, items_key: None },
            verify: false,
        };
        let err = cmd_diff(args, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("duplicate identity 1"));
    }

    #[test]
    fn check_command_names_section_with_duplicate_rows() {
        let file = write_json(json!([
            {"id": "A", "items": [1]},
            {"id": "B", "items": [2, 2]}
        ]));
        let args = CheckArgs {
            file: file.path().to_path_buf(),
            keys: KeyArgs { sectioned: true, id_key: None, items_key: None },
        };
        let err = cmd_check(args, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("rows of section 1 in `from` snapshot"));
    }

    #[test]
    fn check_command_accepts_unique_items() {
        let file = write_json(json!([{"id": "a"}, {"id": "b"}]));
        let args = CheckArgs {
            file: file.path().to_path_buf(),
            keys: KeyArgs { sectioned: false, id_key: None, items_key: None },
        };
        cmd_check(args, &CliConfig::default()).unwrap();
    }
}
