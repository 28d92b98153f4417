//! residue-select: resolve a residue-selection expression from the command line

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use residue_select::{ResidueSelection, ResolverConfig};
use residue_select_document::{DocumentConfig, SelectorDocument};

// ============ CLI ============

#[derive(Parser, Debug)]
#[command(name = "residue-select")]
#[command(version)]
#[command(about = "Resolve a residue-selection expression into named selectors", long_about = None)]
struct Cli {
    /// Selection expression, e.g. "chain A and not resi 10-20"
    selection: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Records)]
    format: OutputFormat,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Do not retry with spaced terms ("not chain A", "resi 1 - 9")
    #[arg(long)]
    no_fallback: bool,

    /// Reject selections with more than N predicates
    #[arg(long, value_name = "N")]
    max_predicates: Option<usize>,

    /// Reject selections nested deeper than N parentheses
    #[arg(long, value_name = "N", default_value_t = residue_select::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Name of the generated MoveMapFactory (xml format)
    #[arg(long, value_name = "NAME", default_value = residue_select_document::DEFAULT_FACTORY_NAME)]
    factory_name: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One (kind, name, values, invert) tuple per line
    Records,
    /// JSON array of records
    Json,
    /// Residue selector and move map factory XML
    Xml,
}

// ============ Rendering ============

impl Cli {
    fn resolver_config(&self) -> ResolverConfig {
        let mut builder = ResolverConfig::builder()
            .with_spaced_fallback(!self.no_fallback)
            .with_max_depth(self.max_depth);
        if let Some(limit) = self.max_predicates {
            builder = builder.with_max_predicates(limit);
        }
        builder.build()
    }

    fn document_config(&self) -> DocumentConfig {
        DocumentConfig::builder()
            .with_resolver(self.resolver_config())
            .with_factory_name(self.factory_name.clone())
            .build()
    }
}

fn render(cli: &Cli) -> Result<String> {
    let config = cli.document_config();
    let selection = ResidueSelection::with_config(&cli.selection, &config.resolver)
        .with_context(|| format!("failed to resolve selection '{}'", cli.selection))?;
    log::debug!("resolved {} records", selection.records().len());

    let text = match cli.format {
        OutputFormat::Records => selection.to_string(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(selection.records())
                .context("failed to serialize records")?;
            json.push('\n');
            json
        }
        OutputFormat::Xml => SelectorDocument::from_records(selection.records(), &config)
            .context("failed to build selector document")?
            .render(),
    };
    Ok(text)
}

fn run(cli: &Cli) -> Result<()> {
    let text = render(cli)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["residue-select"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    mod arguments {
        use super::*;

        #[test]
        fn test_defaults() {
            let cli = cli(&["chain A"]);
            assert_eq!(cli.format, OutputFormat::Records);
            assert!(cli.output.is_none());
            assert!(!cli.no_fallback);
            assert_eq!(cli.factory_name, "fr_mm_factory");
            assert_eq!(cli.resolver_config(), ResolverConfig::default());
        }

        #[test]
        fn test_resolver_flags() {
            let cli = cli(&[
                "--no-fallback",
                "--max-predicates",
                "3",
                "--max-depth",
                "8",
                "chain A",
            ]);
            let config = cli.resolver_config();
            assert!(!config.spaced_fallback);
            assert_eq!(config.max_predicates, Some(3));
            assert_eq!(config.max_depth, 8);
        }

        #[test]
        fn test_selection_is_required() {
            assert!(Cli::try_parse_from(["residue-select"]).is_err());
        }

        #[test]
        fn test_unknown_format_rejected() {
            assert!(Cli::try_parse_from(["residue-select", "--format", "yaml", "chain A"]).is_err());
        }
    }

    mod formats {
        use super::*;

        #[test]
        fn test_records() {
            let text = render(&cli(&["chain A or not resn GLY"])).unwrap();
            assert_eq!(
                text,
                "(Chain, 000, \"A\", false)\n(ResidueName, 020, \"GLY\", true)\n(Or, 00, \"000,020\", false)\n"
            );
        }

        #[test]
        fn test_json() {
            let text = render(&cli(&["--format", "json", "resi 10 - 20"])).unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(
                value,
                serde_json::json!([
                    { "kind": "Index", "name": "00", "values": "10-20", "invert": false }
                ])
            );
        }

        #[test]
        fn test_xml() {
            let text = render(&cli(&["-f", "xml", "--factory-name", "mm", "not chain B"])).unwrap();
            assert!(text.contains("<Not name=\"00\">"));
            assert!(text.contains("<Chain chains=\"B\"/>"));
            assert!(text.contains("<MoveMapFactory name=\"mm\" bb=\"0\" chi=\"0\" jumps=\"0\">"));
        }

        #[test]
        fn test_resolve_error_has_context() {
            let err = render(&cli(&["foo bar"])).unwrap_err();
            assert!(err.to_string().contains("failed to resolve selection 'foo bar'"));
        }

        #[test]
        fn test_deep_nesting_is_reported() {
            let deep = format!("{}chain A{}", "(".repeat(1000), ")".repeat(1000));
            let err = render(&cli(&[deep.as_str()])).unwrap_err();
            assert!(err.to_string().starts_with("failed to resolve selection"));
        }

        #[test]
        fn test_no_fallback_rejects_spaced_terms() {
            assert!(render(&cli(&["--no-fallback", "not chain A"])).is_err());
        }
    }

    mod output {
        use super::*;

        #[test]
        fn test_writes_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("selectors.xml");
            let cli = cli(&["-f", "xml", "-o", path.to_str().unwrap(), "chain A"]);
            run(&cli).unwrap();
            let written = fs::read_to_string(&path).unwrap();
            assert!(written.starts_with("<RESIDUE_SELECTORS>\n"));
            assert!(written.ends_with("</MOVE_MAP_FACTORIES>\n"));
        }

        #[test]
        fn test_failure_writes_nothing() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("records.txt");
            let cli = cli(&["-o", path.to_str().unwrap(), "chain A and"]);
            assert!(run(&cli).is_err());
            assert!(!path.exists());
        }
    }
}
