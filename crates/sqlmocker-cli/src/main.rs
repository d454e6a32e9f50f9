use clap::{Parser, Subcommand};
use colored::Colorize;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;

use sqlmocker_core::{FixtureLocation, MockerOptions, ModelDefinition, TabularSnapshot};
use sqlmocker_engine::{Comparison, Condition, Mocker, SnapshotComparator};
use sqlmocker_fixture::{FixtureLoader, StubStore};
use sqlmocker_sql::{synthesize_create_table, synthesize_select, BulkWriter};

/// sqlmocker - SQL synthesis and fixture-driven test databases
#[derive(Parser)]
#[command(name = "sqlmocker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: sqlmocker.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print CREATE, INSERT and SELECT statements for a model file
    Sql {
        /// Model definition (TOML)
        model: PathBuf,

        /// Rows to insert, as a JSON array of arrays in field order
        #[arg(short, long)]
        rows: Option<PathBuf>,
    },

    /// Validate fixture files and count the expectations they register
    Check {
        /// Fixture file or directory to scan for *.json
        path: PathBuf,
    },

    /// Compare two captured snapshots
    Diff {
        /// Snapshot before the change (JSON)
        before: PathBuf,

        /// Snapshot after the change (JSON)
        after: PathBuf,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the configured fixtures and show the mocker setup
    Status,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // .env may provide SQLMOCKER_DB_PASSWORD
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Sql { model, rows } => sql_command(&model, rows.as_deref(), cli.verbose)?,
        Commands::Check { path } => check_command(&path, cli.verbose)?,
        Commands::Diff { before, after, json } => diff_command(&before, &after, json)?,
        Commands::Status => status_command(cli.config.as_deref(), cli.verbose)?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Sql command - synthesize statements for a declared model
fn sql_command(model_path: &Path, rows_path: Option<&Path>, verbose: bool) -> Result<bool> {
    let model = ModelDefinition::from_file(model_path)?;
    let descriptor = model.descriptor();

    if verbose {
        eprintln!(
            "{} {} ({} fields, naming: {})",
            "Model:".cyan(),
            model.table,
            descriptor.len(),
            model.naming
        );
    }

    let create = synthesize_create_table(&model.table, &descriptor, model.naming)
        .with_context(|| format!("Cannot synthesize CREATE TABLE for '{}'", model.table))?;
    println!("{}", create);

    if let Some(rows_path) = rows_path {
        let json = std::fs::read_to_string(rows_path)
            .with_context(|| format!("Cannot read rows from {}", rows_path.display()))?;
        let rows = model.rows_from_json(&json)?;
        if verbose {
            eprintln!("{} {} rows", "Inserting".cyan(), rows.len());
        }
        println!("{}", BulkWriter::synthesize_rows(&model.table, &descriptor, &rows, model.naming));
    }

    println!("{}", synthesize_select(&model.table, &descriptor, model.naming));
    Ok(true)
}

/// Check command - load every fixture file into a fresh stub
fn check_command(path: &Path, verbose: bool) -> Result<bool> {
    let files = collect_fixture_files(path);
    if files.is_empty() {
        return Err(anyhow::anyhow!("No fixture files found under {}", path.display()));
    }

    let mut failures = 0;
    let mut total = 0;

    for file in &files {
        let loader = FixtureLoader::new(FixtureLocation::new(
            file.parent().unwrap_or_else(|| Path::new(".")),
        ));
        let name = file.file_name().map(PathBuf::from).unwrap_or_else(|| file.clone());
        let mut stub = StubStore::new();
        tracing::debug!(file = %file.display(), "checking fixture file");

        match loader.load_and_register(&name, &mut stub) {
            Ok(count) => {
                total += count;
                println!("  {} {} ({} expectations)", "✓".green(), file.display(), count);
            }
            Err(e) => {
                failures += 1;
                println!("  {} {}: {}", "✗".red(), file.display(), e);
            }
        }
    }

    if verbose {
        eprintln!("{} {} files, {} expectations", "Checked".cyan(), files.len(), total);
    }

    if failures == 0 {
        println!("{}", "✓ All fixture files are valid".green().bold());
        Ok(true)
    } else {
        println!("{}", format!("✗ {} of {} fixture files failed", failures, files.len()).red().bold());
        Ok(false)
    }
}

/// JSON files below `path`, in sorted order; `path` itself if it is a file
fn collect_fixture_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// Diff command - compare two snapshot files
fn diff_command(before_path: &Path, after_path: &Path, json: bool) -> Result<bool> {
    let before = read_snapshot(before_path)?;
    let after = read_snapshot(after_path)?;
    let comparison = SnapshotComparator::compare(&before, &after);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print_comparison(&comparison, &before, &after);
    }

    Ok(comparison.same)
}

fn read_snapshot(path: &Path) -> Result<TabularSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid snapshot {}", path.display()))
}

fn print_comparison(comparison: &Comparison, before: &TabularSnapshot, after: &TabularSnapshot) {
    println!("{} {}", "before:".dimmed(), before.fingerprint());
    println!("{} {}", "after: ".dimmed(), after.fingerprint());

    match comparison.condition {
        Condition::Equal => {
            println!("{}", "✓ Snapshots are identical".green().bold());
        }
        Condition::LengthMismatch => {
            println!("{}", "✗ Snapshots differ in shape".red().bold());
        }
        Condition::ValueMismatch => {
            println!(
                "{}",
                format!("✗ {} cells differ", comparison.differences.len()).red().bold()
            );
        }
    }

    for difference in &comparison.differences {
        println!("  {}", difference);
    }
}

/// Status command - show mode and load fixtures through the mocker
fn status_command(config_path: Option<&Path>, verbose: bool) -> Result<bool> {
    let options = load_options(config_path, verbose)?;

    if options.use_db {
        // Connecting is up to the embedding test suite
        println!("{} genuine ({})", "Mode:".cyan(), options.db.data_source.driver);
        println!("{} {}", "DSN:".cyan(), redact(&options.db.data_source.dsn()));
        println!(
            "{} {}",
            "Reset:".cyan(),
            if options.db.truncate_table { "truncate" } else { "drop" }
        );
        return Ok(true);
    }

    let location = options.mock.location.clone();
    let mocker = Mocker::new(options)?;
    let expectations = mocker.stub().map(StubStore::expectation_count).unwrap_or(0);

    println!("{} stub", "Mode:".cyan());
    println!("{} {}", "Fixtures:".cyan(), location.resolve("").display());
    for file in &mocker.options().mock.files {
        println!("  - {}", file);
    }
    println!("{} {}", "Expectations:".cyan(), expectations);
    Ok(true)
}

fn load_options(config_path: Option<&Path>, verbose: bool) -> Result<MockerOptions> {
    let default_path = Path::new("sqlmocker.toml");
    let options = if let Some(path) = config_path {
        MockerOptions::from_file(path)?
    } else if default_path.exists() {
        MockerOptions::from_file(default_path)?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        MockerOptions::default()
    };
    Ok(options)
}

/// Hide the password part of a DSN
fn redact(dsn: &str) -> String {
    match (dsn.find(':'), dsn.rfind('@')) {
        (Some(colon), Some(at)) if colon < at => format!("{}:****{}", &dsn[..colon], &dsn[at..]),
        _ => dsn.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_redact_password() {
        assert_eq!(
            redact("root:12345@tcp(127.0.0.1:3306)/mock"),
            "root:****@tcp(127.0.0.1:3306)/mock"
        );
        assert_eq!(redact("no-credentials"), "no-credentials");
    }

    #[test]
    fn test_collect_fixture_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.json"), "[]").unwrap();
        std::fs::write(dir.path().join("nested/a.json"), "[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_fixture_files(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["b.json".to_string(), "nested/a.json".to_string()]);
    }

    #[test]
    fn test_check_reports_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("good.json"),
            r#"[{"matchPattern": "SELECT 1", "returnRows": [{"columns": ["n"], "rows": [[7]]}]}]"#,
        )
        .unwrap();
        assert!(check_command(dir.path(), false).unwrap());

        std::fs::write(dir.path().join("bad.json"), "{").unwrap();
        assert!(!check_command(dir.path(), false).unwrap());
    }

    #[test]
    fn test_sql_command_with_rows() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("hotel.toml");
        std::fs::write(
            &model,
            r#"
table = "hotel"
naming = "snake"

[[fields]]
name = "ID"
type = "integer"

[[fields]]
name = "PricePerNight"
type = "decimal"
"#,
        )
        .unwrap();
        let rows = dir.path().join("rows.json");
        std::fs::write(&rows, "[[1, 150.0]]").unwrap();

        assert!(sql_command(&model, Some(&rows), false).unwrap());
        assert!(sql_command(&dir.path().join("missing.toml"), None, false).is_err());
    }

    #[test]
    fn test_diff_command_reports_difference() {
        let dir = tempfile::tempdir().unwrap();
        let before = dir.path().join("before.json");
        let same = dir.path().join("same.json");
        let changed = dir.path().join("changed.json");
        std::fs::write(&before, r#"[["1", "Grand Hotel", "4.50"], ["2", "Luxury Inn", "4.20"]]"#).unwrap();
        std::fs::write(&same, r#"[["1", "Grand Hotel", "4.50"], ["2", "Luxury Inn", "4.20"]]"#).unwrap();
        std::fs::write(&changed, r#"[["1", "Grand Hotel", "4.50"], ["2", "Luxury Inn", "3.90"]]"#).unwrap();

        assert!(diff_command(&before, &same, false).unwrap());
        assert!(!diff_command(&before, &changed, false).unwrap());
        assert!(!diff_command(&before, &changed, true).unwrap());
    }

    #[test]
    fn test_diff_command_accepts_table_shape() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("table.json");
        let grid = dir.path().join("grid.json");
        let shorter = dir.path().join("shorter.json");
        std::fs::write(
            &table,
            r#"{"columns": ["id", "rating"], "rows": [["1", "4.50"], ["2", "4.20"]]}"#,
        )
        .unwrap();
        std::fs::write(&grid, r#"[["1", "4.50"], ["2", "4.20"]]"#).unwrap();
        std::fs::write(&shorter, r#"{"columns": ["id", "rating"], "rows": [["1", "4.50"]]}"#).unwrap();

        // Cells decide equality, column names do not
        assert!(diff_command(&table, &grid, false).unwrap());
        assert!(!diff_command(&table, &shorter, true).unwrap());
    }

    #[test]
    fn test_diff_command_rejects_bad_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, "[]").unwrap();
        std::fs::write(&bad, r#"{"rows": 3}"#).unwrap();

        assert!(diff_command(&good, &bad, false).is_err());
        assert!(diff_command(&good, &dir.path().join("missing.json"), false).is_err());
    }

    #[test]
    fn test_status_command_in_stub_mode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("basic")).unwrap();
        std::fs::write(
            dir.path().join("basic/select_one.json"),
            r#"[{"matchPattern": "SELECT 1", "returnRows": [{"columns": ["n"], "rows": [[7]]}]}]"#,
        )
        .unwrap();
        let config = dir.path().join("sqlmocker.toml");
        std::fs::write(
            &config,
            r#"
use_db = false

[mock]
root = "."
sub_folder = "basic"
files = ["select_one.json"]
"#,
        )
        .unwrap();

        assert!(status_command(Some(&config), false).unwrap());

        let options = load_options(Some(&config), false).unwrap();
        let mocker = Mocker::new(options).unwrap();
        assert_eq!(mocker.stub().map(StubStore::expectation_count), Some(1));
    }

    #[test]
    fn test_status_command_fails_on_missing_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("sqlmocker.toml");
        std::fs::write(
            &config,
            r#"
use_db = false

[mock]
root = "."
files = ["absent.json"]
"#,
        )
        .unwrap();

        assert!(status_command(Some(&config), false).is_err());
    }

    #[test]
    fn test_status_command_in_genuine_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("sqlmocker.toml");
        std::fs::write(
            &config,
            r#"
use_db = true

[mock]
root = "."
files = ["never_loaded.json"]

[db]
truncate_table = true

[db.data_source]
driver = "mysql"
user = "root"
password = "12345"
protocol = "tcp"
ip = "127.0.0.1"
port = "3306"
db_name = "mock"
"#,
        )
        .unwrap();

        assert!(status_command(Some(&config), true).unwrap());

        let options = load_options(Some(&config), false).unwrap();
        assert_eq!(
            redact(&options.db.data_source.dsn()),
            "root:****@tcp(127.0.0.1:3306)/mock"
        );
    }
}
