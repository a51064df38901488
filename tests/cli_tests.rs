//! CLI command tests
//!
//! Runs import -> recompute -> export through the CLI command layer.

use hirestats::cli::{Cli, Commands};
use hirestats::config::{StaticConfig, init_config_with};
use hirestats::interfaces::cli::run_cli_command;
use hirestats::storage::StorageFactory;
use clap::Parser;
use std::io::Write;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();
static TEST_DIR: std::sync::OnceLock<TempDir> = std::sync::OnceLock::new();

/// CLI 命令从全局配置读取 database_url，整个测试文件共用一个库
fn init_cli_config() -> &'static TempDir {
    let dir = TEST_DIR.get_or_init(|| TempDir::new().expect("Failed to create temp dir"));
    INIT.call_once(|| {
        let mut config = StaticConfig::default();
        config.database.database_url =
            format!("sqlite://{}?mode=rwc", dir.path().join("cli_test.db").display());
        init_config_with(config);
    });
    dir
}

fn parse(args: &[&str]) -> Commands {
    let mut argv = vec!["hirestats"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
        .expect("failed to parse args")
        .command
        .expect("missing subcommand")
}

#[tokio::test]
async fn test_import_recompute_export_flow() {
    let dir = init_cli_config();

    let csv_path = dir.path().join("postings.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "id,title,standard_job_id,country_code,days_to_hire").unwrap();
    for days in 1..=10 {
        writeln!(file, "cli-{},Engineer,job-cli,SE,{}", days, days).unwrap();
    }
    drop(file);

    let csv_arg = csv_path.display().to_string();
    run_cli_command(parse(&["import", &csv_arg])).await.unwrap();
    run_cli_command(parse(&["recompute", "--chunk-size", "1"]))
        .await
        .unwrap();

    let storage = StorageFactory::create().await.unwrap();
    let rows = storage.load_all_stats().await.unwrap();
    assert!(rows.iter().any(|r| r.standard_job_id == "job-cli"
        && r.country_code.as_deref() == Some("SE")
        && r.avg_days == 5.5));

    let out_path = dir.path().join("stats.csv");
    let out_arg = out_path.display().to_string();
    run_cli_command(parse(&["export", &out_arg])).await.unwrap();

    let exported = std::fs::read_to_string(&out_path).unwrap();
    assert!(exported.starts_with("standard_job_id,country_code,min_days"));
    assert!(exported.contains("job-cli,SE,1.1,5.5,9.9,10"));
    assert!(exported.contains("job-cli,,1.1,5.5,9.9,10"));

    run_cli_command(parse(&["lookup", "job-cli", "--country", "SE"]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_import_missing_file_fails() {
    init_cli_config();

    let result = run_cli_command(parse(&["import", "/no/such/postings.csv"])).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_config_generate_writes_toml() {
    let dir = init_cli_config();
    let path = dir.path().join("generated.toml");
    let path_arg = path.display().to_string();

    run_cli_command(parse(&["config", "generate", &path_arg, "--force"]))
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: StaticConfig = toml::from_str(&content).unwrap();
    assert_eq!(parsed.pipeline.chunk_size, 1000);
}

#[tokio::test]
async fn test_serve_is_not_a_cli_command() {
    init_cli_config();

    let result = run_cli_command(Commands::Serve).await;
    assert!(matches!(
        result,
        Err(hirestats::interfaces::cli::CliError::CommandError(_))
    ));
}
