use anyhow::Result;
use httpmock::prelude::*;
use std::process::Command;
use tempfile::TempDir;

const TOP_LIST: &str = include_str!("fixtures/top_list.html");
const TITLE_NOMINATED: &str = include_str!("fixtures/title_nominated.html");

fn write_config(dir: &TempDir, server: &MockServer, limit: usize) -> Result<(String, String)> {
    let output_path = dir.path().join("top_films.csv").to_str().unwrap().replace('\\', "/");
    let config_path = dir.path().join("imdb-etl.toml");

    std::fs::write(
        &config_path,
        format!(
            r#"
[source]
top_list_url = "{}"
base_url = "{}"

[extract]
limit = {}

[load]
output_path = "{}"
"#,
            server.url("/chart/top/"),
            server.base_url(),
            limit,
            output_path
        ),
    )?;

    Ok((config_path.to_str().unwrap().to_string(), output_path))
}

#[test]
fn test_cli_success_reports_output_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/chart/top/");
        then.status(200).body(TOP_LIST);
    });
    server.mock(|when, then| {
        when.method(GET).path_contains("/title/");
        then.status(200).body(TITLE_NOMINATED);
    });

    let (config_path, output_path) = write_config(&temp_dir, &server, 2)?;
    let output = Command::new(env!("CARGO_BIN_EXE_imdb-etl"))
        .args(["--config", &config_path])
        .env("RUST_LOG", "off")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains(&format!("Result is at {}", output_path)));

    let written = std::fs::read_to_string(&output_path)?;
    assert_eq!(written.lines().count(), 3);
    Ok(())
}

#[test]
fn test_cli_fetch_failure_exits_non_zero() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/chart/top/");
        then.status(500);
    });

    let (config_path, output_path) = write_config(&temp_dir, &server, 2)?;
    let output = Command::new(env!("CARGO_BIN_EXE_imdb-etl"))
        .args(["--config", &config_path])
        .output()?;

    assert!(!output.status.success());
    assert!(!std::path::Path::new(&output_path).exists());
    Ok(())
}

#[test]
fn test_cli_invalid_override_exits_non_zero() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_imdb-etl"))
        .args(["--limit", "0", "--output", "unused.csv"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}
