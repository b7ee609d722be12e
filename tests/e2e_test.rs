mod common;
mod utils;

use anyhow::Result;
use common::TestEnvironment;
use utils::TestServer;

#[test]
fn test_run_stores_image_under_home() -> Result<()> {
    let env = TestEnvironment::new()?;
    let server = TestServer::start()?;

    let output = utils::run_bingwall(&env, &["run", "--no-set", "--base-url", &server.base_url])?;
    assert_eq!(output.exit_code, 0, "run failed: {}", output.stderr);

    let stored = env.store_dir().join(format!("{}.jpeg", utils::IMAGE_TITLE));
    assert_eq!(std::fs::read(&stored)?, utils::image_bytes());
    assert!(output.stdout.contains("Saved"), "stdout: {}", output.stdout);

    let requests = server.requests();
    let metadata = requests
        .iter()
        .find(|r| r.starts_with("/HPImageArchive.aspx"))
        .expect("metadata request");
    for param in ["format=hp", "idx=0", "n=1", "nc=", "pid=hp", "mkt=zh-CN", "quiz=1", "og=1"] {
        assert!(metadata.contains(param), "missing {param} in {metadata}");
    }
    assert!(requests.iter().any(|r| r == utils::IMAGE_URI));

    Ok(())
}

#[test]
fn test_second_run_skips_existing_file() -> Result<()> {
    let env = TestEnvironment::new()?;
    let server = TestServer::start()?;
    let args = ["run", "--no-set", "--base-url", &server.base_url];

    let first = utils::run_bingwall(&env, &args)?;
    assert_eq!(first.exit_code, 0, "first run failed: {}", first.stderr);

    let second = utils::run_bingwall(&env, &args)?;
    assert_eq!(second.exit_code, 0, "second run failed: {}", second.stderr);
    assert!(
        second.stdout.contains("already exists"),
        "stdout: {}",
        second.stdout
    );
    assert_eq!(server.image_requests(), 1);

    Ok(())
}

#[test]
fn test_unreachable_service_reports_missing_uri() -> Result<()> {
    let env = TestEnvironment::new()?;
    let base_url = utils::closed_base_url()?;

    let output = utils::run_bingwall(&env, &["run", "--no-set", "--base-url", &base_url])?;
    assert_eq!(output.exit_code, 1);
    assert!(
        output.stderr.contains("No image URI found"),
        "stderr: {}",
        output.stderr
    );
    assert!(!env.store_dir().exists());

    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_wallpaper_failure_keeps_exit_code_zero() -> Result<()> {
    let env = TestEnvironment::new()?;
    let server = TestServer::start()?;

    // No desktop session variables: no backend applies
    let output = utils::run_bingwall(&env, &["run", "--base-url", &server.base_url])?;
    assert_eq!(output.exit_code, 0, "run failed: {}", output.stderr);
    assert!(
        output.stderr.contains("Failed to change wallpaper"),
        "stderr: {}",
        output.stderr
    );
    assert!(env.store_dir().join("Test Lake.jpeg").exists());

    Ok(())
}

#[test]
fn test_json_output_is_one_object_per_line() -> Result<()> {
    let env = TestEnvironment::new()?;
    let server = TestServer::start()?;

    let output = utils::run_bingwall(
        &env,
        &["--output", "json", "run", "--no-set", "--base-url", &server.base_url],
    )?;
    assert_eq!(output.exit_code, 0, "run failed: {}", output.stderr);

    let codes: Vec<String> = output
        .stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("json line");
            value["code"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    assert!(codes.iter().any(|c| c == "bing.info.found"), "codes: {codes:?}");
    assert!(codes.iter().any(|c| c == "store.saved"), "codes: {codes:?}");

    Ok(())
}

#[test]
fn test_debug_run_reports_stored_path() -> Result<()> {
    let env = TestEnvironment::new()?;
    let server = TestServer::start()?;

    let output = utils::run_bingwall(
        &env,
        &["--debug", "--output", "json", "run", "--no-set", "--base-url", &server.base_url],
    )?;
    assert_eq!(output.exit_code, 0, "run failed: {}", output.stderr);

    let done = output
        .stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|value| value["code"] == "bingwall.done")
        .expect("bingwall.done event");
    let expected = env.store_dir().join(format!("{}.jpeg", utils::IMAGE_TITLE));
    assert_eq!(done["data"]["path"], expected.display().to_string());

    Ok(())
}

#[test]
fn test_info_prints_title_and_url() -> Result<()> {
    let env = TestEnvironment::new()?;
    let server = TestServer::start()?;

    let output = utils::run_bingwall(&env, &["info", "--base-url", &server.base_url])?;
    assert_eq!(output.exit_code, 0, "info failed: {}", output.stderr);
    assert!(output.stdout.contains(utils::IMAGE_TITLE));
    assert!(output.stdout.contains(&format!(
        "{}{}",
        server.base_url.trim_end_matches('/'),
        utils::IMAGE_URI
    )));
    assert_eq!(server.image_requests(), 0);
    assert!(!env.store_dir().exists());

    Ok(())
}

#[test]
fn test_config_market_is_sent() -> Result<()> {
    let env = TestEnvironment::new()?;
    let server = TestServer::start()?;

    let output = utils::run_bingwall(&env, &["config", "init"])?;
    assert_eq!(output.exit_code, 0, "init failed: {}", output.stderr);

    let path_output = utils::run_bingwall(&env, &["config", "path"])?;
    let config_path = std::path::PathBuf::from(path_output.stdout.trim());
    assert!(config_path.exists(), "config not written at {}", config_path.display());

    let contents = std::fs::read_to_string(&config_path)?;
    assert!(contents.contains("market = \"zh-CN\""), "config: {contents}");
    std::fs::write(
        &config_path,
        format!(
            "market = \"en-US\"\nset_wallpaper = false\nbase_url = \"{}\"\n",
            server.base_url
        ),
    )?;

    let shown = utils::run_bingwall(&env, &["config", "show"])?;
    assert!(shown.stdout.contains("market = \"en-US\""), "show: {}", shown.stdout);

    let output = utils::run_bingwall(&env, &["run"])?;
    assert_eq!(output.exit_code, 0, "run failed: {}", output.stderr);
    assert!(server.requests().iter().any(|r| r.contains("mkt=en-US")));
    assert!(env.store_dir().join("Test Lake.jpeg").exists());

    Ok(())
}
