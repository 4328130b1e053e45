use chrono::{Duration, TimeZone, Utc};
use diffa_console::commands::run;
use diffa_console::config::{ConsoleConfig, Mode};
use diffa_console::TimeRange;
use diffa_devkit::{DiffRecordFixture, TestHarness};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn diffs_config(agent_url: String, verbose: bool) -> ConsoleConfig {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    ConsoleConfig {
        agent_url,
        range: TimeRange::new(start, start + Duration::hours(21)),
        verbose,
        mode: Mode::Diffs { pair_key: "orders".into() },
    }
}

// Same filter the binary installs when RUST_LOG is unset
async fn run_capturing(config: &ConsoleConfig) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_directive()))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    run(config).await.unwrap();
    logs.text()
}

#[tokio::test]
async fn test_verbose_logs_requests_and_responses() {
    let harness = TestHarness::with_records(vec![DiffRecordFixture::new("orders", "o-1")])
        .await
        .unwrap();
    let logs = run_capturing(&diffs_config(harness.agent_url(), true)).await;

    assert!(logs.contains(&format!("POST {}/rest/diffs/sessions", harness.agent_url())), "{}", logs);
    assert!(logs.contains("GET "), "{}", logs);
    assert!(logs.contains("pairKey=orders"), "{}", logs);
    assert_eq!(logs.matches("agent response").count(), 2, "{}", logs);
    assert!(logs.contains("status=201"), "{}", logs);
    assert!(logs.contains("o-1"), "{}", logs);
}

#[tokio::test]
async fn test_quiet_run_logs_no_traffic() {
    let harness = TestHarness::with_records(vec![DiffRecordFixture::new("orders", "o-1")])
        .await
        .unwrap();
    let logs = run_capturing(&diffs_config(harness.agent_url(), false)).await;

    assert!(!logs.contains("agent response"), "{}", logs);
    assert!(!logs.contains("POST "), "{}", logs);
}
