//! HTTP transport tests against a mock Loggly input endpoint

use httpmock::prelude::*;
use loggly_tree::prelude::*;
use loggly_tree::{error, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const TOKEN: &str = "0a1b2c3d-0000-4e5f-8a9b-0c1d2e3f4a5b";

fn input_path() -> String {
    format!("/inputs/{}", TOKEN)
}

fn capture_diagnostics() -> (DiagnosticSink, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    let sink: DiagnosticSink = Arc::new(move |line: &str| captured.lock().push(line.to_string()));
    (sink, lines)
}

fn tree_for(server: &MockServer, config: impl FnOnce(LogglyConfig) -> LogglyConfig) -> LogglyTree {
    let config = config(LogglyConfig::new(TOKEN).with_endpoint(server.base_url()));
    LogglyTree::with_config(config).expect("valid configuration")
}

/// Poll until `condition` holds or `timeout` expires
fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    condition()
}

#[test]
fn test_posts_payload_to_input_endpoint() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(input_path())
            .header("content-type", "text/plain")
            .body(r#"{"level": "INFO", "message": "listening on 8080"}"#);
        then.status(200).body(r#"{"response" : "ok"}"#);
    });

    let tree = tree_for(&server, |c| c);
    info!(tree, "listening on %d", 8080).unwrap();

    assert!(wait_until(Duration::from_secs(5), || tree.metrics().delivered() == 1));
    mock.assert();
}

#[test]
fn test_tags_travel_in_header() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(input_path())
            .header("x-loggly-tag", "prod,web");
        then.status(200);
    });

    let tree = tree_for(&server, |c| c);
    tree.tag(" prod, web");
    tree.warn("tagged", &[]).unwrap();

    assert!(wait_until(Duration::from_secs(5), || tree.metrics().delivered() == 1));
    mock.assert();
}

#[test]
fn test_cause_payload_reaches_server_verbatim() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(input_path())
            .body("{\"level\": \"ERROR\", \"message\": \"save failed\", \"exception\": \"disk full\n\"}");
        then.status(200);
    });

    let tree = tree_for(&server, |c| c);
    let cause = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    error!(tree, cause = &cause, "save failed").unwrap();

    assert!(wait_until(Duration::from_secs(5), || tree.metrics().delivered() == 1));
    mock.assert();
}

#[test]
fn test_server_error_is_reported_not_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(input_path());
        then.status(500);
    });

    let (sink, lines) = capture_diagnostics();
    let tree = tree_for(&server, |c| c).with_diagnostics(sink);
    tree.info("will fail", &[]).unwrap();

    assert!(wait_until(Duration::from_secs(5), || tree.metrics().failed() == 1));
    assert_eq!(
        lines.lock().as_slice(),
        &["LogglyTree failed: HTTP 500 Internal Server Error".to_string()]
    );
    mock.assert_hits(1);
}

#[test]
fn test_request_timeout_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(input_path());
        then.status(200).delay(Duration::from_secs(3));
    });

    let (sink, lines) = capture_diagnostics();
    let tree = tree_for(&server, |c| c.with_request_timeout(Duration::from_secs(1))).with_diagnostics(sink);
    tree.info("slow", &[]).unwrap();

    assert!(wait_until(Duration::from_secs(10), || tree.metrics().failed() == 1));
    assert_eq!(lines.lock().as_slice(), &["LogglyTree failed: timeout".to_string()]);
}

#[test]
fn test_full_queue_rejects_without_blocking() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(input_path());
        then.status(200).delay(Duration::from_millis(500));
    });

    let (sink, lines) = capture_diagnostics();
    let tree = tree_for(&server, |c| c.with_queue_capacity(1).with_worker_threads(1)).with_diagnostics(sink);

    let start = Instant::now();
    for i in 0..3 {
        info!(tree, "burst %d", i).unwrap();
    }
    assert!(start.elapsed() < Duration::from_millis(500));

    let rejected = lines
        .lock()
        .iter()
        .filter(|line| *line == "LogglyTree failed: Loggly queue full: capacity 1")
        .count();
    assert!(rejected >= 1, "expected a rejected submission, got {:?}", lines.lock());

    assert!(wait_until(Duration::from_secs(5), || {
        tree.metrics().delivered() + tree.metrics().failed() == 3
    }));
}

#[test]
fn test_unreachable_endpoint_is_reported() {
    let (sink, lines) = capture_diagnostics();
    let config = LogglyConfig::new(TOKEN).with_endpoint("http://127.0.0.1:1/");
    let tree = LogglyTree::with_config(config).unwrap().with_diagnostics(sink);

    tree.debug("nobody listening", &[]).unwrap();

    assert!(wait_until(Duration::from_secs(10), || tree.metrics().failed() == 1));
    assert!(lines.lock()[0].starts_with("LogglyTree failed: "));
}

#[test]
fn test_shutdown_drains_queued_submissions() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(input_path());
        then.status(200).delay(Duration::from_millis(50));
    });

    let config = LogglyConfig::new(TOKEN)
        .with_endpoint(server.base_url())
        .with_worker_threads(1);
    let mut client = LogglyClient::with_config(config).unwrap();

    let delivered = Arc::new(Mutex::new(0));
    for i in 0..5 {
        let delivered = Arc::clone(&delivered);
        client.submit(
            format!(r#"{{"level": "INFO", "message": "{}"}}"#, i),
            Arc::new(move |result: SubmitResult| {
                if result.is_success() {
                    *delivered.lock() += 1;
                }
            }),
        );
    }

    assert!(client.shutdown(Duration::from_secs(10)));
    assert_eq!(*delivered.lock(), 5);
    mock.assert_hits(5);
}
