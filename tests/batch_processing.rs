//! Tests for the batch driver: ordering, skipping and normalization.

use std::sync::atomic::Ordering;
use std::time::Duration;

use bulk_url_check::{process_batch, Config, Field, NoProgress};
use httptest::{matchers::*, responders::*, Expectation, Server};

#[path = "helpers.rs"]
#[allow(dead_code)]
mod helpers;

use helpers::{context_with, test_config, CountingProgress, MapResolver};

fn host_and_port(server: &Server) -> String {
    server.addr().to_string()
}

#[tokio::test]
async fn test_one_row_per_non_blank_line_in_order() {
    let server = Server::run();
    for path in ["/first", "/second", "/third"] {
        server.expect(
            Expectation::matching(request::method_path("GET", path))
                .respond_with(status_code(200)),
        );
    }

    let lines = vec![
        server.url_str("/first"),
        String::new(),
        "   ".to_string(),
        server.url_str("/second"),
        "# skipped".to_string(),
        "\r".to_string(),
        server.url_str("/third"),
    ];

    let ctx = context_with(&test_config(), MapResolver::default());
    let progress = CountingProgress::default();
    let rows = process_batch(&ctx, &lines, &progress).await;

    let sources: Vec<&str> = rows.iter().map(|row| row.source_url()).collect();
    assert_eq!(
        sources,
        vec![
            server.url_str("/first"),
            server.url_str("/second"),
            server.url_str("/third")
        ]
    );
    assert_eq!(progress.total.load(Ordering::SeqCst), lines.len() as u64);
    assert_eq!(progress.ticks.load(Ordering::SeqCst), lines.len() as u64);
}

#[tokio::test]
async fn test_concurrent_batch_keeps_input_order() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/slow")).respond_with(
            delay_and_then(Duration::from_millis(400), status_code(200)),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/fast"))
            .respond_with(status_code(204)),
    );

    let lines = vec![
        server.url_str("/slow"),
        "missing-host.invalid".to_string(),
        server.url_str("/fast"),
    ];

    let config = Config {
        concurrency: 3,
        ..test_config()
    };
    let ctx = context_with(&config, MapResolver::default());
    let rows = process_batch(&ctx, &lines, &NoProgress).await;

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].status_code(), &Field::Value(200));
    assert_eq!(rows[1].source_url(), "http://missing-host.invalid");
    assert!(rows[1].final_url().is_no_dns());
    assert_eq!(rows[2].status_code(), &Field::Value(204));
}

#[tokio::test]
async fn test_lines_without_scheme_default_to_http() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/plain"))
            .respond_with(status_code(200)),
    );

    let lines = vec![format!("  {}/plain\r", host_and_port(&server))];
    let ctx = context_with(&test_config(), MapResolver::default());
    let rows = process_batch(&ctx, &lines, &NoProgress).await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].source_url(), server.url_str("/plain"));
    assert_eq!(rows[0].status_code(), &Field::Value(200));
}

#[tokio::test]
async fn test_empty_input_yields_no_rows() {
    let ctx = context_with(&test_config(), MapResolver::default());
    let lines: Vec<String> = vec![String::new(), "# only a comment".to_string()];
    let rows = process_batch(&ctx, &lines, &NoProgress).await;
    assert!(rows.is_empty());
}
