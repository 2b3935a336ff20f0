// Fetch module tests.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use httptest::{matchers::*, responders::*, Expectation, Server};
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::StatusCode;

use super::*;
use crate::config::Config;
use crate::dns::{DnsLookupError, SharedResolver};

/// Resolver that knows no host at all.
struct EmptyZone;

impl Resolve for EmptyZone {
    fn resolve(&self, name: Name) -> Resolving {
        let host = name.as_str().to_string();
        Box::pin(async move {
            Err::<Addrs, _>(Box::new(DnsLookupError::NotFound { host })
                as Box<dyn std::error::Error + Send + Sync>)
        })
    }
}

fn test_context(max_redirects: usize) -> CheckContext {
    let config = Config {
        max_redirects,
        timeout_seconds: Some(10),
        ..Default::default()
    };
    CheckContext::with_resolver(&config, SharedResolver::new(EmptyZone))
        .expect("Failed to build test context")
}

#[tokio::test]
async fn test_follow_redirects_counts_hops() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/a"))
            .respond_with(status_code(301).insert_header("Location", "/b")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/b"))
            .respond_with(status_code(302).insert_header("Location", "/c")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/c"))
            .respond_with(status_code(307).insert_header("Location", "/d")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/d"))
            .respond_with(status_code(200).body("landed")),
    );

    let ctx = test_context(10);
    let landing = follow_redirects(&ctx.client, &server.url_str("/a"), 10)
        .await
        .expect("Chain should land");

    assert_eq!(landing.redirect_count, 3);
    assert_eq!(landing.status, StatusCode::OK);
    assert_eq!(landing.final_url, server.url_str("/d"));
    assert_eq!(landing.peer, Some(server.addr().ip()));
}

#[tokio::test]
async fn test_follow_redirects_resolves_relative_location() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/dir/start"))
            .respond_with(status_code(302).insert_header("Location", "next")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/dir/next"))
            .respond_with(status_code(204)),
    );

    let ctx = test_context(10);
    let landing = follow_redirects(&ctx.client, &server.url_str("/dir/start"), 10)
        .await
        .expect("Chain should land");

    assert_eq!(landing.redirect_count, 1);
    assert_eq!(landing.final_url, server.url_str("/dir/next"));
}

#[tokio::test]
async fn test_follow_redirects_follows_multiple_choices_with_location() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/choices"))
            .respond_with(status_code(300).insert_header("Location", "/picked")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/picked"))
            .respond_with(status_code(200)),
    );

    let ctx = test_context(10);
    let landing = follow_redirects(&ctx.client, &server.url_str("/choices"), 10)
        .await
        .expect("Chain should land");

    assert_eq!(landing.redirect_count, 1);
    assert_eq!(landing.status, StatusCode::OK);
    assert_eq!(landing.final_url, server.url_str("/picked"));
}

#[tokio::test]
async fn test_follow_redirects_redirect_without_location_is_terminal() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/nowhere"))
            .respond_with(status_code(302)),
    );

    let ctx = test_context(10);
    let landing = follow_redirects(&ctx.client, &server.url_str("/nowhere"), 10)
        .await
        .expect("A 302 below 400 is accepted");

    assert_eq!(landing.redirect_count, 0);
    assert_eq!(landing.status, StatusCode::FOUND);
}

#[tokio::test]
async fn test_follow_redirects_rejects_client_error_with_trail() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/old"))
            .respond_with(status_code(301).insert_header("Location", "/gone")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/gone"))
            .respond_with(status_code(404)),
    );

    let ctx = test_context(10);
    let failure = follow_redirects(&ctx.client, &server.url_str("/old"), 10)
        .await
        .expect_err("404 should be rejected");

    assert!(matches!(
        failure.error,
        FetchError::Status { status } if status == StatusCode::NOT_FOUND
    ));
    assert_eq!(failure.trail.redirect_count, 1);
    assert_eq!(failure.trail.current_url, server.url_str("/gone"));
    assert_eq!(failure.trail.last_status, Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_follow_redirects_stops_at_hop_limit() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/loop"))
            .times(3)
            .respond_with(status_code(301).insert_header("Location", "/loop")),
    );

    let ctx = test_context(2);
    let failure = follow_redirects(&ctx.client, &server.url_str("/loop"), 2)
        .await
        .expect_err("Endless chain should be cut");

    assert!(matches!(failure.error, FetchError::TooManyRedirects { limit: 2 }));
    assert_eq!(failure.trail.redirect_count, 2);
    assert_eq!(failure.trail.last_status, Some(StatusCode::MOVED_PERMANENTLY));
}

#[test]
fn test_classify_failure_non_transport_errors() {
    assert_eq!(
        classify_failure(&FetchError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR
        }),
        FailureKind::Other(ErrorType::HttpRequestStatusError)
    );
    assert_eq!(
        classify_failure(&FetchError::TooManyRedirects { limit: 10 }),
        FailureKind::Other(ErrorType::TooManyRedirects)
    );
    assert_eq!(
        classify_failure(&FetchError::InvalidLocation {
            location: "http://[".to_string(),
            source: None,
        }),
        FailureKind::Other(ErrorType::InvalidRedirectLocation)
    );
}

#[tokio::test]
async fn test_resolve_url_missing_host_is_no_dns_row() {
    let ctx = test_context(10);
    let row = resolve_url(&ctx, "http://missing.invalid/").await;

    assert_eq!(
        row.to_record(),
        [
            "http://missing.invalid/",
            "---",
            "---",
            "---",
            "---",
            "No DNS entry"
        ]
    );
    assert_eq!(row.outcome(), OutcomeKind::DnsNotFound);
    assert_eq!(ctx.stats().get_outcome_count(OutcomeKind::DnsNotFound), 1);
}

#[tokio::test]
async fn test_resolve_url_client_error_keeps_response_fields() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing"))
            .respond_with(status_code(404)),
    );

    let ctx = test_context(10);
    let url = server.url_str("/missing");
    let row = resolve_url(&ctx, &url).await;

    assert_eq!(row.final_url(), &Field::Value(url.clone()));
    assert_eq!(row.redirect_count(), &Field::Value(0));
    assert_eq!(row.status_code(), &Field::Value(404));
    assert_eq!(row.final_server(), &Field::Value(server.addr().ip()));
    assert_eq!(row.remarks(), "");
    assert_eq!(row.outcome(), OutcomeKind::Failed);
    assert_eq!(
        ctx.stats().get_error_count(ErrorType::HttpRequestStatusError),
        1
    );
}

#[tokio::test]
async fn test_resolve_url_too_many_redirects_row() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/loop"))
            .times(2)
            .respond_with(status_code(302).insert_header("Location", "/loop")),
    );

    let ctx = test_context(1);
    let url = server.url_str("/loop");
    let row = resolve_url(&ctx, &url).await;

    assert_eq!(row.redirect_count(), &Field::Value(1));
    assert_eq!(row.status_code(), &Field::Value(302));
    assert_eq!(row.remarks(), "Too many redirects");
}

#[tokio::test]
async fn test_resolve_url_connection_refused_repairs_server() {
    // Reserve a port, then free it so nothing listens there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    drop(listener);

    let ctx = test_context(10);
    let url = format!("http://{addr}/");
    let row = resolve_url(&ctx, &url).await;

    let record = row.to_record();
    assert_eq!(record[1], "Error");
    assert_eq!(record[2], "0");
    assert_eq!(record[3], "Error");
    assert_eq!(
        row.final_server(),
        &Field::Value(IpAddr::V4(Ipv4Addr::LOCALHOST))
    );
    assert_eq!(row.remarks(), "HTTP request connect error");
    assert_eq!(row.outcome(), OutcomeKind::Failed);
}

#[tokio::test]
async fn test_resolve_url_redirect_to_dead_port_keeps_trail() {
    let dead = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let dead_addr: SocketAddr = dead.local_addr().expect("local addr");
    drop(dead);

    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/hop")).respond_with(
            status_code(302).insert_header("Location", format!("http://{dead_addr}/gone")),
        ),
    );

    let ctx = test_context(10);
    let row = resolve_url(&ctx, &server.url_str("/hop")).await;

    assert_eq!(row.final_url(), &Field::Failed);
    assert_eq!(row.redirect_count(), &Field::Value(1));
    assert_eq!(row.status_code(), &Field::Failed);
    assert_eq!(row.last_requested_url(), format!("http://{dead_addr}/gone"));
    // Looked up from the dead destination, not the redirecting server
    assert_eq!(row.final_server(), &Field::Value(dead_addr.ip()));
}

#[tokio::test]
async fn test_repair_skips_no_dns_rows() {
    let ctx = test_context(10);
    let row = ResolutionResult::no_dns("http://missing.invalid", REMARK_NO_DNS);
    let repaired = repair_peer_address(&ctx, row.clone()).await;
    assert_eq!(repaired, row);
}

#[tokio::test]
async fn test_repair_unresolvable_host_appends_remark() {
    let ctx = test_context(10);
    let row = ResolutionResult::unanswered(
        "http://unknown.invalid/",
        "http://unknown.invalid/",
        0,
        "HTTP request timeout error",
    );
    let repaired = repair_peer_address(&ctx, row).await;

    assert!(repaired.final_server().is_unknown());
    assert_eq!(
        repaired.remarks(),
        "HTTP request timeout error; Destination server unresolvable"
    );
}
