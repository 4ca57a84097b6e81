//! Integration tests exercising the full exporter pipeline:
//! mock node → reconciliation cycle → metrics publication → HTTP scrape.
//!
//! These tests wire together components that are normally only connected
//! inside `main.rs`, driving single scheduler passes deterministically.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use govwatch_chain::{ChainClient, RetryPolicy};
use govwatch_daemon::{server, Scheduler, ShutdownController};
use govwatch_engine::Reconciler;
use govwatch_metrics::ExporterMetrics;
use govwatch_types::{ChainTarget, LookupMode};

const ADDRESS: &str = "cosmos1abc";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_proposal_json(id: &str) -> serde_json::Value {
    let start = (Utc::now() - chrono::Duration::hours(1)).to_rfc3339();
    let end = (Utc::now() + chrono::Duration::hours(1)).to_rfc3339();
    json!({
        "id": id,
        "title": format!("Proposal {id}"),
        "voting_start_time": start,
        "voting_end_time": end
    })
}

async fn mount_proposals(server: &MockServer, proposals: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/cosmos/gov/v1/proposals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "proposals": proposals })))
        .mount(server)
        .await;
}

async fn mount_no_vote(server: &MockServer, proposal_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/cosmos/gov/v1beta1/proposals/{proposal_id}/votes/{ADDRESS}"
        )))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"code": 3})))
        .mount(server)
        .await;
}

async fn mount_voted(server: &MockServer, proposal_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/cosmos/gov/v1beta1/proposals/{proposal_id}/votes/{ADDRESS}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vote": {"options": [{"option": "VOTE_OPTION_YES"}]}
        })))
        .mount(server)
        .await;
}

fn reconciler_for(node: &MockServer, chain_name: &str) -> Reconciler {
    let target = ChainTarget {
        name: chain_name.into(),
        node_url: node.uri(),
        address: ADDRESS.into(),
        alias: None,
        mode: LookupMode::Direct,
    };
    let client = ChainClient::with_timeout(&node.uri(), Duration::from_secs(5));
    let retry = RetryPolicy {
        max_retries: 1,
        wait: Duration::from_millis(10),
    };
    Reconciler::new(target, client, retry)
}

fn scheduler_for(reconcilers: Vec<Reconciler>, metrics: Arc<ExporterMetrics>) -> Scheduler {
    Scheduler::new(reconcilers, metrics, Duration::from_secs(60))
}

async fn scrape(metrics: Arc<ExporterMetrics>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, server::router(metrics))
            .await
            .expect("serve");
    });

    reqwest::get(format!("http://{addr}/metrics"))
        .await
        .expect("scrape request")
        .text()
        .await
        .expect("scrape body")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_cycle_exposes_not_voted_metrics() {
    let node = MockServer::start().await;
    mount_proposals(&node, vec![open_proposal_json("12")]).await;
    mount_no_vote(&node, "12").await;

    let metrics = Arc::new(ExporterMetrics::new());
    let scheduler = scheduler_for(vec![reconciler_for(&node, "testhub")], metrics.clone());

    let shutdown = ShutdownController::new();
    let mut rx = shutdown.subscribe();
    assert!(!scheduler.run_once(&mut rx).await);

    let body = scrape(metrics).await;
    assert!(body.contains("govwatch_not_voted_proposals"));
    assert!(body.contains(r#"chain="testhub""#));
    assert!(body.contains(r#"proposal_id="12""#));
    assert!(body.contains(r#"title="Proposal 12""#));

    let count_line = body
        .lines()
        .find(|line| line.starts_with("govwatch_not_voted_proposals{"))
        .expect("count gauge present");
    assert!(count_line.ends_with(" 1"), "unexpected line: {count_line}");
}

#[tokio::test]
async fn resolved_proposal_disappears_on_next_cycle() {
    let node = MockServer::start().await;
    mount_proposals(&node, vec![open_proposal_json("12")]).await;
    mount_no_vote(&node, "12").await;

    let metrics = Arc::new(ExporterMetrics::new());
    let scheduler = scheduler_for(vec![reconciler_for(&node, "testhub")], metrics.clone());
    let shutdown = ShutdownController::new();
    let mut rx = shutdown.subscribe();

    scheduler.run_once(&mut rx).await;
    assert!(metrics.encode().unwrap().contains(r#"proposal_id="12""#));

    // The vote lands between cycles.
    node.reset().await;
    mount_proposals(&node, vec![open_proposal_json("12")]).await;
    mount_voted(&node, "12").await;

    scheduler.run_once(&mut rx).await;
    let body = scrape(metrics).await;
    assert!(!body.contains(r#"proposal_id="12""#));
    let count_line = body
        .lines()
        .find(|line| line.starts_with("govwatch_not_voted_proposals{"))
        .expect("count gauge present");
    assert!(count_line.ends_with(" 0"), "unexpected line: {count_line}");
}

#[tokio::test]
async fn one_failing_chain_does_not_abort_the_others() {
    let broken_node = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cosmos/gov/v1/proposals"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken_node)
        .await;

    let healthy_node = MockServer::start().await;
    mount_proposals(&healthy_node, vec![open_proposal_json("7")]).await;
    mount_no_vote(&healthy_node, "7").await;

    let metrics = Arc::new(ExporterMetrics::new());
    let scheduler = scheduler_for(
        vec![
            reconciler_for(&broken_node, "brokenhub"),
            reconciler_for(&healthy_node, "healthyhub"),
        ],
        metrics.clone(),
    );
    let shutdown = ShutdownController::new();
    let mut rx = shutdown.subscribe();
    scheduler.run_once(&mut rx).await;

    let body = metrics.encode().unwrap();
    // The broken chain reports an empty snapshot; the healthy one is intact.
    assert!(body.contains(r#"chain="brokenhub""#));
    assert!(body.contains(r#"chain="healthyhub""#));
    assert!(body.contains(r#"proposal_id="7""#));
}

#[tokio::test]
async fn shutdown_mid_pass_finishes_current_chain_only() {
    let first_node = MockServer::start().await;
    mount_proposals(&first_node, vec![open_proposal_json("1")]).await;
    mount_no_vote(&first_node, "1").await;

    let second_node = MockServer::start().await;
    // Must never be reached: shutdown fires while the first chain runs.
    Mock::given(method("GET"))
        .and(path("/cosmos/gov/v1/proposals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"proposals": []})))
        .expect(0)
        .mount(&second_node)
        .await;

    let metrics = Arc::new(ExporterMetrics::new());
    let scheduler = scheduler_for(
        vec![
            reconciler_for(&first_node, "firsthub"),
            reconciler_for(&second_node, "secondhub"),
        ],
        metrics.clone(),
    );

    let shutdown = ShutdownController::new();
    let mut rx = shutdown.subscribe();
    shutdown.shutdown();

    assert!(scheduler.run_once(&mut rx).await);
    // The first chain still completed and published.
    assert!(metrics.encode().unwrap().contains(r#"chain="firsthub""#));
}

#[tokio::test]
async fn health_endpoint_responds() {
    let metrics = Arc::new(ExporterMetrics::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, server::router(metrics))
            .await
            .expect("serve");
    });

    let response = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("health request");
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "ok");
}
