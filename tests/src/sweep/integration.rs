#![cfg(test)]
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::atomic::Ordering;
use std::time::Duration;

use sweepr_common::config::ScanConfig;
use sweepr_core::engine::{ScanEngine, ScanSummary};
use tokio::net::TcpListener;

fn loopback_cfg(first_port: u16, last_port: u16) -> ScanConfig {
    let mut cfg = ScanConfig::new(Ipv4Addr::new(127, 0, 0, 1), 32, first_port, last_port);
    cfg.timeout = Duration::from_secs(2);
    cfg.poll_interval = Duration::from_millis(50);
    cfg
}

async fn local_listener() -> (TcpListener, SocketAddrV4) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = match listener.local_addr().unwrap() {
        SocketAddr::V4(addr) => addr,
        SocketAddr::V6(_) => unreachable!(),
    };
    (listener, addr)
}

async fn run_to_summary(cfg: &ScanConfig) -> (ScanSummary, Vec<SocketAddrV4>) {
    let engine = ScanEngine::new(cfg).expect("engine construction failed");
    let mut sink: Vec<SocketAddrV4> = Vec::new();
    let summary = tokio::time::timeout(Duration::from_secs(20), engine.run(&mut sink, &mut ()))
        .await
        .expect("sweep did not terminate");
    (summary, sink)
}

/// One listening port inside a three-port window; the neighbours refuse.
/// Exactly one open event must come out, carrying the matching endpoint.
#[tokio::test]
async fn sweep_finds_single_listening_port() {
    let (_listener, addr) = local_listener().await;
    let cfg = loopback_cfg(addr.port() - 1, addr.port() + 1);

    let (summary, sink) = run_to_summary(&cfg).await;

    assert_eq!(summary.open_found, 1);
    assert_eq!(sink, vec![addr]);
    assert_eq!(summary.issued, 3);
    assert_eq!(summary.total, 3);
    assert!(!summary.cancelled);
}

/// Refusing targets all resolve to closed within the sweep, no opens, and
/// the engine terminates on its own.
#[tokio::test]
async fn all_refused_targets_resolve_closed() {
    // below the ephemeral range, so no concurrent test can bind there
    let mut cfg = loopback_cfg(4_400, 4_403);
    cfg.capacity = 2;

    let (summary, sink) = run_to_summary(&cfg).await;

    assert!(sink.is_empty());
    assert_eq!(summary.open_found, 0);
    assert_eq!(summary.issued, 4);
    assert_eq!(
        summary.open_found + summary.closed + summary.timed_out,
        summary.total
    );
}

/// Every issued target reaches exactly one terminal outcome.
#[tokio::test]
async fn outcomes_sum_to_total() {
    let (_listener, addr) = local_listener().await;
    let mut cfg = loopback_cfg(addr.port() - 4, addr.port() + 3);
    cfg.capacity = 3;

    let (summary, _sink) = run_to_summary(&cfg).await;

    assert_eq!(summary.issued, summary.total);
    assert_eq!(
        summary.open_found + summary.closed + summary.timed_out,
        summary.total
    );
}

/// Cancelling mid-sweep stops issuance at the next loop boundary and
/// force-resolves everything already outstanding.
#[tokio::test]
async fn cancellation_mid_sweep_drains_and_stops() {
    // a window big enough that the sweep is still running when we cancel
    let mut cfg = loopback_cfg(30_000, 30_999);
    cfg.capacity = 8;
    cfg.poll_interval = Duration::from_millis(100);

    let engine = ScanEngine::new(&cfg).unwrap();
    let total = engine.total();
    let cancel = engine.cancel_flag();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        cancel.store(true, Ordering::Relaxed);
    });

    let mut sink: Vec<SocketAddrV4> = Vec::new();
    let summary = tokio::time::timeout(Duration::from_secs(10), engine.run(&mut sink, &mut ()))
        .await
        .expect("cancelled sweep did not terminate");

    assert!(summary.cancelled);
    assert!(summary.issued < total, "no new targets after the signal");
    assert_eq!(
        summary.open_found + summary.closed + summary.timed_out,
        summary.issued,
        "every issued attempt must still reach a terminal outcome"
    );
}

/// A blackholed target occupies its slot until the timeout evicts it.
/// Needs a network where TEST-NET-3 traffic is silently dropped.
#[tokio::test]
#[ignore]
async fn unresponsive_target_times_out() {
    let mut cfg = ScanConfig::new(Ipv4Addr::new(203, 0, 113, 1), 32, 80, 80);
    cfg.timeout = Duration::from_secs(1);
    cfg.poll_interval = Duration::from_millis(100);

    let (summary, sink) = run_to_summary(&cfg).await;

    assert!(sink.is_empty());
    assert_eq!(summary.timed_out, 1);
    assert!(summary.elapsed >= Duration::from_secs(1));
    assert!(summary.elapsed < Duration::from_millis(3_500));
}
