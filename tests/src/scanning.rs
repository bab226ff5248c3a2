use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rollcall_common::config::ScanConfig;
use rollcall_common::network::cidr::Network;
use rollcall_core::scanner::Scanner;

use crate::stubs::StubProber;

fn config(limit: usize) -> ScanConfig {
    ScanConfig::new(limit, Duration::from_millis(100), false).unwrap()
}

#[tokio::test]
async fn two_network_scenario_groups_live_hosts_per_network() {
    let networks = vec![
        Network::parse("10.0.0.0/30", Some("A".into())).unwrap(),
        Network::parse("10.0.0.4/30", Some("B".into())).unwrap(),
    ];
    let alive = [Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 6)];
    let prober = StubProber::new(&alive);

    let scan = Scanner::new(prober, config(4)).scan(&networks).await.unwrap();

    let entries = scan.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0.title(), "A");
    assert_eq!(entries[0].1, vec![Ipv4Addr::new(10, 0, 0, 1)]);
    assert_eq!(entries[1].0.title(), "B");
    assert_eq!(entries[1].1, vec![Ipv4Addr::new(10, 0, 0, 6)]);
}

#[tokio::test]
async fn results_are_address_ordered_and_idempotent_under_jitter() {
    let networks = vec![Network::parse("192.168.50.0/26", None).unwrap()];
    // Scattered across the range, listed here out of order.
    let alive = [
        Ipv4Addr::new(192, 168, 50, 40),
        Ipv4Addr::new(192, 168, 50, 3),
        Ipv4Addr::new(192, 168, 50, 62),
        Ipv4Addr::new(192, 168, 50, 17),
    ];

    let mut runs = Vec::new();
    for _ in 0..2 {
        let prober = StubProber::with_jitter(&alive);
        let scan = Scanner::new(prober, config(16)).scan(&networks).await.unwrap();
        runs.push(scan.entries()[0].1.clone());
    }

    let mut expected = alive.to_vec();
    expected.sort_unstable();

    assert_eq!(runs[0], expected);
    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn in_flight_probes_never_exceed_the_concurrency_limit() {
    let networks = vec![Network::parse("10.1.0.0/24", None).unwrap()];
    let prober = StubProber::with_jitter(&[]);

    let limit = 8;
    Scanner::new(prober.clone(), config(limit))
        .scan(&networks)
        .await
        .unwrap();

    assert!(
        prober.max_observed() <= limit,
        "observed {} concurrent probes, limit was {limit}",
        prober.max_observed()
    );
}

#[tokio::test]
async fn network_with_no_live_hosts_yields_empty_list() {
    let networks = vec![Network::parse("172.16.0.0/28", None).unwrap()];
    let prober = StubProber::new(&[]);

    let scan = Scanner::new(prober, config(4)).scan(&networks).await.unwrap();

    assert_eq!(scan.entries().len(), 1);
    assert!(scan.entries()[0].1.is_empty());
    assert_eq!(scan.total_live(), 0);
}

#[tokio::test]
async fn progress_sink_fires_once_per_probed_address() {
    let networks = vec![
        Network::parse("10.0.0.0/30", None).unwrap(),
        Network::parse("10.0.0.4/30", None).unwrap(),
    ];
    let prober = StubProber::new(&[Ipv4Addr::new(10, 0, 0, 2)]);

    let probed = Arc::new(AtomicUsize::new(0));
    let live = Arc::new(AtomicUsize::new(0));
    let sink: rollcall_core::scanner::ProgressSink = {
        let probed = probed.clone();
        let live = live.clone();
        Arc::new(move |_addr, alive| {
            probed.fetch_add(1, Ordering::SeqCst);
            if alive {
                live.fetch_add(1, Ordering::SeqCst);
            }
        })
    };

    Scanner::new(prober, config(4))
        .with_progress(sink)
        .scan(&networks)
        .await
        .unwrap();

    assert_eq!(probed.load(Ordering::SeqCst), 8);
    assert_eq!(live.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn pre_cancelled_scan_dispatches_nothing_and_still_returns() {
    let networks = vec![Network::parse("10.2.0.0/24", None).unwrap()];
    let prober = StubProber::new(&[Ipv4Addr::new(10, 2, 0, 1)]);

    let scanner = Scanner::new(prober.clone(), config(4));
    scanner.cancel_handle().store(true, Ordering::Relaxed);

    let scan = scanner.scan(&networks).await.unwrap();

    // Every requested network is still present in the result.
    assert_eq!(scan.entries().len(), 1);
    assert_eq!(scan.total_live(), 0);
    assert_eq!(prober.max_observed(), 0);
}
