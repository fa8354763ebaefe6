//! Tests for request/synchronizer

use super::*;
use proptest::prelude::*;
use std::time::Duration;

type Synchronizer = RequestSynchronizer<String, String>;

fn delayed(value: &str, ms: u64) -> impl Future<Output = Result<String, String>> + Send + 'static {
    let value = value.to_string();
    async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(value)
    }
}

fn panicking(after_ms: u64) -> impl Future<Output = Result<String, String>> + Send + 'static {
    async move {
        tokio::time::sleep(Duration::from_millis(after_ms)).await;
        let fail = true;
        if fail {
            panic!("fetch failed");
        }
        Ok(String::new())
    }
}

async fn settle(sync: &mut Synchronizer) -> Vec<Result<Resolution, String>> {
    let mut resolutions = Vec::new();
    while let Some(resolution) = sync.next_resolution().await {
        resolutions.push(resolution);
    }
    resolutions
}

#[tokio::test(start_paused = true)]
async fn test_single_request_is_published() {
    let mut sync = Synchronizer::default();
    let ticket = sync.issue(|_| delayed("a", 10));
    assert_eq!(ticket.seq(), 1);
    assert!(sync.is_pending());

    let resolution = sync.next_resolution().await.unwrap();
    assert_eq!(resolution, Ok(Resolution::Published { seq: 1 }));
    assert_eq!(sync.current(), Some(&"a".to_string()));
    assert!(!sync.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_request_cannot_overwrite_fast_later_one() {
    let mut sync = Synchronizer::default();
    sync.issue(|_| delayed("slow", 300));
    sync.issue(|_| delayed("fast", 10));

    let resolutions = settle(&mut sync).await;
    assert_eq!(
        resolutions,
        vec![
            Ok(Resolution::Published { seq: 2 }),
            Ok(Resolution::Stale { seq: 1 }),
        ]
    );
    assert_eq!(sync.current(), Some(&"fast".to_string()));
    assert_eq!(sync.current_seq(), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_earlier_result_is_stale_even_when_latest_not_resolved() {
    let mut sync = Synchronizer::default();
    sync.issue(|_| delayed("first", 10));
    sync.issue(|_| delayed("second", 50));

    let first = sync.next_resolution().await.unwrap();
    assert_eq!(first, Ok(Resolution::Stale { seq: 1 }));
    assert!(sync.current().is_none());
    assert!(sync.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_latest_error_is_forwarded_unmodified() {
    let mut sync = Synchronizer::default();
    sync.issue(|_| async { Err::<String, _>("backend down".to_string()) });

    let resolution = sync.next_resolution().await.unwrap();
    assert_eq!(resolution, Err("backend down".to_string()));
    assert!(!sync.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_stale_error_is_discarded() {
    let mut sync = Synchronizer::default();
    sync.issue(|_| async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Err::<String, _>("old failure".to_string())
    });
    sync.issue(|_| delayed("ok", 10));

    let resolutions = settle(&mut sync).await;
    assert!(resolutions.iter().all(|r| r.is_ok()));
    assert_eq!(sync.current(), Some(&"ok".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_next_resolution_returns_none_when_idle() {
    let mut sync = Synchronizer::default();
    assert!(sync.next_resolution().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_ticket_reports_supersession() {
    let mut sync = Synchronizer::default();
    let first = sync.issue(|_| delayed("a", 10));
    assert!(!first.is_superseded());
    let second = sync.issue(|_| delayed("b", 10));
    assert!(first.is_superseded());
    assert!(!second.is_superseded());
    settle(&mut sync).await;
}

#[tokio::test(start_paused = true)]
async fn test_abort_mode_cancels_superseded_task() {
    let mut sync = Synchronizer::new(true);
    sync.issue(|_| delayed("never", 1000));
    sync.issue(|_| delayed("kept", 10));

    let resolutions = settle(&mut sync).await;
    assert_eq!(resolutions.len(), 2);
    assert!(resolutions.contains(&Ok(Resolution::Stale { seq: 1 })));
    assert!(resolutions.contains(&Ok(Resolution::Published { seq: 2 })));
    assert_eq!(sync.current(), Some(&"kept".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_drain_applies_only_arrived_completions() {
    let mut sync = Synchronizer::default();
    sync.issue(|_| delayed("a", 10));
    assert!(sync.drain().is_empty());

    tokio::time::sleep(Duration::from_millis(20)).await;
    let resolutions = sync.drain();
    assert_eq!(resolutions, vec![Ok(Resolution::Published { seq: 1 })]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_drops_published_value() {
    let mut sync = Synchronizer::default();
    sync.issue(|_| delayed("a", 10));
    settle(&mut sync).await;
    sync.clear();
    assert!(sync.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_panicking_latest_fetch_resolves_instead_of_hanging() {
    let mut sync = Synchronizer::default();
    sync.issue(|_| panicking(10));

    let resolution = tokio::time::timeout(Duration::from_secs(3600), sync.next_resolution())
        .await
        .expect("resolution after panic");

    assert_eq!(resolution, Some(Ok(Resolution::Stale { seq: 1 })));
    assert_eq!(sync.outstanding(), 0);
    assert!(!sync.is_pending());
    assert!(sync.current().is_none());
    assert_eq!(sync.next_resolution().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_panicking_stale_fetch_does_not_block_latest() {
    let mut sync = Synchronizer::default();
    sync.issue(|_| panicking(50));
    sync.issue(|_| delayed("b", 10));

    let resolutions = settle(&mut sync).await;

    assert_eq!(
        resolutions,
        vec![
            Ok(Resolution::Published { seq: 2 }),
            Ok(Resolution::Stale { seq: 1 }),
        ]
    );
    assert_eq!(sync.current(), Some(&"b".to_string()));
}

// For any permutation of completion delays, the published value is the one
// from the request issued last.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_last_issued_wins_for_any_resolution_order(
        delays in Just((1u64..=8).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        let (current, latest) = runtime.block_on(async {
            let mut sync = Synchronizer::default();
            for (i, delay) in delays.iter().enumerate() {
                let value = format!("response-{}", i + 1);
                sync.issue(|_| delayed(&value, delay * 10));
            }
            settle(&mut sync).await;
            (sync.current().cloned(), sync.latest_issued())
        });

        prop_assert_eq!(latest, delays.len() as u64);
        prop_assert_eq!(current, Some(format!("response-{}", delays.len())));
    }
}
