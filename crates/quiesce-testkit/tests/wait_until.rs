//! End-to-end poller behavior through the public surface.

use quiesce_core::{wait_until, WaitOptions};
use quiesce_testkit::init_test_tracing;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn default_timeout_is_one_second_of_scheduled_delay() {
    init_test_tracing();

    let start = tokio::time::Instant::now();
    let err = wait_until(|| None::<()>, WaitOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.to_string(), "wait_until timed out");
    // The ramp contributes 0+1+2+5+7 = 15ms; constant 10ms polls then
    // carry the accumulated delay to the first value >= 1000ms.
    assert_eq!(start.elapsed(), Duration::from_millis(1005));
}

#[tokio::test(start_paused = true)]
async fn resolves_when_a_background_task_flips_the_condition() {
    init_test_tracing();

    let done = Arc::new(AtomicBool::new(false));
    let flipper = tokio::spawn({
        let done = done.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(4)).await;
            done.store(true, Ordering::SeqCst);
        }
    });

    let observed = done.clone();
    let value = wait_until(
        move || observed.load(Ordering::SeqCst).then_some("ready"),
        WaitOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(value, "ready");
    flipper.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn timeout_message_names_the_operation_that_started_the_wait() {
    init_test_tracing();

    let err = wait_until(
        || None::<()>,
        WaitOptions::default()
            .with_timeout(Duration::from_millis(3))
            .with_timeout_message("sidebar never appeared"),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "sidebar never appeared");
}
