use super::*;
use crate::test_support::{advance_ms, Call, Probe};

#[tokio::test(start_paused = true)]
async fn window_fires_once_and_resets_the_rest() {
    let probe = Probe::default();
    let throttle = Throttle::new(probe.config(100)).expect("throttle");

    for _ in 0..4 {
        throttle.trigger();
        advance_ms(10).await;
    }
    assert_eq!(probe.fires(), 0);
    assert_eq!(probe.resets(), 3);

    advance_ms(62).await;
    assert_eq!(
        probe.calls(),
        vec![Call::Reset, Call::Reset, Call::Reset, Call::Fire]
    );
}

#[tokio::test(start_paused = true)]
async fn fire_is_scheduled_from_first_trigger_not_last() {
    let probe = Probe::default();
    let throttle = Throttle::new(probe.config(100)).expect("throttle");

    throttle.trigger();
    advance_ms(90).await;
    throttle.trigger();

    // t=101: only the first trigger's schedule has elapsed
    advance_ms(11).await;
    assert_eq!(probe.fires(), 1);
    assert_eq!(probe.resets(), 1);

    advance_ms(200).await;
    assert_eq!(probe.fires(), 1);
}

#[tokio::test(start_paused = true)]
async fn callback_is_not_immediate() {
    let probe = Probe::default();
    let throttle = Throttle::new(probe.config(50)).expect("throttle");

    throttle.trigger();
    assert_eq!(probe.fires(), 0);
    advance_ms(49).await;
    assert_eq!(probe.fires(), 0);
    advance_ms(2).await;
    assert_eq!(probe.fires(), 1);
}

#[tokio::test(start_paused = true)]
async fn expiry_opens_a_new_window() {
    let probe = Probe::default();
    let throttle = Throttle::new(probe.config(100)).expect("throttle");

    throttle.trigger();
    advance_ms(50).await;
    throttle.trigger();
    advance_ms(70).await;

    // t=120, first window closed at t=100
    throttle.trigger();
    advance_ms(30).await;
    throttle.trigger();
    advance_ms(80).await;

    assert_eq!(probe.fires(), 2);
    assert_eq!(probe.resets(), 2);
}

#[tokio::test(start_paused = true)]
async fn default_delay_is_one_second() {
    let probe = Probe::default();
    let throttle = Throttle::new(ControllerConfig::new().callback({
        let probe = probe.clone();
        move || probe.record(Call::Fire)
    }))
    .expect("throttle");

    throttle.trigger();
    advance_ms(999).await;
    assert_eq!(probe.fires(), 0);
    advance_ms(2).await;
    assert_eq!(probe.fires(), 1);
}
