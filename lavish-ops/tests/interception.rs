//! End-to-end interception behavior: transparency when off, caching,
//! dry runs, and fallback when the model is missing or misbehaving.
//!
//! Every test here mutates the process-wide context, so they serialize
//! on a file-local lock and re-establish the full state they need.

use httpmock::prelude::*;
use num_complex::Complex64;
use num_rational::Rational64;
use parking_lot::Mutex;
use serde_json::json;

use lavish_core::LavishConfig;
use lavish_ops::lavish;

static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Reset the global context: deactivated, default config (plus the
/// test's overrides), empty cache, zeroed dry-run cost.
fn setup(overrides: impl FnOnce(&mut LavishConfig)) {
    lavish_core::deactivate();
    lavish_core::configure(|cfg| {
        *cfg = LavishConfig::default();
        cfg.max_retries = 0;
        cfg.base_delay_secs = 0.0;
        overrides(cfg);
    });
    lavish_core::context().cache().clear();
    lavish_core::context().reset_dry_run_cost();
}

fn chat_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

// ---------------------------------------------------------------------------
// Transparency when off
// ---------------------------------------------------------------------------

#[test]
fn disabled_interception_is_fully_transparent() {
    let _lock = TEST_LOCK.lock();
    setup(|_| {});
    // Never activated: every operator is the native one.

    assert_eq!((lavish(2i64) + lavish(3)).into_inner(), 5);
    assert_eq!((lavish(10i64) - lavish(4)).into_inner(), 6);
    assert_eq!((lavish(6i64) * lavish(7)).into_inner(), 42);
    assert_eq!((lavish(7i64) / lavish(2)).into_inner(), 3.5);
    assert_eq!((lavish(7i64) % lavish(3)).into_inner(), 1);
    assert_eq!(lavish(2i64).pow(lavish(8)).into_inner(), 256);
    assert!(lavish(2i64) < lavish(3));
    assert!(lavish(3i64) >= lavish(3));
    assert_eq!(lavish(2i64).cmp_expensive(&lavish(3)), -1);

    assert_eq!((lavish(1.5f64) + lavish(2.25)).into_inner(), 3.75);
    let half = Rational64::new(1, 2);
    assert_eq!((lavish(half) + lavish(half)).into_inner(), Rational64::from_integer(1));
    let i = Complex64::new(0.0, 1.0);
    assert_eq!((lavish(i) * lavish(i)).into_inner(), Complex64::new(-1.0, 0.0));

    // And none of it touched the pipeline.
    assert!(lavish_core::context().cache().is_empty());
}

#[test]
fn deactivation_restores_native_behavior() {
    let _lock = TEST_LOCK.lock();
    setup(|_| {});
    lavish_ops::activate();
    lavish_ops::deactivate();

    assert_eq!((lavish(2i64) + lavish(2)).into_inner(), 4);
    assert!(lavish_core::context().cache().is_empty());
}

#[test]
fn suppression_scope_bypasses_the_pipeline() {
    let _lock = TEST_LOCK.lock();
    setup(|_| {});
    lavish_ops::activate();

    let sum = lavish_ops::with_native(|| (lavish(2i64) + lavish(3)).into_inner());
    assert_eq!(sum, 5);
    assert!(
        lavish_core::context().cache().is_empty(),
        "suppressed operations must not reach the cache"
    );

    lavish_ops::deactivate();
}

// ---------------------------------------------------------------------------
// Fallback: arithmetic never fails outright
// ---------------------------------------------------------------------------

#[test]
fn missing_credentials_fall_back_to_the_cpu() {
    let _lock = TEST_LOCK.lock();
    setup(|cfg| {
        cfg.dry_run = false;
        cfg.api_key = None;
    });
    lavish_ops::activate();

    assert_eq!((lavish(2i64) + lavish(3)).into_inner(), 5);
    // The intercepted equality also falls back, and still agrees.
    assert!(lavish(2i64) + lavish(3) == lavish(5));

    lavish_ops::deactivate();
}

#[test]
fn remote_failure_falls_back_to_the_cpu() {
    let _lock = TEST_LOCK.lock();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).body("on fire");
    });
    setup(|cfg| {
        cfg.dry_run = false;
        cfg.api_key = Some("sk-test".into());
        cfg.endpoint = server.url("/v1/chat/completions");
    });
    lavish_ops::activate();

    assert_eq!((lavish(3i64) + lavish(5)).into_inner(), 8);
    assert!(mock.hits() >= 1, "the model was consulted before falling back");

    lavish_ops::deactivate();
}

// ---------------------------------------------------------------------------
// Remote mode
// ---------------------------------------------------------------------------

#[test]
fn identical_operations_hit_the_cache_not_the_network() {
    let _lock = TEST_LOCK.lock();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(chat_body("5"));
    });
    setup(|cfg| {
        cfg.dry_run = false;
        cfg.api_key = Some("sk-test".into());
        cfg.endpoint = server.url("/v1/chat/completions");
    });
    lavish_ops::activate();

    assert_eq!((lavish(2i64) + lavish(3)).into_inner(), 5);
    assert_eq!((lavish(2i64) + lavish(3)).into_inner(), 5);
    assert_eq!(mock.hits(), 1, "second call must be served from cache");
    assert_eq!(lavish_core::context().cache().len(), 1);

    lavish_ops::deactivate();
}

#[test]
fn the_models_answer_wins_even_when_wrong() {
    let _lock = TEST_LOCK.lock();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(chat_body("true"));
    });
    setup(|cfg| {
        cfg.dry_run = false;
        cfg.api_key = Some("sk-test".into());
        cfg.endpoint = server.url("/v1/chat/completions");
    });
    lavish_ops::activate();

    // 2 == 3, according to the authority we chose to consult.
    assert!(lavish(2i64) == lavish(3));

    lavish_ops::deactivate();
}

#[test]
fn remote_division_parses_to_float() {
    let _lock = TEST_LOCK.lock();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(chat_body("3.5"));
    });
    setup(|cfg| {
        cfg.dry_run = false;
        cfg.api_key = Some("sk-test".into());
        cfg.endpoint = server.url("/v1/chat/completions");
    });
    lavish_ops::activate();

    let quotient: f64 = (lavish(7i64) / lavish(2)).into_inner();
    assert_eq!(quotient, 3.5);

    lavish_ops::deactivate();
}

#[test]
fn out_of_range_three_way_answers_are_clamped() {
    let _lock = TEST_LOCK.lock();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(chat_body("7"));
    });
    setup(|cfg| {
        cfg.dry_run = false;
        cfg.api_key = Some("sk-test".into());
        cfg.endpoint = server.url("/v1/chat/completions");
    });
    lavish_ops::activate();

    assert_eq!(lavish(9i64).cmp_expensive(&lavish(1)), 1);
    assert!(lavish(9i64) > lavish(1));

    lavish_ops::deactivate();
}

// ---------------------------------------------------------------------------
// Dry runs
// ---------------------------------------------------------------------------

#[test]
fn dry_run_never_alters_correctness() {
    let _lock = TEST_LOCK.lock();
    setup(|cfg| {
        cfg.dry_run = true;
        cfg.use_real_delay = false;
    });
    lavish_ops::activate();

    assert_eq!(lavish(2i64).pow(lavish(8)).into_inner(), 256);
    assert_eq!(
        lavish_core::context().cache().len(),
        1,
        "dry runs still populate the cache"
    );
    assert!(
        lavish_core::context().dry_run_cost() > 0.0,
        "dry runs still account their imaginary spend"
    );

    lavish_ops::deactivate();
}

#[test]
fn dry_run_covers_every_kind() {
    let _lock = TEST_LOCK.lock();
    setup(|cfg| {
        cfg.dry_run = true;
    });
    lavish_ops::activate();

    assert_eq!((lavish(2i64) * lavish(21)).into_inner(), 42);
    assert_eq!((lavish(1.0f64) / lavish(4.0)).into_inner(), 0.25);

    let third = Rational64::new(1, 3);
    assert_eq!(
        (lavish(third) + lavish(third)).into_inner(),
        Rational64::new(2, 3)
    );
    assert!(lavish(third) < lavish(Rational64::new(1, 2)));

    let c = Complex64::new(1.0, 1.0);
    assert_eq!(
        (lavish(c) * lavish(c)).into_inner(),
        Complex64::new(0.0, 2.0)
    );
    assert!(lavish(c) == lavish(c));

    lavish_ops::deactivate();
}

#[test]
fn dry_run_caches_repeated_operations() {
    let _lock = TEST_LOCK.lock();
    setup(|cfg| {
        cfg.dry_run = true;
    });
    lavish_ops::activate();

    let before = lavish_core::context().dry_run_cost();
    let _ = lavish(6i64) + lavish(7);
    let _ = lavish(6i64) + lavish(7);
    let spent = lavish_core::context().dry_run_cost() - before;

    assert_eq!(lavish_core::context().cache().len(), 1);
    assert!(
        (spent - lavish_core::estimate::COST_PER_OPERATION).abs() < 1e-12,
        "the cached repeat must not be billed"
    );

    lavish_ops::deactivate();
}
