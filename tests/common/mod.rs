//! Shared helpers for the integration tests.
//!
//! Set `RUST_LOG` (e.g. `osavl=trace`) and build with the `tracing` feature to
//! see engine events in test output.

#![allow(dead_code)]

/// Installs a test-writer subscriber once per test binary.
#[cfg(feature = "cli")]
pub fn init_tracing() {
    use std::sync::Once;

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer};

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact()
            .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));
        let _ = tracing_subscriber::registry().with(layer).try_init();
    });
}

#[cfg(not(feature = "cli"))]
pub fn init_tracing() {}

/// Deterministic pseudo-random values from a fixed-seed LCG.
pub fn random_values_deterministic(n: usize) -> Vec<i64> {
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

/// Tallest an AVL tree of `len` keys can grow. The sparsest tree of height
/// `h` has `fib(h + 2) - 1` keys.
pub fn max_avl_height(len: usize) -> usize {
    let (mut height, mut sparsest, mut next) = (0, 0, 1);
    while next <= len {
        height += 1;
        (sparsest, next) = (next, sparsest + next + 1);
    }
    height
}
