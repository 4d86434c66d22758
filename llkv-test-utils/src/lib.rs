//! Test helpers shared by the LLKV page frame crates.

use std::sync::Once;

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset or unparsable.
const DEFAULT_TEST_FILTER: &str = "warn,llkv_page_frame=info,llkv_storage=info";

/// Install a `tracing` subscriber for test binaries. Safe to call from every
/// test; only the first call has an effect.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));
        // A test harness may already have installed a global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}
