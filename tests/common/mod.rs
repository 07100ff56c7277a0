use std::sync::Once;
use tracing_subscriber::{self, fmt::format::FmtSpan};

// Backend stubs
pub mod mock;
pub use mock::*;

// Fixtures
pub mod test_utils;
pub use test_utils::*;

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("petopia_lib=debug")
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .compact()
            .try_init();
    });
}
