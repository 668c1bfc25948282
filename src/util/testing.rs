use std::env;
use std::sync::Once;

use tracing::info;

use crate::config::Settings;
use crate::util::logging::init_logging;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "pdf_outlines=trace");
        }
        // global logging subscriber, used by all tracing log macros
        init_logging(&Settings::default());
        info!("Test Setup complete");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }
}
