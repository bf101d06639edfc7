//! Test pass over every configured model
//!
//! Loads the config once, then hands each complete model entry to a
//! [`ModelTester`] in file order. The exit code only reflects whether a
//! usable config was found; individual model failures are reported in the
//! log and do not change it.

use crate::config::load_config;
use crate::tester::ModelTester;
use std::path::Path;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_CONFIG_ERROR: u8 = 1;

const BANNER: &str = "APIM Access Test - Foundry & KAITO Models";

fn rule(c: char) -> String {
    std::iter::repeat(c).take(60).collect()
}

/// Run the test pass and return the process exit code
pub async fn run(config_path: &Path, tester: &dyn ModelTester) -> u8 {
    tracing::info!("{}", rule('='));
    tracing::info!("{}", BANNER);
    tracing::info!("{}", rule('='));

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    if config.models.is_empty() {
        tracing::error!("No models configured in {}", config_path.display());
        return EXIT_CONFIG_ERROR;
    }

    let prompt = config.test_prompt();
    tracing::info!("Test prompt: {}", prompt);
    tracing::info!("{}", rule('-'));

    for (name, entry) in &config.models {
        let Some(target) = entry.target(name) else {
            tracing::warn!("Skipping {}: missing url or key", name);
            continue;
        };

        tester.test_model(&target, prompt).await;
        tracing::info!("{}", rule('-'));
    }

    tracing::info!("Testing complete!");
    EXIT_SUCCESS
}
