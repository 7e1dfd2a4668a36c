//! Browser sink configuration.

use serde::Deserialize;

/// Browser sink configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowserConfig {
    /// Open each new listing in the default browser.
    #[serde(default)]
    pub enabled: bool,
}
