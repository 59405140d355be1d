//! `[render]` section configuration.
//!
//! Passed to the renderer adapter when it is constructed.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[render]` section in folio.toml - settings for the template hand-off.
///
/// # Example
/// ```toml
/// [render]
/// default_layout = "post"
/// pretty = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Layout given to documents that do not declare one.
    #[serde(default = "defaults::render::default_layout")]
    #[educe(Default = defaults::render::default_layout())]
    pub default_layout: String,

    /// Pretty-print JSON output.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub pretty: bool,
}
