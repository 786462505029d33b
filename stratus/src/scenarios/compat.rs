//! Backwards-compatible argument handling.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use stratus_core::BootParams;
use tracing::warn;

/// Server-boot arguments as supplied by harness config.
///
/// `server_params` is a deprecated alias for `boot_server_params`, kept so
/// configs written before 0.3.2 keep working; it will be removed in 0.5.0.
/// When both are present the canonical field wins.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BootArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_server_params: Option<BootParams>,
    /// Deprecated alias for `boot_server_params`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_params: Option<BootParams>,
}

static ALIAS_WARNED: AtomicBool = AtomicBool::new(false);

impl BootArgs {
    /// Resolve to concrete boot params, preferring the canonical field.
    ///
    /// The first use of the deprecated alias in a process logs a warning;
    /// later uses are silent. [`reset_alias_warning`] rearms it.
    pub fn resolved(&self) -> BootParams {
        match (&self.boot_server_params, &self.server_params) {
            (Some(params), _) => params.clone(),
            (None, Some(params)) => {
                if !ALIAS_WARNED.swap(true, Ordering::Relaxed) {
                    warn!(
                        "'server_params' has been renamed 'boot_server_params' \
                         and will be removed in 0.5.0"
                    );
                }
                params.clone()
            }
            (None, None) => BootParams::default(),
        }
    }
}

/// Rearm the one-shot deprecation warning.
///
/// The warned flag is process-scoped; call this between test runs that
/// assert on the warning.
pub fn reset_alias_warning() {
    ALIAS_WARNED.store(false, Ordering::Relaxed);
}
