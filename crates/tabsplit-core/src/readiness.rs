//! Bounded wait for a tab to finish loading.

use std::time::Duration;

use tabsplit_common::types::{TabId, TabStatus};
use tabsplit_host::BrowserHost;
use tokio::time::Instant;
use tracing::debug;

/// How a wait ended. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Complete,
    TimedOut,
    /// The tab could no longer be looked up (usually closed by the user).
    TabGone,
}

/// Poll `tab_id` every `interval` until it reports `complete`, it
/// disappears, or `timeout` has elapsed.
pub async fn wait_for_tab_complete(
    host: &dyn BrowserHost,
    tab_id: TabId,
    interval: Duration,
    timeout: Duration,
) -> Readiness {
    let deadline = Instant::now() + timeout;
    let mut polls = 0u32;

    loop {
        polls += 1;
        match host.get_tab(tab_id).await {
            Ok(tab) if tab.status == TabStatus::Complete => {
                debug!(%tab_id, polls, "tab complete");
                return Readiness::Complete;
            }
            Ok(_) => {}
            Err(e) => {
                debug!(%tab_id, polls, "tab lookup failed, stop waiting: {e}");
                return Readiness::TabGone;
            }
        }

        let now = Instant::now();
        if now >= deadline {
            debug!(%tab_id, polls, "gave up waiting for tab");
            return Readiness::TimedOut;
        }
        tokio::time::sleep(interval.min(deadline - now)).await;
    }
}
