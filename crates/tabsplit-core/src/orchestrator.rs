//! The split-and-translate sequence.
//!
//! One invocation runs these steps in order, each suspending on the host:
//! validate the source tab, compute the split, open the duplicate window on
//! the right, shrink the original to the left, record the session, wait for
//! the duplicate to load, send it to the translation service, wait again,
//! and focus it. Nothing is retried and nothing is rolled back: a failure
//! after the duplicate opened leaves that window in place.
//!
//! Concurrent invocations are not serialized. Each opens its own window and
//! the last one to save the session wins.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tabsplit_common::types::{SourceTab, TabId};
use tabsplit_common::{new_correlation_id, SplitError};
use tabsplit_config::TabSplitConfig;
use tabsplit_host::{BrowserHost, CreateWindow, KeyValueStore, WindowUpdate};
use tabsplit_layout::{LayoutEngine, SplitLayout};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::page::PagePolicy;
use crate::preference;
use crate::readiness::{wait_for_tab_complete, Readiness};
use crate::session::{self, SplitSession};
use crate::translate::TranslateTarget;

/// Timing of the two load waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessSettings {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ReadinessSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            timeout: Duration::from_millis(3000),
        }
    }
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitOutcome {
    pub session: SplitSession,
    pub layout: SplitLayout,
    /// URL the duplicate was sent to. `None` when the duplicate had already
    /// landed on a translated page by itself.
    pub translate_url: Option<String>,
}

/// Layout engine tuned by the `[layout]` config section.
pub fn layout_engine(config: &TabSplitConfig) -> LayoutEngine {
    let layout = &config.layout;
    LayoutEngine {
        overlap: layout.overlap,
        min_width: layout.min_width,
        min_height: layout.min_height,
        fallback_width: layout.fallback_width,
        fallback_height: layout.fallback_height,
    }
}

pub struct Orchestrator {
    host: Arc<dyn BrowserHost>,
    store: Arc<dyn KeyValueStore>,
    engine: LayoutEngine,
    policy: PagePolicy,
    target: TranslateTarget,
    readiness: ReadinessSettings,
    default_language: String,
}

impl Orchestrator {
    pub fn new(host: Arc<dyn BrowserHost>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::from_config(host, store, &TabSplitConfig::default())
    }

    pub fn from_config(
        host: Arc<dyn BrowserHost>,
        store: Arc<dyn KeyValueStore>,
        config: &TabSplitConfig,
    ) -> Self {
        Self {
            host,
            store,
            engine: layout_engine(config),
            policy: PagePolicy::from_config(config),
            target: TranslateTarget::from_config(config),
            readiness: ReadinessSettings {
                poll_interval: Duration::from_millis(config.readiness.poll_interval_ms),
                timeout: Duration::from_millis(config.readiness.timeout_ms),
            },
            default_language: config.preferences.default_language.clone(),
        }
    }

    pub fn with_readiness(mut self, readiness: ReadinessSettings) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn host(&self) -> &dyn BrowserHost {
        self.host.as_ref()
    }

    /// The stored language preference, or the configured default.
    pub async fn preferred_language(&self) -> Result<String, SplitError> {
        preference::load_language(self.store(), &self.default_language).await
    }

    /// Duplicate `source` into a right-hand window translated to
    /// `target_language`, moving the original to the left half of its
    /// display.
    pub async fn split_and_translate(
        &self,
        source: Option<&SourceTab>,
        target_language: &str,
    ) -> Result<SplitOutcome, SplitError> {
        let span = info_span!("split", run = %new_correlation_id(), lang = target_language);
        self.run(source, target_language).instrument(span).await
    }

    async fn run(
        &self,
        source: Option<&SourceTab>,
        target_language: &str,
    ) -> Result<SplitOutcome, SplitError> {
        let source = self.policy.check_source_tab(source)?;
        info!(url = %source.url, window = %source.window_id, "starting split");

        let window = self.host.get_window(source.window_id).await?;
        let monitors = match self.host.displays().await {
            Ok(monitors) => monitors,
            Err(e) => {
                warn!("display enumeration unavailable, using window bounds: {e}");
                Vec::new()
            }
        };
        let layout = self.engine.compute_split_layout(&window.bounds, &monitors);

        let duplicate = self
            .host
            .create_window(CreateWindow {
                url: source.url.clone(),
                bounds: layout.right_window,
                focused: false,
            })
            .await?;
        let duplicate_tab = duplicate
            .first_tab()
            .map(|t| t.id)
            .filter(|id| id.is_valid())
            .ok_or_else(|| {
                SplitError::WindowCreation("new window has no usable tab".into())
            })?;
        if !duplicate.id.is_valid() {
            return Err(SplitError::WindowCreation(
                "new window has no usable id".into(),
            ));
        }
        debug!(window = %duplicate.id, tab = %duplicate_tab, "duplicate window opened");

        self.host
            .update_window(source.window_id, WindowUpdate::bounds(layout.left_window))
            .await?;

        session::save_session(
            self.store(),
            &SplitSession {
                original_tab_id: source.tab_id,
                duplicated_tab_id: duplicate_tab,
                target_language: target_language.to_string(),
                original_window_id: source.window_id,
                duplicated_window_id: duplicate.id,
            },
        )
        .await?;

        self.await_ready(duplicate_tab).await;

        let session = session::load_session(self.store()).await?;
        let current = self.host.get_tab(session.duplicated_tab_id).await?;
        if current
            .url
            .as_deref()
            .is_some_and(|u| self.policy.is_translation_page(u))
        {
            info!("duplicate already shows a translation, leaving it as is");
            return Ok(SplitOutcome {
                session,
                layout,
                translate_url: None,
            });
        }

        let translate_url = self.target.url_for(target_language, &source.url);
        self.host
            .update_tab(session.duplicated_tab_id, &translate_url)
            .await?;
        self.await_ready(session.duplicated_tab_id).await;

        self.host
            .update_window(session.duplicated_window_id, WindowUpdate::focus())
            .await?;

        info!(url = %translate_url, "split complete");
        Ok(SplitOutcome {
            session,
            layout,
            translate_url: Some(translate_url),
        })
    }

    async fn await_ready(&self, tab: TabId) -> Readiness {
        let readiness = wait_for_tab_complete(
            self.host(),
            tab,
            self.readiness.poll_interval,
            self.readiness.timeout,
        )
        .await;
        if readiness != Readiness::Complete {
            debug!(?readiness, %tab, "continuing without a complete load");
        }
        readiness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tabsplit_common::types::{MonitorInfo, Rect, TabId, TabStatus, WindowBounds, WindowId};
    use tabsplit_common::HostError;
    use tabsplit_host::simulated::{HostCall, HostOp};
    use tabsplit_host::{MemoryStore, SimulatedBrowser, StorageArea};

    const FAST: ReadinessSettings = ReadinessSettings {
        poll_interval: Duration::from_millis(1),
        timeout: Duration::from_millis(50),
    };

    fn dual_monitors() -> Vec<MonitorInfo> {
        vec![
            MonitorInfo::new("a", Rect::new(0, 0, 1920, 1080)),
            MonitorInfo::new("b", Rect::new(1920, 0, 1920, 1080)),
        ]
    }

    fn setup(browser: SimulatedBrowser, url: &str) -> (Arc<SimulatedBrowser>, Arc<MemoryStore>, SourceTab) {
        let browser = Arc::new(browser);
        let tab = browser
            .open_window(WindowBounds::from(Rect::new(2400, 300, 800, 600)), url)
            .unwrap();
        (browser, Arc::new(MemoryStore::new()), SourceTab::from(&tab))
    }

    fn orchestrator(browser: &Arc<SimulatedBrowser>, store: &Arc<MemoryStore>) -> Orchestrator {
        Orchestrator::new(browser.clone(), store.clone()).with_readiness(FAST)
    }

    #[tokio::test]
    async fn splits_and_translates_on_second_monitor() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new().with_displays(dual_monitors()),
            "https://example.com/a?b=1",
        );
        let orch = orchestrator(&browser, &store);

        let outcome = orch.split_and_translate(Some(&source), "ja").await.unwrap();

        let original = browser.window(source.window_id.unwrap()).unwrap();
        assert_eq!(original.bounds.resolve(0, 0), Rect::new(1920, 0, 968, 1080));

        let duplicate = browser.window(outcome.session.duplicated_window_id).unwrap();
        assert_eq!(duplicate.bounds.resolve(0, 0), Rect::new(2872, 0, 968, 1080));
        assert!(duplicate.focused);
        assert!(!original.focused);

        let expected =
            "https://translate.google.com/translate?sl=auto&tl=ja&u=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1";
        assert_eq!(outcome.translate_url.as_deref(), Some(expected));
        let dup_tab = browser.tab(outcome.session.duplicated_tab_id).unwrap();
        assert_eq!(dup_tab.url.as_deref(), Some(expected));
    }

    #[tokio::test]
    async fn session_records_both_windows() {
        let (browser, store, source) = setup(SimulatedBrowser::new(), "https://example.com");
        let orch = orchestrator(&browser, &store);

        let outcome = orch.split_and_translate(Some(&source), "de").await.unwrap();
        let stored = session::load_session(store.as_ref()).await.unwrap();

        assert_eq!(stored, outcome.session);
        assert_eq!(stored.original_tab_id, source.id.unwrap());
        assert_eq!(stored.original_window_id, source.window_id.unwrap());
        assert_eq!(stored.target_language, "de");
        assert_ne!(stored.duplicated_window_id, stored.original_window_id);
    }

    #[tokio::test]
    async fn host_calls_follow_sequence() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new().with_load_polls(0),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let outcome = orch.split_and_translate(Some(&source), "ja").await.unwrap();

        let window = source.window_id.unwrap();
        let dup_window = outcome.session.duplicated_window_id;
        let dup_tab = outcome.session.duplicated_tab_id;
        let layout = outcome.layout;
        assert_eq!(
            browser.calls(),
            vec![
                HostCall::GetWindow(window),
                HostCall::Displays,
                HostCall::CreateWindow(layout.right_window),
                HostCall::UpdateWindow(window, WindowUpdate::bounds(layout.left_window)),
                HostCall::GetTab(dup_tab),
                HostCall::GetTab(dup_tab),
                HostCall::UpdateTab(dup_tab, outcome.translate_url.clone().unwrap()),
                HostCall::GetTab(dup_tab),
                HostCall::UpdateWindow(dup_window, WindowUpdate::focus()),
            ]
        );
    }

    #[tokio::test]
    async fn no_monitors_uses_window_bounds() {
        let browser = Arc::new(SimulatedBrowser::new());
        let tab = browser
            .open_window(WindowBounds::from(Rect::new(100, 50, 200, 150)), "https://example.com")
            .unwrap();
        let store = Arc::new(MemoryStore::new());
        let orch = orchestrator(&browser, &store);

        let outcome = orch
            .split_and_translate(Some(&SourceTab::from(&tab)), "ja")
            .await
            .unwrap();
        assert_eq!(outcome.layout.left_window, Rect::new(100, 50, 208, 300));
    }

    #[tokio::test]
    async fn display_failure_is_not_fatal() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new().fail_on(HostOp::Displays),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let outcome = orch.split_and_translate(Some(&source), "ja").await.unwrap();
        assert_eq!(outcome.layout.display, Rect::new(2400, 300, 800, 600));
    }

    #[tokio::test]
    async fn unsupported_page_touches_nothing() {
        let (browser, store, source) = setup(SimulatedBrowser::new(), "chrome://extensions/");
        let orch = orchestrator(&browser, &store);

        let err = orch.split_and_translate(Some(&source), "ja").await.unwrap_err();
        assert!(matches!(err, SplitError::UnsupportedPage(_)));
        assert!(browser.calls().is_empty());
        assert!(store.is_empty(StorageArea::Local));
    }

    #[tokio::test]
    async fn missing_tab_is_invalid() {
        let browser = Arc::new(SimulatedBrowser::new());
        let store = Arc::new(MemoryStore::new());
        let orch = orchestrator(&browser, &store);
        let err = orch.split_and_translate(None, "ja").await.unwrap_err();
        assert!(matches!(err, SplitError::InvalidTab(_)));
    }

    #[tokio::test]
    async fn window_without_tab_is_creation_error() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new().create_windows_without_tabs(),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let err = orch.split_and_translate(Some(&source), "ja").await.unwrap_err();
        assert!(matches!(err, SplitError::WindowCreation(_)));
        assert!(store.is_empty(StorageArea::Local));
    }

    #[tokio::test]
    async fn resize_failure_leaves_duplicate_open() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new().fail_on(HostOp::UpdateWindow),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let err = orch.split_and_translate(Some(&source), "ja").await.unwrap_err();

        assert!(matches!(err, SplitError::Host(HostError::Rejected(_))));
        assert_eq!(browser.windows().len(), 2);
        assert!(store.is_empty(StorageArea::Local));
    }

    #[tokio::test]
    async fn unknown_window_fails_with_host_message() {
        let browser = Arc::new(SimulatedBrowser::new());
        let store = Arc::new(MemoryStore::new());
        let orch = orchestrator(&browser, &store);
        let source = SourceTab {
            id: Some(TabId(1)),
            url: Some("https://example.com".into()),
            window_id: Some(WindowId(77)),
        };
        let err = orch.split_and_translate(Some(&source), "ja").await.unwrap_err();
        assert_eq!(err.to_string(), "No window with id: 77");
    }

    #[tokio::test]
    async fn already_translated_duplicate_is_left_alone() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new()
                .with_load_polls(1)
                .redirect_new_tabs_to("https://example-com.translate.goog/?_x_tr_tl=ja"),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let outcome = orch.split_and_translate(Some(&source), "ja").await.unwrap();

        assert!(outcome.translate_url.is_none());
        assert!(!browser
            .calls()
            .iter()
            .any(|c| matches!(c, HostCall::UpdateTab(..))));
        let dup = browser.window(outcome.session.duplicated_window_id).unwrap();
        assert!(!dup.focused);
    }

    #[tokio::test]
    async fn slow_page_still_navigates_after_timeout() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new().with_load_polls(u32::MAX),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let outcome = orch.split_and_translate(Some(&source), "ko").await.unwrap();

        let tab = browser.tab(outcome.session.duplicated_tab_id).unwrap();
        assert!(tab.url.unwrap().contains("&tl=ko&"));
    }

    #[tokio::test]
    async fn closed_duplicate_fails_on_reread() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new()
                .with_load_polls(u32::MAX)
                .close_new_tabs_after(1),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let err = orch.split_and_translate(Some(&source), "ja").await.unwrap_err();
        assert!(matches!(err, SplitError::Host(HostError::TabNotFound(_))));
    }

    #[tokio::test]
    async fn window_without_valid_id_is_creation_error() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new().hide_new_window_ids(),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let err = orch.split_and_translate(Some(&source), "ja").await.unwrap_err();

        assert!(matches!(err, SplitError::WindowCreation(_)));
        assert!(store.is_empty(StorageArea::Local));
        let original = browser.window(source.window_id.unwrap()).unwrap();
        assert_eq!(original.bounds.resolve(0, 0), Rect::new(2400, 300, 800, 600));
        assert!(!browser
            .calls()
            .iter()
            .any(|c| matches!(c, HostCall::UpdateWindow(..))));
    }

    #[tokio::test]
    async fn navigation_timeout_still_focuses_duplicate() {
        let (browser, store, source) = setup(
            SimulatedBrowser::new()
                .with_load_polls(0)
                .with_navigation_load_polls(u32::MAX),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let outcome = orch.split_and_translate(Some(&source), "ja").await.unwrap();

        let dup_tab = outcome.session.duplicated_tab_id;
        let calls = browser.calls();
        let navigated = calls
            .iter()
            .position(|c| matches!(c, HostCall::UpdateTab(..)))
            .unwrap();
        let polls_after = calls[navigated..]
            .iter()
            .filter(|c| **c == HostCall::GetTab(dup_tab))
            .count();
        assert!(polls_after > 1);
        assert_eq!(
            calls.last(),
            Some(&HostCall::UpdateWindow(
                outcome.session.duplicated_window_id,
                WindowUpdate::focus()
            ))
        );
        assert_eq!(browser.tab(dup_tab).unwrap().status, TabStatus::Loading);
        assert!(browser.window(outcome.session.duplicated_window_id).unwrap().focused);
    }

    #[tokio::test]
    async fn duplicate_closed_during_navigation_still_focuses() {
        // Status checks 1 and 2 (first wait, re-read) succeed; the third,
        // inside the navigation wait, finds the tab gone.
        let (browser, store, source) = setup(
            SimulatedBrowser::new()
                .with_load_polls(0)
                .close_new_tabs_after(2),
            "https://example.com",
        );
        let orch = orchestrator(&browser, &store);
        let outcome = orch.split_and_translate(Some(&source), "ja").await.unwrap();

        assert!(outcome.translate_url.is_some());
        assert!(browser.tab(outcome.session.duplicated_tab_id).is_none());
        let dup = browser.window(outcome.session.duplicated_window_id).unwrap();
        assert!(dup.focused);
        assert!(dup.tabs.is_empty());
    }

    #[tokio::test]
    async fn second_run_overwrites_session() {
        let (browser, store, source) = setup(SimulatedBrowser::new(), "https://example.com");
        let orch = orchestrator(&browser, &store);

        let first = orch.split_and_translate(Some(&source), "ja").await.unwrap();
        let second = orch.split_and_translate(Some(&source), "fr").await.unwrap();

        assert_ne!(
            first.session.duplicated_window_id,
            second.session.duplicated_window_id
        );
        assert_eq!(browser.windows().len(), 3);

        let stored = session::load_session(store.as_ref()).await.unwrap();
        assert_eq!(stored, second.session);
        assert_eq!(store.len(StorageArea::Local), 1);
    }

    /// Accepts writes and forgets them.
    struct ForgetfulStore;

    #[async_trait]
    impl KeyValueStore for ForgetfulStore {
        async fn get(
            &self,
            _area: StorageArea,
            _key: &str,
        ) -> tabsplit_host::Result<Option<serde_json::Value>> {
            Ok(None)
        }

        async fn set(
            &self,
            _area: StorageArea,
            _key: &str,
            _value: serde_json::Value,
        ) -> tabsplit_host::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn lost_session_is_fatal() {
        let browser = Arc::new(SimulatedBrowser::new());
        let tab = browser
            .open_window(WindowBounds::default(), "https://example.com")
            .unwrap();
        let orch = Orchestrator::new(browser.clone(), Arc::new(ForgetfulStore)).with_readiness(FAST);

        let err = orch
            .split_and_translate(Some(&SourceTab::from(&tab)), "ja")
            .await
            .unwrap_err();
        assert!(matches!(err, SplitError::SessionNotFound));
    }

    #[tokio::test]
    async fn preferred_language_defaults_from_config() {
        let browser = Arc::new(SimulatedBrowser::new());
        let store = Arc::new(MemoryStore::new());
        let mut config = TabSplitConfig::default();
        config.preferences.default_language = "es".into();
        let orch = Orchestrator::from_config(browser, store.clone(), &config);

        assert_eq!(orch.preferred_language().await.unwrap(), "es");
        preference::save_language(store.as_ref(), "ja").await.unwrap();
        assert_eq!(orch.preferred_language().await.unwrap(), "ja");
    }
}
