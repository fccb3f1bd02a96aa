//! Subcommand handlers. Each returns the JSON or text to print.

use std::sync::Arc;

use serde_json::json;
use tabsplit_common::types::{MonitorInfo, Rect, SourceTab, WindowBounds};
use tabsplit_common::{SplitError, TabSplitError};
use tabsplit_config::TabSplitConfig;
use tabsplit_core::{handle_message, layout_engine, session, Orchestrator, TranslateTarget};
use tabsplit_host::{BrowserHost, MemoryStore, SimulatedBrowser};
use tracing::info;

fn monitors_from(rects: &[Rect]) -> Vec<MonitorInfo> {
    rects
        .iter()
        .enumerate()
        .map(|(i, r)| MonitorInfo {
            is_primary: i == 0,
            ..MonitorInfo::new(format!("monitor-{i}"), *r)
        })
        .collect()
}

fn pretty(value: &impl serde::Serialize) -> Result<String, TabSplitError> {
    Ok(serde_json::to_string_pretty(value).map_err(SplitError::from)?)
}

pub fn layout(
    config: &TabSplitConfig,
    window: Rect,
    monitors: &[Rect],
) -> Result<String, TabSplitError> {
    let engine = layout_engine(config);
    let layout = engine.compute_split_layout(&WindowBounds::from(window), &monitors_from(monitors));
    pretty(&layout)
}

pub fn url(config: &TabSplitConfig, page: &str, lang: Option<&str>) -> String {
    let lang = lang.unwrap_or(&config.preferences.default_language);
    TranslateTarget::from_config(config).url_for(lang, page)
}

/// Options for a dry run against the in-memory browser.
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub url: String,
    pub lang: Option<String>,
    pub window: Rect,
    pub monitors: Vec<Rect>,
    pub redirect: Option<String>,
}

/// Open one window holding `opts.url`, send a `splitAndTranslate` message
/// for it, and report the response, every window and the stored session.
pub async fn simulate(
    config: &TabSplitConfig,
    opts: SimulateOptions,
) -> Result<serde_json::Value, TabSplitError> {
    let mut browser = SimulatedBrowser::new().with_displays(monitors_from(&opts.monitors));
    if let Some(target) = opts.redirect {
        browser = browser.redirect_new_tabs_to(target);
    }
    let browser = Arc::new(browser);
    let store = Arc::new(MemoryStore::new());

    browser.open_window(WindowBounds::from(opts.window), &opts.url)?;
    // The popup asks the host for the active tab, so the dry run does too.
    let tab = browser
        .query_active_tab()
        .await?
        .ok_or_else(|| TabSplitError::Other("simulated browser has no active tab".into()))?;
    info!(tab = %tab.id, window = %tab.window_id, "simulated source tab opened");

    let orch = Orchestrator::from_config(browser.clone(), store.clone(), config);
    let mut message = json!({
        "action": "splitAndTranslate",
        "currentTab": SourceTab::from(&tab),
    });
    if let Some(lang) = opts.lang {
        message["targetLanguage"] = json!(lang);
    }

    let response = handle_message(&orch, message).await;
    let session = match session::load_session(store.as_ref()).await {
        Ok(s) => serde_json::to_value(s).map_err(SplitError::from)?,
        Err(SplitError::SessionNotFound) => serde_json::Value::Null,
        Err(e) => return Err(e.into()),
    };

    Ok(json!({
        "response": response,
        "windows": browser.windows(),
        "session": session,
    }))
}
