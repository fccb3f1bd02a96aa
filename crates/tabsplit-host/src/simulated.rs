//! In-memory `BrowserHost`.
//!
//! Keeps windows, tabs and displays in a table and mimics the parts of
//! browser behavior the split sequence depends on: new and navigated tabs
//! report `loading` for a few status checks before `complete`, pages can
//! redirect themselves once loaded, and the user can close a tab while
//! it is being watched.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tabsplit_common::types::{
    BrowserWindow, MonitorInfo, Rect, Tab, TabId, TabStatus, WindowBounds, WindowId,
};
use tabsplit_common::HostError;
use tracing::debug;

use super::{BrowserHost, CreateWindow, Result, WindowUpdate};

/// A host operation, as recorded by [`SimulatedBrowser::calls`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    GetWindow(WindowId),
    CreateWindow(Rect),
    UpdateWindow(WindowId, WindowUpdate),
    GetTab(TabId),
    UpdateTab(TabId, String),
    QueryActiveTab,
    Displays,
}

/// Operations that can be made to fail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOp {
    GetWindow,
    CreateWindow,
    UpdateWindow,
    GetTab,
    UpdateTab,
    Displays,
}

#[derive(Debug)]
struct SimTab {
    tab: Tab,
    /// Status checks left before the tab reports `complete`.
    loading_polls: u32,
    /// Status checks left before the tab disappears.
    close_after: Option<u32>,
    redirect_on_load: Option<String>,
}

#[derive(Debug)]
struct SimWindow {
    bounds: WindowBounds,
    tabs: Vec<TabId>,
    focused: bool,
}

#[derive(Debug, Default)]
struct State {
    windows: BTreeMap<WindowId, SimWindow>,
    tabs: BTreeMap<TabId, SimTab>,
    displays: Vec<MonitorInfo>,
    next_window_id: i32,
    next_tab_id: i32,
    load_polls: u32,
    navigation_load_polls: Option<u32>,
    redirect_new_tabs: Option<String>,
    close_new_tabs_after: Option<u32>,
    new_windows_without_tabs: bool,
    hide_new_window_ids: bool,
    failing: HashSet<HostOp>,
    calls: Vec<HostCall>,
}

impl State {
    fn check(&self, op: HostOp) -> Result<()> {
        if self.failing.contains(&op) {
            return Err(HostError::Rejected(format!("simulated {op:?} failure")));
        }
        Ok(())
    }

    fn snapshot(&self, id: WindowId) -> Option<BrowserWindow> {
        let win = self.windows.get(&id)?;
        Some(BrowserWindow {
            id,
            bounds: win.bounds,
            tabs: win
                .tabs
                .iter()
                .filter_map(|t| self.tabs.get(t).map(|s| s.tab.clone()))
                .collect(),
            focused: win.focused,
        })
    }

    fn add_tab(&mut self, window_id: WindowId, url: &str, status: TabStatus) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        let loading_polls = if status == TabStatus::Complete {
            0
        } else {
            self.load_polls
        };
        self.tabs.insert(
            id,
            SimTab {
                tab: Tab {
                    id,
                    window_id,
                    url: Some(url.to_string()),
                    status,
                },
                loading_polls,
                close_after: None,
                redirect_on_load: None,
            },
        );
        id
    }

    fn focus(&mut self, id: WindowId) {
        for (wid, win) in self.windows.iter_mut() {
            win.focused = *wid == id;
        }
    }

    fn remove_tab(&mut self, id: TabId) {
        if let Some(sim) = self.tabs.remove(&id) {
            if let Some(win) = self.windows.get_mut(&sim.tab.window_id) {
                win.tabs.retain(|t| *t != id);
            }
        }
    }
}

/// In-memory browser for tests and dry runs.
#[derive(Debug)]
pub struct SimulatedBrowser {
    state: Mutex<State>,
}

impl Default for SimulatedBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedBrowser {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_window_id: 1,
                next_tab_id: 1,
                load_polls: 2,
                ..State::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| HostError::Rejected(format!("simulated browser poisoned: {e}")))
    }

    fn with_state(self, f: impl FnOnce(&mut State)) -> Self {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
        self
    }

    pub fn with_displays(self, displays: Vec<MonitorInfo>) -> Self {
        self.with_state(|s| s.displays = displays)
    }

    /// Status checks a freshly loaded tab answers with `loading`.
    pub fn with_load_polls(self, polls: u32) -> Self {
        self.with_state(|s| s.load_polls = polls)
    }

    /// Status checks a tab answers with `loading` after `update_tab`.
    /// Defaults to the `with_load_polls` value.
    pub fn with_navigation_load_polls(self, polls: u32) -> Self {
        self.with_state(|s| s.navigation_load_polls = Some(polls))
    }

    /// Tabs opened by `create_window` navigate to `url` once loaded.
    pub fn redirect_new_tabs_to(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.with_state(|s| s.redirect_new_tabs = Some(url))
    }

    /// Tabs opened by `create_window` vanish after `polls` status checks,
    /// as if the user closed them.
    pub fn close_new_tabs_after(self, polls: u32) -> Self {
        self.with_state(|s| s.close_new_tabs_after = Some(polls))
    }

    /// `create_window` returns windows with no tabs.
    pub fn create_windows_without_tabs(self) -> Self {
        self.with_state(|s| s.new_windows_without_tabs = true)
    }

    /// `create_window` reports the new window with id `WindowId::NONE`.
    pub fn hide_new_window_ids(self) -> Self {
        self.with_state(|s| s.hide_new_window_ids = true)
    }

    pub fn fail_on(self, op: HostOp) -> Self {
        self.with_state(|s| {
            s.failing.insert(op);
        })
    }

    /// Open a focused window with one fully loaded tab. Returns the tab.
    pub fn open_window(&self, bounds: WindowBounds, url: &str) -> Result<Tab> {
        let mut state = self.lock()?;
        let window_id = WindowId(state.next_window_id);
        state.next_window_id += 1;
        let tab_id = state.add_tab(window_id, url, TabStatus::Complete);
        state.windows.insert(
            window_id,
            SimWindow {
                bounds,
                tabs: vec![tab_id],
                focused: false,
            },
        );
        state.focus(window_id);
        state
            .tabs
            .get(&tab_id)
            .map(|s| s.tab.clone())
            .ok_or(HostError::TabNotFound(tab_id.0))
    }

    pub fn window(&self, id: WindowId) -> Option<BrowserWindow> {
        self.lock().ok()?.snapshot(id)
    }

    pub fn windows(&self) -> Vec<BrowserWindow> {
        let Ok(state) = self.lock() else {
            return Vec::new();
        };
        state
            .windows
            .keys()
            .filter_map(|id| state.snapshot(*id))
            .collect()
    }

    pub fn tab(&self, id: TabId) -> Option<Tab> {
        self.lock().ok()?.tabs.get(&id).map(|s| s.tab.clone())
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl BrowserHost for SimulatedBrowser {
    async fn get_window(&self, id: WindowId) -> Result<BrowserWindow> {
        let mut state = self.lock()?;
        state.calls.push(HostCall::GetWindow(id));
        state.check(HostOp::GetWindow)?;
        state.snapshot(id).ok_or(HostError::WindowNotFound(id.0))
    }

    async fn create_window(&self, params: CreateWindow) -> Result<BrowserWindow> {
        let mut state = self.lock()?;
        state.calls.push(HostCall::CreateWindow(params.bounds));
        state.check(HostOp::CreateWindow)?;

        let window_id = WindowId(state.next_window_id);
        state.next_window_id += 1;

        let mut tabs = Vec::new();
        if !state.new_windows_without_tabs {
            let tab_id = state.add_tab(window_id, &params.url, TabStatus::Loading);
            let close_after = state.close_new_tabs_after;
            let redirect = state.redirect_new_tabs.clone();
            if let Some(sim) = state.tabs.get_mut(&tab_id) {
                sim.close_after = close_after;
                sim.redirect_on_load = redirect;
            }
            tabs.push(tab_id);
        }

        state.windows.insert(
            window_id,
            SimWindow {
                bounds: params.bounds.into(),
                tabs,
                focused: false,
            },
        );
        if params.focused {
            state.focus(window_id);
        }
        debug!(%window_id, url = %params.url, "simulated window created");
        let mut window = state
            .snapshot(window_id)
            .ok_or(HostError::WindowNotFound(window_id.0))?;
        if state.hide_new_window_ids {
            window.id = WindowId::NONE;
        }
        Ok(window)
    }

    async fn update_window(&self, id: WindowId, update: WindowUpdate) -> Result<BrowserWindow> {
        let mut state = self.lock()?;
        state.calls.push(HostCall::UpdateWindow(id, update.clone()));
        state.check(HostOp::UpdateWindow)?;

        let win = state
            .windows
            .get_mut(&id)
            .ok_or(HostError::WindowNotFound(id.0))?;
        if let Some(bounds) = update.bounds {
            win.bounds = bounds.into();
        }
        if update.focused == Some(true) {
            state.focus(id);
        }
        state.snapshot(id).ok_or(HostError::WindowNotFound(id.0))
    }

    async fn get_tab(&self, id: TabId) -> Result<Tab> {
        let mut state = self.lock()?;
        state.calls.push(HostCall::GetTab(id));
        state.check(HostOp::GetTab)?;

        let closing = {
            let sim = state.tabs.get_mut(&id).ok_or(HostError::TabNotFound(id.0))?;
            match sim.close_after {
                Some(0) => true,
                Some(ref mut left) => {
                    *left -= 1;
                    false
                }
                None => false,
            }
        };
        if closing {
            state.remove_tab(id);
            return Err(HostError::TabNotFound(id.0));
        }

        let sim = state.tabs.get_mut(&id).ok_or(HostError::TabNotFound(id.0))?;
        if sim.loading_polls > 0 {
            sim.loading_polls -= 1;
            sim.tab.status = TabStatus::Loading;
        } else if let Some(target) = sim.redirect_on_load.take() {
            sim.tab.url = Some(target);
            sim.tab.status = TabStatus::Complete;
        } else {
            sim.tab.status = TabStatus::Complete;
        }
        Ok(sim.tab.clone())
    }

    async fn update_tab(&self, id: TabId, url: &str) -> Result<Tab> {
        let mut state = self.lock()?;
        state.calls.push(HostCall::UpdateTab(id, url.to_string()));
        state.check(HostOp::UpdateTab)?;

        let load_polls = state.navigation_load_polls.unwrap_or(state.load_polls);
        let sim = state.tabs.get_mut(&id).ok_or(HostError::TabNotFound(id.0))?;
        sim.tab.url = Some(url.to_string());
        sim.tab.status = TabStatus::Loading;
        sim.loading_polls = load_polls;
        sim.redirect_on_load = None;
        Ok(sim.tab.clone())
    }

    async fn query_active_tab(&self) -> Result<Option<Tab>> {
        let mut state = self.lock()?;
        state.calls.push(HostCall::QueryActiveTab);
        let active = state
            .windows
            .values()
            .find(|w| w.focused)
            .and_then(|w| w.tabs.first())
            .and_then(|t| state.tabs.get(t))
            .map(|s| s.tab.clone());
        Ok(active)
    }

    async fn displays(&self) -> Result<Vec<MonitorInfo>> {
        let mut state = self.lock()?;
        state.calls.push(HostCall::Displays);
        state.check(HostOp::Displays)?;
        Ok(state.displays.clone())
    }
}
