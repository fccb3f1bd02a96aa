//! Split-and-translate for Tabsplit.
//!
//! Provides:
//! - Source-tab validation against blocked and already-translated pages
//! - Translate URL construction
//! - The persisted split session record
//! - Bounded load polling
//! - The stored target-language preference
//! - The orchestrator that runs the whole sequence
//! - Decoding and answering inbound UI messages

pub mod message;
pub mod orchestrator;
pub mod page;
pub mod preference;
pub mod readiness;
pub mod session;
pub mod translate;

pub use message::{handle_message, handle_request, Request, Response};
pub use orchestrator::{layout_engine, Orchestrator, ReadinessSettings, SplitOutcome};
pub use page::{PagePolicy, ValidatedTab};
pub use readiness::{wait_for_tab_complete, Readiness};
pub use session::{SplitSession, SESSION_KEY};
pub use translate::{build_translate_url, TranslateTarget};
