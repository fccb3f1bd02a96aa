//! Inbound requests from the extension UI and their responses.
//!
//! Every failure is caught here, logged once, and turned into
//! `{ "success": false, "error": "<message>" }`.

use serde::{Deserialize, Serialize};
use tabsplit_common::types::SourceTab;
use tabsplit_common::SplitError;
use tracing::{debug, error};

use crate::orchestrator::Orchestrator;
use crate::preference;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    SplitAndTranslate {
        #[serde(default)]
        current_tab: Option<SourceTab>,
        /// Falls back to the stored preference when absent.
        #[serde(default)]
        target_language: Option<String>,
    },
    GetLanguage,
    #[serde(rename_all = "camelCase")]
    SetLanguage { target_language: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            target_language: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            target_language: None,
        }
    }

    pub fn language(code: String) -> Self {
        Self {
            target_language: Some(code),
            ..Self::ok()
        }
    }
}

/// Decode a raw message and dispatch it.
pub async fn handle_message(orch: &Orchestrator, raw: serde_json::Value) -> Response {
    match serde_json::from_value::<Request>(raw) {
        Ok(request) => handle_request(orch, request).await,
        Err(e) => {
            error!("rejected malformed request: {e}");
            Response::failure(format!("malformed request: {e}"))
        }
    }
}

pub async fn handle_request(orch: &Orchestrator, request: Request) -> Response {
    debug!(?request, "handling request");
    let result = match request {
        Request::SplitAndTranslate {
            current_tab,
            target_language,
        } => split(orch, current_tab.as_ref(), target_language).await,
        Request::GetLanguage => orch.preferred_language().await.map(Response::language),
        Request::SetLanguage { target_language } => {
            preference::save_language(orch.store(), &target_language)
                .await
                .map(|()| Response::ok())
        }
    };

    result.unwrap_or_else(|e| {
        error!("request failed: {e}");
        Response::failure(e.to_string())
    })
}

async fn split(
    orch: &Orchestrator,
    current_tab: Option<&SourceTab>,
    target_language: Option<String>,
) -> Result<Response, SplitError> {
    let language = match target_language.filter(|l| !l.is_empty()) {
        Some(language) => language,
        None => orch.preferred_language().await?,
    };
    orch.split_and_translate(current_tab, &language).await?;
    Ok(Response::ok())
}
