//! One-shot notices carried across redirects as query parameters and rendered
//! as banners, standing in for server-side flash messages.

use axum::response::{IntoResponse, Redirect, Response};
use maud::{Markup, html};
use serde::Deserialize;

/// The severity of a notice banner, which decides its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// A confirmation, e.g. a transaction was recorded.
    Success,
    /// A heads-up, e.g. bills due soon.
    Warning,
    /// A recoverable problem, e.g. a missing transaction id.
    Error,
}

impl NoticeLevel {
    /// The query-string token and CSS class for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "sucesso",
            NoticeLevel::Warning => "aviso",
            NoticeLevel::Error => "erro",
        }
    }

    fn from_token(token: &str) -> NoticeLevel {
        match token {
            "aviso" => NoticeLevel::Warning,
            "erro" => NoticeLevel::Error,
            _ => NoticeLevel::Success,
        }
    }
}

/// The notice query parameters accepted by pages that render banners.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    /// The message to show.
    pub notice: Option<String>,
    /// The severity token, defaulting to success.
    pub level: Option<String>,
}

impl NoticeQuery {
    /// The banner for this query, if it carries a message.
    pub fn into_banner(self) -> Option<Markup> {
        let message = self.notice?;
        let level = NoticeLevel::from_token(self.level.as_deref().unwrap_or_default());

        Some(notice_banner(level, &message))
    }
}

/// Redirect to `target` with a notice banner attached as query parameters.
pub fn redirect_with_notice(target: &str, level: NoticeLevel, message: &str) -> Response {
    let query = serde_urlencoded::to_string([("notice", message), ("level", level.as_str())])
        .unwrap_or_default();

    Redirect::to(&format!("{target}?{query}")).into_response()
}

/// Render a notice banner.
pub fn notice_banner(level: NoticeLevel, message: &str) -> Markup {
    html! {
        div class={ "banner " (level.as_str()) } { (message) }
    }
}
