//! Pulls the `lyrics` field out of a submitted form.
//!
//! Accepts `application/x-www-form-urlencoded` and `multipart/form-data`.
//! Repeated fields are allowed and the first `lyrics` value wins, the way
//! browsers and most form parsers treat them.

use std::convert::Infallible;

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use tracing::{debug, warn};

pub const LYRICS_FIELD: &str = "lyrics";

/// What a submission carried in its `lyrics` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsInput {
    Field(String),
    /// The body parsed but had no `lyrics` field.
    Absent,
    /// The body could not be read as a form at all.
    Unreadable { status: StatusCode, reason: String },
}

impl LyricsInput {
    /// The submitted text. Absent and unreadable bodies give an empty string.
    pub fn into_text(self) -> String {
        match self {
            LyricsInput::Field(text) => text,
            LyricsInput::Absent | LyricsInput::Unreadable { .. } => String::new(),
        }
    }

    fn unreadable(status: StatusCode, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            warn!(%status, "form body rejected: {}", reason);
        } else {
            debug!(%status, "unusable form body: {}", reason);
        }
        LyricsInput::Unreadable { status, reason }
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

impl<S> FromRequest<S> for LyricsInput
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            return Ok(from_multipart(req, state).await);
        }

        match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => Ok(pairs
                .into_iter()
                .find(|(name, _)| name == LYRICS_FIELD)
                .map(|(_, value)| LyricsInput::Field(value))
                .unwrap_or(LyricsInput::Absent)),
            Err(rejection) => Ok(LyricsInput::unreadable(rejection.status(), rejection.body_text())),
        }
    }
}

async fn from_multipart<S: Send + Sync>(req: Request, state: &S) -> LyricsInput {
    let mut multipart = match Multipart::from_request(req, state).await {
        Ok(multipart) => multipart,
        Err(rejection) => return LyricsInput::unreadable(rejection.status(), rejection.body_text()),
    };

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(LYRICS_FIELD) => {
                return match field.text().await {
                    Ok(text) => LyricsInput::Field(text),
                    Err(e) => LyricsInput::unreadable(e.status(), e.body_text()),
                };
            }
            Ok(Some(_)) => continue,
            Ok(None) => return LyricsInput::Absent,
            Err(e) => return LyricsInput::unreadable(e.status(), e.body_text()),
        }
    }
}
