//! Lyrics submission: text → features → label id → mood name.

use axum::{extract::State, response::Html};
use tracing::{debug, warn};

use lyricmood_model::ArtifactBundle;

use crate::error::WebError;
use crate::extract::LyricsInput;
use crate::page::IndexPage;
use crate::state::{AppState, SharedState};

pub const MODEL_NOT_LOADED: &str = "Model not loaded properly. Please check your files.";
pub const EMPTY_INPUT: &str = "Please enter some lyrics before predicting!";
pub const PREDICTION_FAILURE: &str = "Something went wrong while predicting";

/// POST /predict. Always answers with the page; problems show inline.
pub async fn predict(
    State(state): State<SharedState>,
    input: LyricsInput,
) -> Result<Html<String>, WebError> {
    classify(&state, input.into_text()).render(&state.templates)
}

/// Decide what the page shows for one submission.
pub fn classify(state: &AppState, lyrics: String) -> IndexPage {
    let artifacts = match &state.bundle {
        ArtifactBundle::Loaded(artifacts) => artifacts,
        ArtifactBundle::Unavailable { reason } => {
            debug!("prediction requested without loaded artifacts");
            return if state.debug {
                IndexPage::with_error(format!("{MODEL_NOT_LOADED} ({reason})"))
            } else {
                IndexPage::with_error(MODEL_NOT_LOADED)
            };
        }
    };

    if lyrics.trim().is_empty() {
        return IndexPage::with_error(EMPTY_INPUT);
    }

    match artifacts.predict(&lyrics) {
        Ok(mood) => {
            debug!(mood = %mood, chars = lyrics.chars().count(), "predicted mood");
            IndexPage::with_prediction(lyrics, mood)
        }
        Err(e) => {
            warn!(error = %e, "prediction failed");
            IndexPage::with_error(format!("{PREDICTION_FAILURE}: {e}"))
        }
    }
}
