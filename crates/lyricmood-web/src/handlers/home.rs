//! Home page — the empty input form.

use axum::{extract::State, response::Html};

use crate::error::WebError;
use crate::page::IndexPage;
use crate::state::SharedState;

pub async fn home(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    IndexPage::form().render(&state.templates)
}
