//! lyricmood-web — Web front-end for lyric mood prediction.
//! Serves:
//!   - the lyrics input form (GET /)
//!   - mood prediction from submitted lyrics (POST /predict)
//!   - the page stylesheet (GET /static/...)

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod page;
pub mod router;
pub mod state;
