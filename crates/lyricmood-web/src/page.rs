//! The single HTML page, rendered from `templates/index.html`.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::WebError;

pub const INDEX_TEMPLATE: &str = "index.html";

/// Build the template environment. HTML auto-escaping applies because of
/// the `.html` template name.
pub fn environment() -> Result<Environment<'static>, WebError> {
    let mut env = Environment::new();
    env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
    Ok(env)
}

/// Values shown on the index page. Every field is optional; the bare form
/// has none set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IndexPage {
    pub fn form() -> Self {
        Self::default()
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_prediction(lyrics: impl Into<String>, prediction: impl Into<String>) -> Self {
        Self {
            lyrics: Some(lyrics.into()),
            prediction: Some(prediction.into()),
            error: None,
        }
    }

    pub fn render(&self, env: &Environment<'_>) -> Result<Html<String>, WebError> {
        let html = env.get_template(INDEX_TEMPLATE)?.render(self)?;
        Ok(Html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_form_has_no_result_or_error() {
        let env = environment().unwrap();
        let Html(body) = IndexPage::form().render(&env).unwrap();
        assert!(body.contains(r#"name="lyrics""#));
        assert!(!body.contains(r#"id="prediction""#));
        assert!(!body.contains(r#"id="error""#));
    }

    #[test]
    fn test_prediction_prefills_textarea() {
        let env = environment().unwrap();
        let Html(body) = IndexPage::with_prediction("walking on sunshine", "Happy")
            .render(&env)
            .unwrap();
        assert!(body.contains("walking on sunshine</textarea>"));
        assert!(body.contains("<strong>Happy</strong>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let env = environment().unwrap();
        let Html(body) = IndexPage::with_error("<b>bad</b>").render(&env).unwrap();
        assert!(body.contains("&lt;b&gt;bad"));
        assert!(!body.contains("<b>bad"));
    }
}
