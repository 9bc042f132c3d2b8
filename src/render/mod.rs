//! Markup rendering for macro output

use serde::Serialize;
use tera::{Context, Tera};
use tracing::warn;

use crate::error::{MacroError, Result};

pub mod templates;

pub struct MarkupRenderer {
    tera: Tera,
}

impl MarkupRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        for (name, source) in templates::ALL {
            tera.add_raw_template(name, source)?;
        }
        Ok(Self { tera })
    }

    /// Render one of the built-in templates with a serializable view
    pub fn render<T: Serialize>(&self, template: &str, view: &T) -> Result<String> {
        let context = Context::from_serialize(view)?;
        Ok(self.tera.render(template, &context)?)
    }

    /// The block shown in place of a macro's output when it fails
    pub fn render_error(&self, title: &str, error: &MacroError) -> String {
        let message = error.user_message();
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("message", &message);

        match self.tera.render(templates::ERROR, &context) {
            Ok(block) => block,
            Err(e) => {
                warn!(error = %e, "error template failed, using plain block");
                error_block(title, &message)
            }
        }
    }
}

/// Plain-text form of the error block, usable without a renderer
pub fn error_block(title: &str, message: &str) -> String {
    format!("h2. {}:\n\n\"An Error occurred: {}\"\n", title, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_block_matches_template() {
        let renderer = MarkupRenderer::new().unwrap();
        let err = MacroError::query("#9 is not a valid release");
        let block = renderer.render_error("Release Metrics", &err);
        assert_eq!(
            block,
            "h2. Release Metrics:\n\n\"An Error occurred: #9 is not a valid release\"\n"
        );
        assert_eq!(block, error_block("Release Metrics", "#9 is not a valid release"));
    }

    #[test]
    fn test_markup_is_not_escaped() {
        let renderer = MarkupRenderer::new().unwrap();
        let err = MacroError::query("<b>'quoted'</b> & more");
        let block = renderer.render_error("What-If Calculator", &err);
        assert!(block.contains("<b>'quoted'</b> & more"));
    }

    #[test]
    fn test_what_if_without_velocity() {
        let renderer = MarkupRenderer::new().unwrap();
        let view = json!({
            "remaining_story_points": 50,
            "iteration_length": 7,
            "last_iteration_end_date": "2011-07-04",
            "velocity": null,
            "projected_end_date": null,
        });
        let out = renderer.render(templates::WHAT_IF, &view).unwrap();
        assert!(out.starts_with("h2. What-If Calculator\n"));
        assert!(out.contains("| 50 | 7 | <input type='text' id='what-if-velocity'></input>"));
        assert!(out.contains("Enter a velocity to see expected end date."));
        assert!(out.contains("new Date('2011-07-04')"));
    }

    #[test]
    fn test_unknown_template_is_render_error() {
        let renderer = MarkupRenderer::new().unwrap();
        let err = renderer.render("missing.textile", &json!({})).unwrap_err();
        assert_eq!(err.exit_code(), 7);
    }
}
