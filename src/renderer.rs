//! Template rendering for copydir.
//! File names and file contents are rendered with MiniJinja in strict mode,
//! so referencing a key absent from the template data is an error.
use crate::error::{Error, Result};
use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Block tags, e.g. `{%% if flag %%}`. Plain `{%` is left as text.
pub const BLOCK_DELIMITERS: (&str, &str) = ("{%%", "%%}");
/// Comments, e.g. `{## note ##}`. Plain `{#`, as in `${#arr[@]}`, is left as text.
pub const COMMENT_DELIMITERS: (&str, &str) = ("{##", "##}");

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Name reported in engine diagnostics, usually the source path
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that fails on undefined keys, never escapes output
    /// and keeps the trailing newline of rendered content.
    ///
    /// Only `{{ ... }}` is likely to appear in ordinary files; block and
    /// comment tags use doubled delimiters, see [`BLOCK_DELIMITERS`] and
    /// [`COMMENT_DELIMITERS`].
    pub fn new() -> Result<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters(BLOCK_DELIMITERS.0, BLOCK_DELIMITERS.1)
            .comment_delimiters(COMMENT_DELIMITERS.0, COMMENT_DELIMITERS.1)
            .build()?;
        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateSyntaxError` if the template cannot be parsed
    /// * `Error::MinijinjaError` if rendering fails, e.g. on a missing key
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template_owned(name.to_string(), template.to_string())
            .map_err(Error::TemplateSyntaxError)?;

        let tmpl = env.get_template(name)?;

        Ok(tmpl.render(context)?)
    }
}
