//! Runner template loading and rendering with Tera.
//!
//! A runner template is an HTML document with five placeholders, written in
//! Tera syntax:
//!
//! | Placeholder | Receives |
//! |-------------|----------|
//! | `{{ javascriptDependencies }}` | inlined `<script>` dependency blocks |
//! | `{{ cssDependencies }}` | inlined `<style>` dependency blocks |
//! | `{{ sources }}` | `<script src=...>` tags for sources and specs |
//! | `{{ reporter }}` | reporter name, e.g. `TrivialReporter` |
//! | `{{ sourceEncoding }}` | page character encoding |
//!
//! All five are always defined when rendering, so a custom template may use
//! any subset of them. Values are inserted verbatim: HTML escaping is off,
//! since the values are markup.
//!
//! When no custom template is configured, the template bundled with the crate
//! (`templates/SpecRunner.html`) is used.

use encoding_rs::Encoding;
use std::path::{Path, PathBuf};
use tera::{Context as TeraContext, Tera};
use tracing::debug;

use crate::constants::{
    CSS_DEPENDENCIES_ATTR, JAVASCRIPT_DEPENDENCIES_ATTR, REPORTER_ATTR, SOURCE_ENCODING_ATTR,
    SOURCES_ATTR,
};
use crate::core::{RunnerError, RunnerResult};
use crate::utils::fs::FileSystem;

/// The runner template shipped with the crate.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/SpecRunner.html");

/// Where a [`RunnerTemplate`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// The template compiled into the crate
    Bundled,
    /// A caller-supplied template file
    Custom(PathBuf),
}

/// Values substituted into the template placeholders.
#[derive(Debug, Clone, Default)]
pub struct TemplateAttributes {
    /// Inlined `<script>` dependency blocks
    pub javascript_dependencies: String,
    /// Inlined `<style>` dependency blocks
    pub css_dependencies: String,
    /// `<script src=...>` tags
    pub sources: String,
    /// Reporter name
    pub reporter: String,
    /// Page character encoding
    pub source_encoding: String,
}

impl TemplateAttributes {
    fn to_context(&self) -> TeraContext {
        let mut context = TeraContext::new();
        context.insert(JAVASCRIPT_DEPENDENCIES_ATTR, &self.javascript_dependencies);
        context.insert(CSS_DEPENDENCIES_ATTR, &self.css_dependencies);
        context.insert(SOURCES_ATTR, &self.sources);
        context.insert(REPORTER_ATTR, &self.reporter);
        context.insert(SOURCE_ENCODING_ATTR, &self.source_encoding);
        context
    }
}

/// A loaded runner template. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct RunnerTemplate {
    text: String,
    origin: TemplateOrigin,
}

impl RunnerTemplate {
    /// The bundled default template.
    pub fn bundled() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
            origin: TemplateOrigin::Bundled,
        }
    }

    /// Reads a custom template through `fs`, decoding it from `encoding`.
    /// The file is read exactly once.
    ///
    /// # Errors
    ///
    /// [`RunnerError::Io`] if the file cannot be read.
    pub fn from_file(
        path: &Path,
        fs: &impl FileSystem,
        encoding: &'static Encoding,
    ) -> RunnerResult<Self> {
        debug!("Loading custom runner template {} as {}", path.display(), encoding.name());
        let text = fs.read_text(path, encoding)?;
        Ok(Self {
            text,
            origin: TemplateOrigin::Custom(path.to_path_buf()),
        })
    }

    /// Picks the custom template when given, the bundled one otherwise.
    ///
    /// # Errors
    ///
    /// [`RunnerError::Io`] if a custom template cannot be read.
    pub fn resolve(
        custom: Option<&Path>,
        fs: &impl FileSystem,
        encoding: &'static Encoding,
    ) -> RunnerResult<Self> {
        match custom {
            Some(path) => Self::from_file(path, fs, encoding),
            None => Ok(Self::bundled()),
        }
    }

    /// Raw template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the template came from.
    pub fn origin(&self) -> &TemplateOrigin {
        &self.origin
    }

    /// Renders the template with `attributes`.
    ///
    /// # Errors
    ///
    /// [`RunnerError::Template`] if the template is not valid Tera syntax or
    /// refers to something Tera cannot resolve.
    pub fn render(&self, attributes: &TemplateAttributes) -> RunnerResult<String> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.render_str(&self.text, &attributes.to_context()).map_err(|e| RunnerError::Template {
            message: format_tera_error(&e),
        })
    }
}

/// Flattens a Tera error chain into one message, dropping Tera's internal
/// one-off template name.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut all_messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        all_messages.push(err.to_string());
        current = err.source();
    }

    let messages: Vec<String> = all_messages
        .into_iter()
        .map(|msg| {
            msg.replace("while rendering '__tera_one_off'", "")
                .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                .replace("'__tera_one_off'", "template")
                .trim()
                .to_string()
        })
        .filter(|msg| {
            !msg.is_empty() && msg != "Template rendering failed" && msg != "Template syntax error"
        })
        .collect();

    if messages.is_empty() {
        "Template syntax error".to_string()
    } else {
        messages.join(" -> ")
    }
}
