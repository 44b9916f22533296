use serde::Serialize;

/// Stands in for `css` when no `<style>` block could be extracted.
pub const CSS_PLACEHOLDER: &str =
    "/* All styles are embedded inline in the HTML document; no separate stylesheet was extracted. */";

/// Stands in for `js` when no `<script>` block could be extracted.
pub const JS_PLACEHOLDER: &str =
    "// All scripts are embedded inline in the HTML document; no separate script was extracted.";

/// The output of one generation request, real or diagnostic.
///
/// `html` is always a complete document from `<!DOCTYPE html>` to `</html>`.
/// Fields are read-only: a regeneration replaces the whole artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    html: String,
    css: String,
    js: String,
    preview: String,
}

impl GeneratedArtifact {
    pub(crate) fn new(html: String, css: String, js: String) -> Self {
        let preview = html.clone();
        Self {
            html,
            css,
            js,
            preview,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn js(&self) -> &str {
        &self.js
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// True when a stylesheet was pulled out of the document.
    pub fn has_separate_css(&self) -> bool {
        self.css != CSS_PLACEHOLDER && !self.css.trim().is_empty()
    }

    /// True when a script was pulled out of the document.
    pub fn has_separate_js(&self) -> bool {
        self.js != JS_PLACEHOLDER && !self.js.trim().is_empty()
    }
}
