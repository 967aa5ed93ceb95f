//! Per-file rendering: destination naming plus the two content phases.

use tracing::trace;

use crate::application::error::RenderError;
use crate::application::ports::ContentRenderer;
use crate::domain::{ProjectContext, RelativePath, RenderedFile, TemplateFile, TemplateMarker};

/// Literal token replaced with the module path before placeholder parsing.
pub const DEFAULT_SENTINEL: &str = "github.com/brainmaniac/gogogo-app";

/// Turns one template file into its destination path and bytes.
///
/// Content goes through two phases, in order, whether or not the file
/// carries the marker suffix:
/// 1. every occurrence of the sentinel becomes `context.module_path()`;
/// 2. the result is handed to the `ContentRenderer` for `{{.Var}}` placeholders.
///
/// Rendering is pure: same file and context, same output.
pub struct FileRenderer {
    engine: Box<dyn ContentRenderer>,
    marker: TemplateMarker,
    sentinel: String,
}

impl FileRenderer {
    pub fn new(engine: Box<dyn ContentRenderer>) -> Self {
        Self {
            engine,
            marker: TemplateMarker::default(),
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }

    pub fn with_marker(mut self, marker: TemplateMarker) -> Self {
        self.marker = marker;
        self
    }

    /// An empty sentinel disables the literal token phase.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn marker(&self) -> &TemplateMarker {
        &self.marker
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    pub fn destination_for(&self, source: &RelativePath) -> RelativePath {
        self.marker.destination_for(source)
    }

    /// Render `file` against `context`.
    ///
    /// # Errors
    /// Whatever the engine reports: `ParseError` or `UndefinedVariable`.
    pub fn render(
        &self,
        file: &TemplateFile,
        context: &ProjectContext,
    ) -> Result<RenderedFile, RenderError> {
        let destination = self.destination_for(&file.path);

        let literal = replace_all(
            &file.content,
            self.sentinel.as_bytes(),
            context.module_path().as_bytes(),
        );
        let bytes = self
            .engine
            .render(&file.path.to_slash_string(), &literal, context)?;

        trace!(
            source = %file.path,
            destination = %destination,
            bytes = bytes.len(),
            "Rendered file"
        );

        Ok(RenderedFile { destination, bytes })
    }
}

impl std::fmt::Debug for FileRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRenderer")
            .field("marker", &self.marker)
            .field("sentinel", &self.sentinel)
            .finish_non_exhaustive()
    }
}

fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = rest.windows(needle.len()).position(|w| w == needle) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(replacement);
        rest = &rest[pos + needle.len()..];
    }
    out.extend_from_slice(rest);
    out
}
