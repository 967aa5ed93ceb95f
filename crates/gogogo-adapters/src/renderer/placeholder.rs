//! `{{.Var}}` placeholder substitution.
//!
//! Grammar, matched byte-wise so binary assets pass through untouched:
//!
//! ```text
//! placeholder := "{{" ws* "." ident ws* "}}"
//! ident       := [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! Anything else between `{{` and `}}`, or a `{{` that is never closed, is a
//! parse error naming the line it starts on.

use gogogo_core::{
    application::{RenderError, ports::ContentRenderer},
    domain::{ProjectContext, is_identifier},
};
use tracing::instrument;

const OPEN: &[u8] = b"{{";
const CLOSE: &[u8] = b"}}";

/// Renderer for Go-template style `{{.Name}}` placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ContentRenderer for PlaceholderRenderer {
    #[instrument(level = "trace", skip(self, content, context), fields(bytes = content.len()))]
    fn render(
        &self,
        name: &str,
        content: &[u8],
        context: &ProjectContext,
    ) -> Result<Vec<u8>, RenderError> {
        let mut out = Vec::with_capacity(content.len());
        let mut rest = content;
        let mut line = 1;

        while let Some(start) = find(rest, OPEN) {
            let before = &rest[..start];
            out.extend_from_slice(before);
            line += count_lines(before);

            let after_open = &rest[start + OPEN.len()..];
            let end = find(after_open, CLOSE)
                .ok_or_else(|| parse_error(name, line, "unclosed placeholder".into()))?;
            let inner = &after_open[..end];

            let variable = parse_placeholder(inner).map_err(|cause| parse_error(name, line, cause))?;
            let value = context
                .lookup(variable)
                .ok_or_else(|| RenderError::UndefinedVariable {
                    name: variable.to_string(),
                })?;
            out.extend_from_slice(value.as_bytes());

            line += count_lines(inner);
            rest = &after_open[end + CLOSE.len()..];
        }

        out.extend_from_slice(rest);
        Ok(out)
    }
}

fn parse_placeholder(inner: &[u8]) -> Result<&str, String> {
    let text = std::str::from_utf8(inner)
        .map_err(|_| "placeholder is not valid UTF-8".to_string())?
        .trim();

    let ident = text
        .strip_prefix('.')
        .ok_or_else(|| format!("unsupported placeholder '{{{{{text}}}}}'"))?;

    if !is_identifier(ident) {
        return Err(format!("invalid variable name '{ident}'"));
    }
    Ok(ident)
}

fn parse_error(name: &str, line: usize, cause: String) -> RenderError {
    RenderError::ParseError {
        path: name.to_string(),
        cause: format!("line {line}: {cause}"),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn count_lines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}
