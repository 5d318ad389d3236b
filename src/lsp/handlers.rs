use std::path::PathBuf;
use std::sync::Arc;

use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::core::{FileLinkResolver, Finding};
use crate::error::CapError;
use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::reason::Level;

const SOURCE: &str = "cap-ls";

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn create_document_state(&self, uri: &Url, content: String) -> DocumentState;
    async fn publish_diagnostics(&self, uri: Url);
    fn create_lsp_diagnostic(&self, finding: &Finding, content: &str) -> Diagnostic;
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    /// Lists the findings reported on the hovered line.
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let docs = self.documents.lock().await;
        let Some(doc_state) = docs.get(&tdpp.text_document.uri) else {
            return Ok(None);
        };

        let line = tdpp.position.line;
        let lines: Vec<String> = doc_state
            .diagnostics
            .iter()
            .filter(|d| d.range.start.line == line)
            .map(|d| {
                let code = match &d.code {
                    Some(NumberOrString::String(code)) => code.as_str(),
                    _ => "",
                };
                format!("- **{code}**: {}", d.message)
            })
            .collect();

        if lines.is_empty() {
            return Ok(None);
        }

        Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: lines.join("\n"),
            }),
            range: None,
        }))
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Validate `content` and keep the resulting diagnostics. Thin entries
    /// of a file on disk are resolved against that file's directory.
    async fn create_document_state(&self, uri: &Url, content: String) -> DocumentState {
        let validator = match link_base(uri) {
            Some(dir) => self
                .validator
                .clone()
                .with_link_resolver(Arc::new(FileLinkResolver::new(dir))),
            None => self.validator.clone(),
        };
        let diagnostics = match validator.validate(&content) {
            Ok(result) => result
                .findings()
                .map(|finding| self.create_lsp_diagnostic(&finding, &content))
                .collect(),
            Err(err) => vec![document_error(&err)],
        };

        DocumentState {
            content,
            diagnostics,
        }
    }

    /// Publish diagnostics for a document
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let Some(doc_state) = docs.get(&uri) else {
            return;
        };
        let diagnostics = doc_state.diagnostics.clone();
        drop(docs);

        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    fn create_lsp_diagnostic(&self, finding: &Finding, content: &str) -> Diagnostic {
        let reason = &finding.reason;
        // Findings at line 0 could not be located; show them on the first line.
        let line = finding.line.saturating_sub(1);
        let width = content
            .lines()
            .nth(line)
            .map_or(0, |l| l.encode_utf16().count());

        Diagnostic::new(
            Range::new(
                Position::new(line as u32, 0),
                Position::new(line as u32, width as u32),
            ),
            Some(severity(reason.level())),
            Some(NumberOrString::String(reason.key().to_string())),
            Some(format!("{SOURCE}/{}", reason.source())),
            reason.message(),
            None,
            None,
        )
    }
}

/// Directory of a `file:` document, if it has one
fn link_base(uri: &Url) -> Option<PathBuf> {
    let path = uri.to_file_path().ok()?;
    path.parent().map(PathBuf::from)
}

fn severity(level: Level) -> DiagnosticSeverity {
    match level {
        Level::Error => DiagnosticSeverity::ERROR,
        Level::Warning => DiagnosticSeverity::WARNING,
        Level::Recommendation => DiagnosticSeverity::INFORMATION,
        Level::Info => DiagnosticSeverity::HINT,
    }
}

/// A document that could not be validated at all
fn document_error(err: &CapError) -> Diagnostic {
    let line = err.line().saturating_sub(1) as u32;
    let column = match err {
        CapError::MalformedDocument { column, .. } => column.saturating_sub(1) as u32,
        _ => 0,
    };
    Diagnostic::new(
        Range::new(Position::new(line, column), Position::new(line, column)),
        Some(DiagnosticSeverity::ERROR),
        None,
        Some(SOURCE.to_string()),
        err.to_string(),
        None,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(severity(Level::Error), DiagnosticSeverity::ERROR);
        assert_eq!(severity(Level::Recommendation), DiagnosticSeverity::INFORMATION);
        assert_eq!(severity(Level::Info), DiagnosticSeverity::HINT);
    }

    #[test]
    fn test_link_base_is_the_document_directory() {
        let uri = Url::parse("file:///srv/feeds/alerts.atom").unwrap();
        assert_eq!(link_base(&uri), Some(PathBuf::from("/srv/feeds")));

        let untitled = Url::parse("untitled:Untitled-1").unwrap();
        assert_eq!(link_base(&untitled), None);
    }

    #[test]
    fn test_malformed_document_position() {
        let err = CapError::malformed(3, 7, "unexpected end of input");
        let diagnostic = document_error(&err);
        assert_eq!(diagnostic.range.start, Position::new(2, 6));
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));

        let err = CapError::UnsupportedDocumentType {
            root: "html".to_string(),
        };
        assert_eq!(document_error(&err).range.start, Position::new(0, 0));
    }
}
