use tower_lsp::lsp_types::Diagnostic;

/// State for each open document
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    /// Diagnostics from the last validation of `content`
    pub diagnostics: Vec<Diagnostic>,
}
