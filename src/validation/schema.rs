//! Schema diagnostics
//!
//! Schema checking itself is delegated to a [`SchemaValidator`]. This
//! module turns the line/column diagnostics it reports into reasons: the
//! message is matched against a translation table, and the position is
//! replayed against the document's token stream to recover a structural path.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::DocumentKind;
use crate::error::CapError;
use crate::location::{PathStack, Position, TokenKind, Tokens};
use crate::reason::{cap, feed, Reason, ReasonType, Reasons};

/// One problem reported by a schema validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl SchemaDiagnostic {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Checks a document against the schema for its format.
pub trait SchemaValidator: Send + Sync {
    fn validate(&self, kind: DocumentKind, text: &str) -> Vec<SchemaDiagnostic>;
}

/// Reports nothing. Used when no schema validator is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl SchemaValidator for NoSchema {
    fn validate(&self, _kind: DocumentKind, _text: &str) -> Vec<SchemaDiagnostic> {
        Vec::new()
    }
}

struct Translation {
    kinds: Option<&'static [DocumentKind]>,
    pattern: Regex,
    reason: &'static ReasonType,
    /// Capture groups passed as template arguments, in order.
    args: &'static [usize],
    /// Capture group naming the offending element, if the message has one.
    element: Option<usize>,
}

impl Translation {
    fn new(
        kinds: Option<&'static [DocumentKind]>,
        pattern: &str,
        reason: &'static ReasonType,
        args: &'static [usize],
        element: Option<usize>,
    ) -> Self {
        Self {
            kinds,
            pattern: Regex::new(pattern).expect("valid regex"),
            reason,
            args,
            element,
        }
    }
}

const ATOM: Option<&[DocumentKind]> = Some(&[DocumentKind::Atom]);

/// Quoted element name as XML Schema validators print it, with or without
/// a `{"namespace":name}` wrapper.
const ELEMENT: &str = r#"'(?:\{"[^"]*":)?([^'}]+)\}?'"#;

static TRANSLATIONS: LazyLock<Vec<Translation>> = LazyLock::new(|| {
    vec![
        Translation::new(
            ATOM,
            r#"^element "entry" not allowed yet; missing required element "id"$"#,
            &feed::ATOM_ID_IS_REQUIRED,
            &[],
            None,
        ),
        Translation::new(
            ATOM,
            r#"^element "entry" not allowed yet; missing required element "title"$"#,
            &feed::ATOM_TITLE_IS_REQUIRED,
            &[],
            None,
        ),
        Translation::new(
            ATOM,
            r#"^element "entry" not allowed yet; missing required element "updated"$"#,
            &feed::ATOM_UPDATED_IS_REQUIRED,
            &[],
            None,
        ),
        Translation::new(
            ATOM,
            r#"^element "entry" incomplete; missing required element "id"$"#,
            &feed::ATOM_ENTRY_ID_IS_REQUIRED,
            &[],
            None,
        ),
        Translation::new(
            ATOM,
            r#"^element "entry" incomplete; missing required element "title"$"#,
            &feed::ATOM_ENTRY_TITLE_IS_REQUIRED,
            &[],
            None,
        ),
        Translation::new(
            ATOM,
            r#"^element "entry" incomplete; missing required element "updated"$"#,
            &feed::ATOM_ENTRY_UPDATED_IS_REQUIRED,
            &[],
            None,
        ),
        Translation::new(
            None,
            r#"^element "([^"]+)" not allowed (?:here|anywhere)"#,
            &cap::UNSUPPORTED_ELEMENT,
            &[1],
            Some(1),
        ),
        Translation::new(
            None,
            &format!(
                r"^cvc-complex-type\.2\.4\.a: Invalid content was found starting with element {ELEMENT}\. One of '\{{(.*)\}}' is expected\.?$"
            ),
            &cap::INVALID_SEQUENCE,
            &[2, 1],
            Some(1),
        ),
        Translation::new(
            None,
            &format!(
                r"^cvc-complex-type\.2\.4\.b: The content of element {ELEMENT} is not complete\. One of '\{{(.*)\}}' is expected\.?$"
            ),
            &cap::MISSING_REQUIRED_ELEMENT,
            &[1, 2],
            None,
        ),
        Translation::new(
            None,
            &format!(
                r"^cvc-complex-type\.2\.4\.d: Invalid content was found starting with element {ELEMENT}\. No child element is expected at this point\.?$"
            ),
            &cap::UNSUPPORTED_ELEMENT,
            &[1],
            Some(1),
        ),
        Translation::new(
            None,
            r"^cvc-enumeration-valid: Value '([^']*)' is not facet-valid with respect to enumeration '\[(.*)\]'",
            &cap::SCHEMA_INVALID_ENUMERATION,
            &[1, 2],
            None,
        ),
        Translation::new(
            None,
            r"^cvc-pattern-valid: Value '([^']*)' is not facet-valid with respect to pattern '.*' for type '([^']*)'",
            &cap::SCHEMA_INVALID_FORMAT,
            &[1, 2],
            None,
        ),
        Translation::new(
            None,
            r"^cvc-datatype-valid\.1\.2\.1: '([^']*)' is not a valid value for '([^']*)'",
            &cap::SCHEMA_INVALID_VALUE,
            &[1, 2],
            None,
        ),
    ]
});

/// A diagnostic matched against the translation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    pub reason: &'static ReasonType,
    pub args: Vec<String>,
    pub element: Option<String>,
}

/// Translate a message, falling back to an `OTHER` reason carrying it verbatim.
pub fn translate(kind: DocumentKind, message: &str) -> Translated {
    let message = message.trim();

    for row in TRANSLATIONS.iter() {
        if row.kinds.is_some_and(|kinds| !kinds.contains(&kind)) {
            continue;
        }
        let Some(caps) = row.pattern.captures(message) else {
            continue;
        };
        let group = |i: usize| caps.get(i).map_or(String::new(), |m| m.as_str().trim().to_string());
        return Translated {
            reason: row.reason,
            args: row.args.iter().map(|&i| group(i)).collect(),
            element: row.element.map(group).map(|name| local(&name).to_string()),
        };
    }

    Translated {
        reason: match kind {
            DocumentKind::Alert => &cap::SCHEMA_OTHER,
            _ => &feed::OTHER,
        },
        args: vec![message.to_string()],
        element: None,
    }
}

fn local(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Translate `diagnostics` and give each a structural path.
///
/// A diagnostic belongs to the first token that ends at or after its
/// position, and takes the path that was open just before that token.
/// When the message names the element the token opens, that element's
/// indexed segment is appended; any other named element is appended bare.
pub fn stamp(
    kind: DocumentKind,
    text: &str,
    diagnostics: &[SchemaDiagnostic],
) -> Result<Reasons, CapError> {
    if diagnostics.is_empty() {
        return Ok(Reasons::new());
    }

    let translated: Vec<Translated> = diagnostics
        .iter()
        .map(|d| translate(kind, &d.message))
        .collect();

    let mut order: Vec<usize> = (0..diagnostics.len()).collect();
    order.sort_by_key(|&i| diagnostics[i].position());

    let mut paths: Vec<Option<String>> = vec![None; diagnostics.len()];
    let mut next = order.iter().copied().peekable();
    let mut stack = PathStack::new();

    for token in Tokens::new(text) {
        let token = token?;

        while let Some(i) = next.next_if(|&i| diagnostics[i].position() <= token.end) {
            let mut path = stack.path().to_string();
            if let Some(element) = &translated[i].element {
                let opens = matches!(token.kind, TokenKind::StartTag | TokenKind::EmptyTag);
                if opens && token.local_name() == element {
                    path.push_str(&format!("/{element}[{}]", stack.peek_index(element)));
                } else {
                    path.push('/');
                    path.push_str(element);
                }
            }
            paths[i] = Some(path);
        }

        match token.kind {
            TokenKind::StartTag => {
                stack.push(token.local_name());
            }
            TokenKind::EmptyTag => {
                stack.push(token.local_name());
                stack.pop(token.local_name(), token.start)?;
            }
            TokenKind::EndTag => stack.pop(token.local_name(), token.start)?,
            _ => {}
        }
    }

    Ok(translated
        .into_iter()
        .zip(paths)
        .map(|(t, path)| {
            let path = path.unwrap_or_else(|| match &t.element {
                Some(element) => format!("/{element}"),
                None => String::new(),
            });
            Reason::new(path, t.reason).with_args(t.args)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_atom_rows() {
        let t = translate(
            DocumentKind::Atom,
            "element \"entry\" incomplete; missing required element \"title\"",
        );
        assert_eq!(t.reason.key, "ATOM_ENTRY_TITLE_IS_REQUIRED");

        // Atom rows do not apply to other formats.
        let t = translate(
            DocumentKind::Rss,
            "element \"entry\" incomplete; missing required element \"title\"",
        );
        assert_eq!(t.reason.key, "OTHER");
        assert_eq!(t.reason.source, "Feed");
    }

    #[test]
    fn test_translate_xsd_rows() {
        let t = translate(
            DocumentKind::Alert,
            "cvc-complex-type.2.4.a: Invalid content was found starting with element \
             '{\"urn:oasis:names:tc:emergency:cap:1.2\":infox}'. One of \
             '{\"urn:oasis:names:tc:emergency:cap:1.2\":info}' is expected.",
        );
        assert_eq!(t.reason.key, "INVALID_SEQUENCE");
        assert_eq!(t.element.as_deref(), Some("infox"));
        assert_eq!(t.args.len(), 2);

        let t = translate(DocumentKind::Alert, "something unexpected");
        assert_eq!(t.reason.source, "Schema");
        assert_eq!(t.args, vec!["something unexpected".to_string()]);
    }

    #[test]
    fn test_stamp_names_offending_element() {
        let text = "<alert>\n  <info/>\n  <infox/>\n</alert>";
        let diagnostics = vec![SchemaDiagnostic::new(
            3,
            11,
            "cvc-complex-type.2.4.d: Invalid content was found starting with element 'infox'. \
             No child element is expected at this point.",
        )];
        let reasons = stamp(DocumentKind::Alert, text, &diagnostics).unwrap();
        let reason = reasons.iter().next().unwrap();
        assert_eq!(reason.path(), "/alert[1]/infox[1]");
        assert_eq!(reason.key(), "UNSUPPORTED_ELEMENT");
    }

    #[test]
    fn test_stamp_uses_open_path_without_element() {
        let text = "<alert>\n  <info>\n  </info>\n</alert>";
        let diagnostics = vec![
            SchemaDiagnostic::new(3, 10, "cvc-complex-type.2.4.b: The content of element 'info' is not complete. One of '{event}' is expected."),
            SchemaDiagnostic::new(99, 1, "trailing problem"),
        ];
        let reasons = stamp(DocumentKind::Alert, text, &diagnostics).unwrap();
        let paths: Vec<&str> = reasons.iter().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["/alert[1]/info[1]", ""]);
    }
}
