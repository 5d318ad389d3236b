//! Validation Engine
//!
//! Runs every structural check against a normalized document: container
//! rules for the feed kind, CAP rules for each embedded alert, the
//! optional signature check, and whatever the schema validator reports.

use crate::cap::ParsedAlert;
use crate::document::{NormalizedDocument, Payload};
use crate::error::CapError;
use crate::reason::Reasons;

use super::alert_rules::check_alert;
use super::feed_rules::{check_atom, check_edxl, check_rss};
use super::schema::{self, NoSchema, SchemaValidator};
use super::signature::{signature_reason, SignatureValidator};

static NO_SCHEMA: NoSchema = NoSchema;

/// Structural checks for one document. Collaborators are borrowed so the
/// same instances can serve many calls.
#[derive(Clone, Copy)]
pub struct StructuralValidator<'v> {
    schema: &'v dyn SchemaValidator,
    signature: Option<&'v dyn SignatureValidator>,
}

impl Default for StructuralValidator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'v> StructuralValidator<'v> {
    pub fn new() -> Self {
        Self {
            schema: &NO_SCHEMA,
            signature: None,
        }
    }

    pub fn with_schema(mut self, schema: &'v dyn SchemaValidator) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_signature(mut self, signature: &'v dyn SignatureValidator) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Validate `doc`, which was normalized from `text`.
    ///
    /// Reasons come back in a fixed order: container rules, then each
    /// payload in document order, then schema diagnostics.
    pub fn validate(&self, text: &str, doc: &NormalizedDocument) -> Result<Reasons, CapError> {
        let mut reasons = match doc {
            NormalizedDocument::Alert(_) => Reasons::new(),
            NormalizedDocument::Atom(feed) => check_atom(feed),
            NormalizedDocument::Rss(channel) => check_rss(channel),
            NormalizedDocument::Edxl(dist) => check_edxl(dist),
        };
        log::debug!("{} container rules: {} reason(s)", doc.kind(), reasons.len());

        for candidate in doc.candidates() {
            match candidate.payload {
                Payload::Embedded {
                    anchor,
                    source,
                    parsed,
                } => reasons.extend(self.alert_reasons(parsed, source).prefixed(anchor)),
                Payload::Invalid(reason) => reasons.push(reason.clone()),
                Payload::Link { .. } | Payload::Missing => {}
            }
        }

        let diagnostics = self.schema.validate(doc.kind(), text);
        if !diagnostics.is_empty() {
            log::debug!("schema validator reported {} diagnostic(s)", diagnostics.len());
            reasons.extend(schema::stamp(doc.kind(), text, &diagnostics)?);
        }

        Ok(reasons)
    }

    /// Everything known to be wrong with one alert, relative to the alert.
    /// `source` is the alert's own XML text.
    pub fn alert_reasons(&self, parsed: &ParsedAlert, source: &str) -> Reasons {
        let mut reasons = parsed.reasons.clone();
        reasons.extend(check_alert(&parsed.alert));
        if let Some(validator) = self.signature {
            reasons.extend(signature_reason(&validator.validate(&parsed.alert, source)));
        }
        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::{Alert, CAP12_XMLNS};
    use crate::document::{normalize, DocumentKind, ATOM_XMLNS};
    use crate::validation::schema::SchemaDiagnostic;
    use crate::validation::signature::SignatureCheck;

    fn alert(id: &str, extra: &str) -> String {
        format!(
            "<alert xmlns=\"{CAP12_XMLNS}\"><identifier>{id}</identifier><sender>s@x</sender>\
             <sent>2011-01-20T16:49:00-07:00</sent><status>Actual</status>\
             <msgType>Alert</msgType><scope>Public</scope>{extra}</alert>"
        )
    }

    struct Fixed(Vec<SchemaDiagnostic>);

    impl SchemaValidator for Fixed {
        fn validate(&self, _kind: DocumentKind, _text: &str) -> Vec<SchemaDiagnostic> {
            self.0.clone()
        }
    }

    struct Rejects;

    impl SignatureValidator for Rejects {
        fn validate(&self, _alert: &Alert, source: &str) -> SignatureCheck {
            assert!(source.starts_with("<alert"));
            SignatureCheck::Invalid("no key".into())
        }
    }

    #[test]
    fn test_clean_alert_has_no_reasons() {
        let text = alert("a1", "");
        let doc = normalize(&text).unwrap();
        let reasons = StructuralValidator::new().validate(&text, &doc).unwrap();
        assert!(reasons.is_empty(), "{reasons:?}");
    }

    #[test]
    fn test_embedded_reasons_are_anchored() {
        let text = format!(
            "<feed xmlns=\"{ATOM_XMLNS}\"><id>f</id><title>t</title><updated>u</updated>\
             <entry><id>1</id><title>e</title><updated>u</updated><content type=\"text/xml\">{}</content></entry></feed>",
            alert("a1", "<restriction>r</restriction>")
        );
        let doc = normalize(&text).unwrap();
        let reasons = StructuralValidator::new().validate(&text, &doc).unwrap();
        let keys: Vec<(&str, &str)> = reasons.iter().map(|r| (r.key(), r.path())).collect();
        assert_eq!(
            keys,
            vec![(
                "RESTRICTION_SCOPE_MISMATCH",
                "/feed[1]/entry[1]/content[1]/alert[1]/restriction[1]"
            )]
        );
    }

    #[test]
    fn test_signature_and_schema_reasons() {
        let text = alert("a1", "");
        let doc = normalize(&text).unwrap();
        let schema = Fixed(vec![SchemaDiagnostic::new(1, 2, "unexpected thing")]);
        let validator = StructuralValidator::new()
            .with_schema(&schema)
            .with_signature(&Rejects);
        let reasons = validator.validate(&text, &doc).unwrap();
        let keys: Vec<(&str, &str)> = reasons.iter().map(|r| (r.key(), r.source())).collect();
        assert_eq!(keys, vec![("SIGNATURE_INVALID", "CAP"), ("OTHER", "Schema")]);
        assert_eq!(reasons.iter().next().unwrap().path(), "/alert[1]/Signature[1]");
    }
}
