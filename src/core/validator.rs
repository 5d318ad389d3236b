//! Validator
//!
//! Ties the pipeline together: normalize the input, run the structural
//! checks once, run the active profiles against every alert, and resolve
//! each finding to a line of the input.

use std::sync::Arc;

use crate::cap::parse_alert_str;
use crate::document::normalizer::strip_bom;
use crate::document::{normalize, Candidate, Payload};
use crate::error::CapError;
use crate::location::LineIndex;
use crate::profile::{run_profiles, Profile};
use crate::reason::{feed, Reason};
use crate::validation::{SchemaValidator, SignatureValidator, StructuralValidator};

use super::links::LinkResolver;
use super::result::ValidationResult;

#[derive(Clone, Default)]
pub struct Validator {
    profiles: Vec<Arc<dyn Profile>>,
    schema: Option<Arc<dyn SchemaValidator>>,
    signature: Option<Arc<dyn SignatureValidator>>,
    links: Option<Arc<dyn LinkResolver>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(mut self, profiles: Vec<Arc<dyn Profile>>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_schema_validator(mut self, schema: Arc<dyn SchemaValidator>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_signature_validator(mut self, signature: Arc<dyn SignatureValidator>) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn with_link_resolver(mut self, links: Arc<dyn LinkResolver>) -> Self {
        self.links = Some(links);
        self
    }

    pub fn profiles(&self) -> &[Arc<dyn Profile>] {
        &self.profiles
    }

    fn structural(&self) -> StructuralValidator<'_> {
        let mut structural = StructuralValidator::new();
        if let Some(schema) = &self.schema {
            structural = structural.with_schema(schema.as_ref());
        }
        if let Some(signature) = &self.signature {
            structural = structural.with_signature(signature.as_ref());
        }
        structural
    }

    /// Validate one document.
    ///
    /// Fails only when the document as a whole cannot be read: it is not
    /// well-formed, its root is not a supported format, or it carries no
    /// alert content. Everything else is a finding.
    pub fn validate(&self, input: &str) -> Result<ValidationResult, CapError> {
        let text = strip_bom(input);
        let doc = normalize(text)?;
        let index = LineIndex::build(text)?;
        log::debug!("indexed {} element path(s)", index.len());

        let structural = self.structural();
        let mut result = ValidationResult::new(text, doc.kind());

        for reason in structural.validate(text, &doc)? {
            result.add(index.resolve(reason.path()), reason);
        }

        for candidate in doc.candidates() {
            match candidate.payload {
                Payload::Embedded { anchor, parsed, .. } => {
                    for reason in run_profiles(&self.profiles, &parsed.alert) {
                        let reason = reason.prefixed(anchor);
                        result.add(index.resolve(reason.path()), reason);
                    }
                    result.add_valid_alert(parsed.alert.clone());
                }
                Payload::Link { href, .. } => {
                    self.follow_link(&structural, &index, candidate, href, &mut result);
                }
                Payload::Invalid(_) | Payload::Missing => {}
            }
        }

        log::debug!(
            "{}: {} finding(s), {} alert(s)",
            result.kind(),
            result.len(),
            result.valid_alerts().len()
        );
        Ok(result)
    }

    /// Load a thin entry's alert and validate it. Its findings are reported
    /// at the line of the link, with paths relative to the linked alert.
    fn follow_link(
        &self,
        structural: &StructuralValidator<'_>,
        index: &LineIndex,
        candidate: Candidate<'_>,
        href: &str,
        result: &mut ValidationResult,
    ) {
        let Some(links) = &self.links else {
            log::debug!("no link resolver; skipping {href}");
            return;
        };
        let line = index
            .line_of_link(href)
            .unwrap_or_else(|| index.resolve(candidate.path));

        let text = match links.resolve(href) {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::debug!("not following {href}");
                return;
            }
            Err(err) => {
                log::warn!("unable to load {href}: {err}");
                let reason = Reason::new(candidate.path, &feed::LINK_UNREACHABLE)
                    .with_args([href.to_string(), err]);
                result.add(line, reason);
                return;
            }
        };

        let parsed = match parse_alert_str(&text) {
            Ok(parsed) => parsed,
            Err(err) => {
                let reason = Reason::new(candidate.path, &feed::LINK_NOT_CAP)
                    .with_args([href.to_string(), err.to_string()]);
                result.add(line, reason);
                return;
            }
        };

        let source = strip_bom(&text);
        for reason in structural.alert_reasons(&parsed, source) {
            result.add(line, reason);
        }
        for reason in run_profiles(&self.profiles, &parsed.alert) {
            result.add(line, reason);
        }
        result.add_valid_alert(parsed.alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::CAP12_XMLNS;
    use crate::core::FileLinkResolver;
    use crate::document::ATOM_XMLNS;
    use crate::profile::IpawsProfile;
    use std::collections::HashMap;

    struct Links(HashMap<&'static str, String>);

    impl LinkResolver for Links {
        fn resolve(&self, href: &str) -> Result<Option<String>, String> {
            self.0.get(href).cloned().map(Some).ok_or_else(|| "not found".to_string())
        }
    }

    fn alert(id: &str) -> String {
        format!(
            "<alert xmlns=\"{CAP12_XMLNS}\">\n<identifier>{id}</identifier>\n<sender>s@x</sender>\n\
             <sent>2011-01-20T16:49:00-07:00</sent>\n<status>Actual</status>\n\
             <msgType>Alert</msgType>\n<scope>Private</scope>\n<restriction>r</restriction>\n</alert>"
        )
    }

    #[test]
    fn test_bare_alert_lines() {
        let result = Validator::new().validate(&alert("a1")).unwrap();
        assert_eq!(result.valid_alerts().len(), 1);
        let finding = result.findings().next().unwrap();
        assert_eq!(finding.reason.key(), "RESTRICTION_SCOPE_MISMATCH");
        assert_eq!(finding.line, 8);
    }

    #[test]
    fn test_thin_entries_are_followed() {
        let feed = format!(
            "<feed xmlns=\"{ATOM_XMLNS}\">\n<id>f</id>\n<title>t</title>\n<updated>u</updated>\n\
             <entry>\n<id>1</id>\n<title>e</title>\n<updated>u</updated>\n\
             <link href=\"http://x/a.xml\"/>\n</entry>\n\
             <entry>\n<id>2</id>\n<title>e</title>\n<updated>u</updated>\n\
             <link href=\"http://x/gone.xml\"/>\n</entry>\n</feed>"
        );
        let links = Links(HashMap::from([("http://x/a.xml", alert("a1"))]));
        let result = Validator::new()
            .with_link_resolver(Arc::new(links))
            .validate(&feed)
            .unwrap();

        let found: Vec<(usize, &str)> = result.findings().map(|f| (f.line, f.reason.key())).collect();
        assert_eq!(
            found,
            vec![(9, "RESTRICTION_SCOPE_MISMATCH"), (15, "LINK_UNREACHABLE")]
        );
        assert_eq!(result.valid_alerts().len(), 1);
    }

    #[test]
    fn test_network_links_are_left_alone() {
        let rss = "<rss version=\"2.0\">\n<channel>\n<title>t</title>\n\
                   <pubDate>Thu, 20 Jan 2011 16:49:00 -0700</pubDate>\n<item>\n\
                   <title>Alert</title>\n<link>http://alerts.example.org/a.cap</link>\n\
                   <guid>a</guid>\n</item>\n</channel>\n</rss>";
        let result = Validator::new()
            .with_link_resolver(Arc::new(FileLinkResolver::default()))
            .validate(rss)
            .unwrap();
        assert!(result.is_empty(), "unexpected findings: {:?}", result.reasons());
        assert!(result.valid_alerts().is_empty());
    }

    #[test]
    fn test_profile_reasons_follow_structural_ones() {
        let text = alert("a1");
        let plain = Validator::new().validate(&text).unwrap();
        let profiled = Validator::new()
            .with_profiles(vec![Arc::new(IpawsProfile)])
            .validate(&text)
            .unwrap();

        let plain: Vec<Reason> = plain.reasons().into_vec();
        let profiled: Vec<Reason> = profiled.reasons().into_vec();
        assert!(profiled.len() > plain.len());
        let mut rest = profiled.iter();
        assert!(plain.iter().all(|r| rest.any(|p| p == r)));
        assert!(profiled.iter().any(|r| r.source() == "IPAWSv1.0"));
    }
}
