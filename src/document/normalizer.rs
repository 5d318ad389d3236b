//! Document normalizer
//!
//! Parses the input once and dispatches on the root element.

use roxmltree::Document;

use super::{atom, edxl, rss, NormalizedDocument, Payload, ATOM_XMLNS, EDXLDE_XMLNS};
use crate::cap::parser::is_alert;
use crate::error::CapError;

/// Strip a leading byte order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

pub fn normalize(text: &str) -> Result<NormalizedDocument, CapError> {
    let text = strip_bom(text);
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    let tag = root.tag_name();

    let normalized = match (tag.namespace(), tag.name()) {
        (Some(ATOM_XMLNS), "feed") => NormalizedDocument::Atom(atom::read_feed(root, text)),
        (_, "rss") => NormalizedDocument::Rss(rss::read_channel(root)),
        (Some(EDXLDE_XMLNS), "EDXLDistribution") => {
            NormalizedDocument::Edxl(edxl::read_distribution(root, text))
        }
        _ if is_alert(root) => NormalizedDocument::Alert(Payload::from_node(root, String::new(), text)),
        (ns, "alert") => {
            return Err(CapError::NotCapDocument {
                reason: format!(
                    "<alert> namespace {} is not a CAP namespace",
                    ns.unwrap_or("(none)")
                ),
            });
        }
        (_, name) => {
            return Err(CapError::UnsupportedDocumentType {
                root: name.to_string(),
            });
        }
    };

    let count = normalized.candidates().len();
    if count == 0 {
        return Err(CapError::NotCapDocument {
            reason: format!("{} has no entries", normalized.kind()),
        });
    }

    log::debug!("normalized {} with {count} payload(s)", normalized.kind());
    Ok(normalized)
}
