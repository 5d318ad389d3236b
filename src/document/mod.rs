//! Input documents
//!
//! Classifies an input as a bare alert, an Atom feed, an RSS channel or an
//! EDXL-DE distribution, and reduces it to the fields validation reads:
//! container metadata plus one payload per entry, item or content object.

pub mod atom;
pub mod edxl;
pub mod nodes;
pub mod normalizer;
pub mod rss;

pub use atom::{AtomEntry, AtomFeed, AtomLink, LinkChoice};
pub use edxl::{ContentObject, Distribution};
pub use normalizer::normalize;
pub use rss::{RssChannel, RssItem};

use roxmltree::Node;
use serde::Serialize;
use std::fmt;

use crate::cap::{parse_alert, Alert, ParsedAlert};
use crate::reason::{feed, Reason};

pub const ATOM_XMLNS: &str = "http://www.w3.org/2005/Atom";
pub const EDXLDE_XMLNS: &str = "urn:oasis:names:tc:emergency:EDXL:DE:1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentKind {
    Alert,
    Atom,
    Rss,
    Edxl,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentKind::Alert => "CAP alert",
            DocumentKind::Atom => "Atom feed",
            DocumentKind::Rss => "RSS feed",
            DocumentKind::Edxl => "EDXL-DE distribution",
        })
    }
}

/// What an entry, item or content object carries.
#[derive(Debug, Clone)]
pub enum Payload {
    /// An alert found inside the document. Its reasons are relative to
    /// `anchor`, the path of the element that contains it.
    Embedded {
        anchor: String,
        source: String,
        parsed: Box<ParsedAlert>,
    },
    /// A reference to an alert published elsewhere.
    Link {
        href: String,
        content_type: Option<String>,
    },
    /// Content that was meant to be an alert but could not be read.
    Invalid(Reason),
    /// Neither an alert nor a usable link.
    Missing,
}

impl Payload {
    pub(crate) fn from_node(node: Node<'_, '_>, anchor: String, text: &str) -> Payload {
        let source = text.get(node.range()).unwrap_or_default().to_string();
        Self::from_parsed(parse_alert(node), anchor, source)
    }

    pub(crate) fn from_parsed(
        parsed: Result<ParsedAlert, crate::error::CapError>,
        anchor: String,
        source: String,
    ) -> Payload {
        match parsed {
            Ok(parsed) => Payload::Embedded {
                anchor,
                source,
                parsed: Box::new(parsed),
            },
            Err(err) => Payload::Invalid(Reason::new(anchor, &feed::OTHER).with_args([err.to_string()])),
        }
    }

    pub fn alert(&self) -> Option<&Alert> {
        match self {
            Payload::Embedded { parsed, .. } => Some(&parsed.alert),
            _ => None,
        }
    }
}

/// Borrowed view of one payload and the path of its container element.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'d> {
    pub path: &'d str,
    pub payload: &'d Payload,
}

#[derive(Debug, Clone)]
pub enum NormalizedDocument {
    Alert(Payload),
    Atom(AtomFeed),
    Rss(RssChannel),
    Edxl(Distribution),
}

impl NormalizedDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            NormalizedDocument::Alert(_) => DocumentKind::Alert,
            NormalizedDocument::Atom(_) => DocumentKind::Atom,
            NormalizedDocument::Rss(_) => DocumentKind::Rss,
            NormalizedDocument::Edxl(_) => DocumentKind::Edxl,
        }
    }

    /// Every payload, in document order.
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        match self {
            NormalizedDocument::Alert(payload) => vec![Candidate { path: "", payload }],
            NormalizedDocument::Atom(feed) => feed
                .entries
                .iter()
                .map(|e| Candidate {
                    path: &e.path,
                    payload: &e.payload,
                })
                .collect(),
            NormalizedDocument::Rss(channel) => channel
                .items
                .iter()
                .map(|i| Candidate {
                    path: &i.path,
                    payload: &i.payload,
                })
                .collect(),
            NormalizedDocument::Edxl(dist) => dist
                .content_objects
                .iter()
                .map(|o| Candidate {
                    path: &o.path,
                    payload: &o.payload,
                })
                .collect(),
        }
    }

    /// Alerts parsed out of the document itself, in document order.
    pub fn alerts(&self) -> Vec<&Alert> {
        self.candidates()
            .into_iter()
            .filter_map(|c| c.payload.alert())
            .collect()
    }
}
