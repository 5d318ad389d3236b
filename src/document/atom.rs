//! Atom feeds
//!
//! An entry either embeds an alert in `<content>`, or links to one. A lone
//! `<link>` is the CAP link whatever its `type`. Otherwise it is the first
//! link typed as CAP, and failing that the last link with no `type` or an
//! XML-flavored one.

use roxmltree::{Document, Node};

use super::nodes::{self, Child};
use super::Payload;
use crate::cap::{self, parse_alert, CAP10_XMLNS, CAP11_XMLNS, CAP12_XMLNS};
use crate::reason::{feed, Reason};

#[derive(Debug, Clone)]
pub struct AtomFeed {
    pub path: String,
    pub id: Option<String>,
    pub title: Option<String>,
    pub updated: Option<String>,
    pub entries: Vec<AtomEntry>,
}

#[derive(Debug, Clone)]
pub struct AtomEntry {
    pub path: String,
    pub id: Option<String>,
    pub title: Option<String>,
    pub updated: Option<String>,
    pub links: Vec<AtomLink>,
    pub link_choice: LinkChoice,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomLink {
    pub path: String,
    pub href: String,
    pub rel: Option<String>,
    pub link_type: Option<String>,
}

/// How an entry's CAP link was picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkChoice {
    /// The entry's only link.
    Only(usize),
    /// A link typed as CAP.
    Typed(usize),
    /// The last of `count` untyped or XML-typed links.
    Untyped { index: usize, count: usize },
    None,
}

impl LinkChoice {
    pub fn select(links: &[AtomLink]) -> LinkChoice {
        if links.len() == 1 {
            return LinkChoice::Only(0);
        }

        if let Some(i) = links
            .iter()
            .position(|l| l.link_type.as_deref().is_some_and(cap::is_cap_mime_type))
        {
            return LinkChoice::Typed(i);
        }

        let untyped: Vec<usize> = links
            .iter()
            .enumerate()
            .filter(|(_, l)| l.link_type.as_deref().is_none_or(is_fallback_type))
            .map(|(i, _)| i)
            .collect();
        match untyped.last() {
            Some(&index) => LinkChoice::Untyped {
                index,
                count: untyped.len(),
            },
            None => LinkChoice::None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            LinkChoice::Only(i) | LinkChoice::Typed(i) | LinkChoice::Untyped { index: i, .. } => {
                Some(*i)
            }
            LinkChoice::None => None,
        }
    }
}

fn is_fallback_type(link_type: &str) -> bool {
    let link_type = link_type.trim();
    link_type.is_empty() || link_type.to_ascii_lowercase().contains("xml")
}

pub(crate) fn read_feed(root: Node<'_, '_>, text: &str) -> AtomFeed {
    let path = format!("/{}[1]", root.tag_name().name());
    let children = nodes::element_children(root, &path);

    AtomFeed {
        id: nodes::child_text(&children, "id"),
        title: nodes::child_text(&children, "title"),
        updated: nodes::child_text(&children, "updated"),
        entries: children
            .iter()
            .filter(|c| c.name == "entry")
            .map(|c| read_entry(c, text))
            .collect(),
        path,
    }
}

fn read_entry(entry: &Child<'_, '_>, text: &str) -> AtomEntry {
    let children = nodes::element_children(entry.node, &entry.path);
    let is_atom = |c: &&Child<'_, '_>| c.in_namespace(super::ATOM_XMLNS);

    let links: Vec<AtomLink> = children
        .iter()
        .filter(is_atom)
        .filter(|c| c.name == "link")
        .filter_map(|c| {
            let href = c.node.attribute("href")?.trim().to_string();
            Some(AtomLink {
                path: c.path.clone(),
                href,
                rel: c.node.attribute("rel").map(str::to_string),
                link_type: c.node.attribute("type").map(str::to_string),
            })
        })
        .collect();
    let link_choice = LinkChoice::select(&links);

    let embedded = children
        .iter()
        .filter(is_atom)
        .find(|c| c.name == "content")
        .and_then(|content| embedded_alert(content, text));

    let payload = match (embedded, link_choice.index()) {
        (Some(payload), _) => payload,
        (None, Some(i)) => Payload::Link {
            href: links[i].href.clone(),
            content_type: links[i].link_type.clone(),
        },
        (None, None) => Payload::Missing,
    };

    AtomEntry {
        path: entry.path.clone(),
        id: nodes::child_text(&children, "id"),
        title: nodes::child_text(&children, "title"),
        updated: nodes::child_text(&children, "updated"),
        links,
        link_choice,
        payload,
    }
}

/// The alert carried by `<content>`, as a child element or as escaped text.
fn embedded_alert(content: &Child<'_, '_>, text: &str) -> Option<Payload> {
    if let Some(node) = content.node.children().find(|n| cap::parser::is_alert(*n)) {
        return Some(Payload::from_node(node, content.path.clone(), text));
    }

    let escaped = nodes::text(content.node);
    if escaped.is_empty() {
        return None;
    }

    match Document::parse(&escaped) {
        Ok(doc) if cap::parser::is_alert(doc.root_element()) => Some(Payload::from_parsed(
            parse_alert(doc.root_element()),
            content.path.clone(),
            escaped.clone(),
        )),
        Ok(_) => None,
        Err(err) if mentions_cap(&escaped) => Some(Payload::Invalid(
            Reason::new(content.path.clone(), &feed::ATOM_ENTRY_INVALID_CONTENT)
                .with_args([err.to_string()]),
        )),
        Err(_) => None,
    }
}

fn mentions_cap(text: &str) -> bool {
    [CAP10_XMLNS, CAP11_XMLNS, CAP12_XMLNS]
        .iter()
        .any(|ns| text.contains(ns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str, link_type: Option<&str>) -> AtomLink {
        AtomLink {
            path: String::new(),
            href: href.to_string(),
            rel: None,
            link_type: link_type.map(str::to_string),
        }
    }

    #[test]
    fn test_typed_link_wins() {
        let links = vec![
            link("a", None),
            link("b", Some("application/cap+xml")),
            link("c", Some("application/common-alerting-protocol+xml")),
        ];
        assert_eq!(LinkChoice::select(&links), LinkChoice::Typed(1));
    }

    #[test]
    fn test_only_link_is_used_whatever_its_type() {
        assert_eq!(LinkChoice::select(&[link("x", Some("text/html"))]), LinkChoice::Only(0));
        assert_eq!(LinkChoice::select(&[link("x", None)]), LinkChoice::Only(0));
        assert_eq!(LinkChoice::select(&[]), LinkChoice::None);
    }

    #[test]
    fn test_last_untyped_or_xml_link() {
        let links = vec![link("a", None), link("b", Some("text/html")), link("c", Some(" "))];
        assert_eq!(
            LinkChoice::select(&links),
            LinkChoice::Untyped { index: 2, count: 2 }
        );

        let links = vec![link("a", Some("text/html")), link("b", Some("Application/XML"))];
        assert_eq!(
            LinkChoice::select(&links),
            LinkChoice::Untyped { index: 1, count: 1 }
        );

        let links = vec![link("a", Some("text/html")), link("b", Some("image/png"))];
        assert_eq!(LinkChoice::select(&links), LinkChoice::None);
    }
}
