//! EDXL-DE distributions
//!
//! A content object carries an alert inside
//! `<xmlContent><embeddedXMLContent>`, or points at one from
//! `<nonXMLContent>` with a CAP `<mimeType>` and a `<uri>`.

use roxmltree::Node;

use super::nodes::{self, Child};
use super::Payload;
use crate::cap;

#[derive(Debug, Clone)]
pub struct Distribution {
    pub path: String,
    pub content_objects: Vec<ContentObject>,
}

#[derive(Debug, Clone)]
pub struct ContentObject {
    pub path: String,
    /// Path of the `xmlContent` or `nonXMLContent` child, if there is one.
    pub content_path: Option<String>,
    pub payload: Payload,
}

pub(crate) fn read_distribution(root: Node<'_, '_>, text: &str) -> Distribution {
    let path = format!("/{}[1]", root.tag_name().name());
    let content_objects = nodes::element_children(root, &path)
        .iter()
        .filter(|c| c.name == "contentObject")
        .map(|c| read_content_object(c, text))
        .collect();

    Distribution {
        path,
        content_objects,
    }
}

fn read_content_object(object: &Child<'_, '_>, text: &str) -> ContentObject {
    let children = nodes::element_children(object.node, &object.path);

    if let Some(xml) = children.iter().find(|c| c.name == "xmlContent") {
        let payload = nodes::element_children(xml.node, &xml.path)
            .iter()
            .filter(|c| c.name == "embeddedXMLContent")
            .find_map(|embedded| {
                embedded
                    .node
                    .children()
                    .find(|n| cap::parser::is_alert(*n))
                    .map(|node| Payload::from_node(node, embedded.path.clone(), text))
            })
            .unwrap_or(Payload::Missing);

        return ContentObject {
            path: object.path.clone(),
            content_path: Some(xml.path.clone()),
            payload,
        };
    }

    if let Some(non_xml) = children.iter().find(|c| c.name == "nonXMLContent") {
        let fields = nodes::element_children(non_xml.node, &non_xml.path);
        let mime_type = nodes::child_text(&fields, "mimeType");
        let uri = nodes::child_text(&fields, "uri");

        let payload = match (mime_type, uri) {
            (Some(mime), Some(href)) if cap::is_cap_mime_type(&mime) => Payload::Link {
                href,
                content_type: Some(mime),
            },
            _ => Payload::Missing,
        };

        return ContentObject {
            path: object.path.clone(),
            content_path: Some(non_xml.path.clone()),
            payload,
        };
    }

    ContentObject {
        path: object.path.clone(),
        content_path: None,
        payload: Payload::Missing,
    }
}
