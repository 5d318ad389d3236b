//! RSS 2.0 channels
//!
//! Items never embed alerts; an item's `<link>` text points at one.

use roxmltree::Node;

use super::nodes::{self, Child};
use super::Payload;

#[derive(Debug, Clone)]
pub struct RssChannel {
    pub path: String,
    pub pub_date: Option<String>,
    pub items: Vec<RssItem>,
}

#[derive(Debug, Clone)]
pub struct RssItem {
    pub path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub guid: Option<String>,
    pub payload: Payload,
}

pub(crate) fn read_channel(root: Node<'_, '_>) -> RssChannel {
    let root_path = format!("/{}[1]", root.tag_name().name());
    let roots = nodes::element_children(root, &root_path);

    let Some(channel) = roots.iter().find(|c| c.name == "channel") else {
        return RssChannel {
            path: format!("{root_path}/channel[1]"),
            pub_date: None,
            items: Vec::new(),
        };
    };

    let children = nodes::element_children(channel.node, &channel.path);
    RssChannel {
        path: channel.path.clone(),
        pub_date: nodes::child_text(&children, "pubDate"),
        items: children
            .iter()
            .filter(|c| c.name == "item")
            .map(read_item)
            .collect(),
    }
}

fn read_item(item: &Child<'_, '_>) -> RssItem {
    let children = nodes::element_children(item.node, &item.path);
    let link = nodes::child_text(&children, "link");

    RssItem {
        path: item.path.clone(),
        title: nodes::child_text(&children, "title"),
        description: nodes::child_text(&children, "description"),
        guid: nodes::child_text(&children, "guid"),
        payload: match &link {
            Some(href) => Payload::Link {
                href: href.clone(),
                content_type: None,
            },
            None => Payload::Missing,
        },
        link,
    }
}
