//! Feed rules
//!
//! Container-level requirements for Atom, RSS and EDXL-DE documents.
//! Every entry, item and content object is checked; one bad entry does
//! not hide problems in the next.

use std::collections::HashSet;

use crate::document::{AtomFeed, Distribution, LinkChoice, Payload, RssChannel};
use crate::reason::{feed, Reasons};

pub fn check_atom(doc: &AtomFeed) -> Reasons {
    let mut reasons = Reasons::new();

    if doc.id.is_none() {
        reasons.add(doc.path.clone(), &feed::ATOM_ID_IS_REQUIRED);
    }
    if doc.title.is_none() {
        reasons.add(doc.path.clone(), &feed::ATOM_TITLE_IS_REQUIRED);
    }
    if doc.updated.is_none() {
        reasons.add(doc.path.clone(), &feed::ATOM_UPDATED_IS_REQUIRED);
    }

    let mut ids = HashSet::new();
    for entry in &doc.entries {
        match &entry.id {
            Some(id) => {
                if !ids.insert(id.as_str()) {
                    reasons.add_with(entry.path.clone(), &feed::ATOM_ENTRY_NON_UNIQUE_IDS, [id.clone()]);
                }
            }
            None => reasons.add(entry.path.clone(), &feed::ATOM_ENTRY_ID_IS_REQUIRED),
        }
        if entry.title.is_none() {
            reasons.add(entry.path.clone(), &feed::ATOM_ENTRY_TITLE_IS_REQUIRED);
        }
        if entry.updated.is_none() {
            reasons.add(entry.path.clone(), &feed::ATOM_ENTRY_UPDATED_IS_REQUIRED);
        }

        match (&entry.payload, &entry.link_choice) {
            (Payload::Missing, _) => {
                reasons.add(entry.path.clone(), &feed::ATOM_ENTRY_MISSING_CAP_LINK);
            }
            (Payload::Link { href, .. }, LinkChoice::Untyped { count, .. }) if *count > 1 => {
                reasons.add_with(
                    entry.path.clone(),
                    &feed::ATOM_ENTRY_AMBIGUOUS_CAP_LINK,
                    [count.to_string(), href.clone()],
                );
            }
            _ => {}
        }
    }

    reasons
}

pub fn check_rss(channel: &RssChannel) -> Reasons {
    let mut reasons = Reasons::new();

    if channel.pub_date.is_none() {
        reasons.add(
            format!("{}/pubDate[1]", channel.path),
            &feed::RSS_PUBDATE_IS_RECOMMENDED,
        );
    }

    for item in &channel.items {
        if item.title.is_none() && item.description.is_none() {
            reasons.add(
                item.path.clone(),
                &feed::RSS_ITEM_TITLE_OR_DESCRIPTION_IS_REQUIRED,
            );
        }
        if item.link.is_none() {
            reasons.add(item.path.clone(), &feed::RSS_ITEM_MISSING_CAP_LINK);
        }
        if item.guid.is_none() {
            reasons.add(
                format!("{}/guid[1]", item.path),
                &feed::RSS_ITEM_GUID_IS_RECOMMENDED,
            );
        }
    }

    reasons
}

pub fn check_edxl(dist: &Distribution) -> Reasons {
    let mut reasons = Reasons::new();

    if dist.content_objects.is_empty() {
        reasons.add(dist.path.clone(), &feed::EDXLDE_CONTENT_OBJECT_IS_REQUIRED);
    }

    for object in &dist.content_objects {
        if matches!(object.payload, Payload::Missing) {
            let path = object.content_path.as_ref().unwrap_or(&object.path);
            reasons.add(path.clone(), &feed::EDXLDE_NO_CAP_IN_CONTENT_OBJECT);
        }
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{normalize, NormalizedDocument, ATOM_XMLNS};
    use crate::reason::Level;

    fn atom(body: &str) -> AtomFeed {
        let text = format!("<feed xmlns=\"{ATOM_XMLNS}\">{body}</feed>");
        match normalize(&text).unwrap() {
            NormalizedDocument::Atom(feed) => feed,
            other => panic!("expected Atom, got {:?}", other.kind()),
        }
    }

    fn rss(body: &str) -> RssChannel {
        match normalize(&format!("<rss><channel>{body}</channel></rss>")).unwrap() {
            NormalizedDocument::Rss(channel) => channel,
            other => panic!("expected RSS, got {:?}", other.kind()),
        }
    }

    const HEAD: &str = "<id>f</id><title>t</title><updated>2011-01-20T16:49:00-07:00</updated>";
    const ENTRY: &str = "<title>e</title><updated>2011-01-20T16:49:00-07:00</updated>\
                         <link href=\"http://x/a\" type=\"application/cap+xml\"/>";

    #[test]
    fn test_duplicate_entry_ids() {
        let feed = atom(&format!(
            "{HEAD}<entry><id>1</id>{ENTRY}</entry><entry><id>1</id>{ENTRY}</entry><entry><id>2</id>{ENTRY}</entry>"
        ));
        let reasons = check_atom(&feed);
        assert_eq!(reasons.len(), 1);
        let reason = reasons.iter().next().unwrap();
        assert_eq!(reason.key(), "ATOM_ENTRY_NON_UNIQUE_IDS");
        assert_eq!(reason.path(), "/feed[1]/entry[2]");
        assert_eq!(reason.args(), ["1".to_string()]);
    }

    #[test]
    fn test_every_bad_entry_is_reported() {
        let feed = atom("<entry/><entry><id>x</id></entry>");
        let reasons = check_atom(&feed);
        let keys: Vec<(&str, &str)> = reasons.iter().map(|r| (r.key(), r.path())).collect();
        assert_eq!(
            keys,
            vec![
                ("ATOM_ID_IS_REQUIRED", "/feed[1]"),
                ("ATOM_TITLE_IS_REQUIRED", "/feed[1]"),
                ("ATOM_UPDATED_IS_REQUIRED", "/feed[1]"),
                ("ATOM_ENTRY_ID_IS_REQUIRED", "/feed[1]/entry[1]"),
                ("ATOM_ENTRY_TITLE_IS_REQUIRED", "/feed[1]/entry[1]"),
                ("ATOM_ENTRY_UPDATED_IS_REQUIRED", "/feed[1]/entry[1]"),
                ("ATOM_ENTRY_MISSING_CAP_LINK", "/feed[1]/entry[1]"),
                ("ATOM_ENTRY_TITLE_IS_REQUIRED", "/feed[1]/entry[2]"),
                ("ATOM_ENTRY_UPDATED_IS_REQUIRED", "/feed[1]/entry[2]"),
                ("ATOM_ENTRY_MISSING_CAP_LINK", "/feed[1]/entry[2]"),
            ]
        );
    }

    #[test]
    fn test_ambiguous_untyped_links_warn() {
        let feed = atom(&format!(
            "{HEAD}<entry><id>1</id><title>e</title><updated>u</updated>\
             <link href=\"http://x/1\"/><link href=\"http://x/2\"/></entry>"
        ));
        let reasons = check_atom(&feed);
        assert_eq!(reasons.len(), 1);
        let reason = reasons.iter().next().unwrap();
        assert_eq!(reason.level(), Level::Warning);
        assert_eq!(reason.args(), ["2".to_string(), "http://x/2".to_string()]);
    }

    #[test]
    fn test_lone_link_is_the_cap_link() {
        let feed = atom(&format!(
            "{HEAD}<entry><id>1</id><title>e</title><updated>u</updated>\
             <link href=\"http://x/1.html\" type=\"text/html\"/></entry>"
        ));
        assert!(check_atom(&feed).is_empty());
        assert!(matches!(
            &feed.entries[0].payload,
            Payload::Link { href, .. } if href == "http://x/1.html"
        ));
    }

    #[test]
    fn test_xml_typed_link_is_the_fallback() {
        let feed = atom(&format!(
            "{HEAD}<entry><id>1</id><title>e</title><updated>u</updated>\
             <link href=\"http://x/1.html\" type=\"text/html\"/>\
             <link href=\"http://x/1.xml\" type=\"application/xml\"/></entry>"
        ));
        assert!(check_atom(&feed).is_empty());
        assert!(matches!(
            &feed.entries[0].payload,
            Payload::Link { href, .. } if href == "http://x/1.xml"
        ));
    }

    #[test]
    fn test_empty_rss_item() {
        let channel = rss("<pubDate>Thu, 20 Jan 2011 16:49:00 -0700</pubDate><item><guid>g</guid></item>");
        let reasons = check_rss(&channel);
        let keys: Vec<(&str, &str, Level)> = reasons
            .iter()
            .map(|r| (r.key(), r.path(), r.level()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (
                    "RSS_ITEM_TITLE_OR_DESCRIPTION_IS_REQUIRED",
                    "/rss[1]/channel[1]/item[1]",
                    Level::Error
                ),
                ("RSS_ITEM_MISSING_CAP_LINK", "/rss[1]/channel[1]/item[1]", Level::Error),
            ]
        );
    }

    #[test]
    fn test_rss_recommendations() {
        let channel = rss("<item><title>t</title><link>http://x/1</link></item>");
        let reasons = check_rss(&channel);
        assert!(!reasons.contains_level_or_higher(Level::Warning));
        let paths: Vec<&str> = reasons.iter().map(|r| r.path()).collect();
        assert_eq!(
            paths,
            vec!["/rss[1]/channel[1]/pubDate[1]", "/rss[1]/channel[1]/item[1]/guid[1]"]
        );
    }

    #[test]
    fn test_edxl_rules() {
        let text = format!(
            "<EDXLDistribution xmlns=\"{}\"><contentObject><xmlContent/></contentObject>\
             <contentObject><nonXMLContent><mimeType>text/plain</mimeType></nonXMLContent></contentObject>\
             </EDXLDistribution>",
            crate::document::EDXLDE_XMLNS
        );
        let NormalizedDocument::Edxl(dist) = normalize(&text).unwrap() else {
            panic!("expected EDXL-DE");
        };
        let paths: Vec<String> = check_edxl(&dist).iter().map(|r| r.path().to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "/EDXLDistribution[1]/contentObject[1]/xmlContent[1]",
                "/EDXLDistribution[1]/contentObject[2]/nonXMLContent[1]",
            ]
        );

        let empty = Distribution {
            path: "/EDXLDistribution[1]".to_string(),
            content_objects: Vec::new(),
        };
        assert!(check_edxl(&empty).contains_key("EDXLDE_CONTENT_OBJECT_IS_REQUIRED"));
    }
}
