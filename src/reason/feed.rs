//! Feed catalog
//!
//! Findings about the Atom, RSS and EDXL-DE containers around alerts.

use super::{Level, ReasonType};

pub const SOURCE: &str = "Feed";

pub static ATOM_ID_IS_REQUIRED: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_ID_IS_REQUIRED",
    Level::Error,
    "Feeds must have a non-empty <id> element.",
);
pub static ATOM_TITLE_IS_REQUIRED: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_TITLE_IS_REQUIRED",
    Level::Error,
    "Feeds must have a non-empty <title> element.",
);
pub static ATOM_UPDATED_IS_REQUIRED: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_UPDATED_IS_REQUIRED",
    Level::Error,
    "Feeds must have a non-empty <updated> element.",
);
pub static ATOM_ENTRY_ID_IS_REQUIRED: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_ENTRY_ID_IS_REQUIRED",
    Level::Error,
    "Entries must have a non-empty <id> element.",
);
pub static ATOM_ENTRY_TITLE_IS_REQUIRED: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_ENTRY_TITLE_IS_REQUIRED",
    Level::Error,
    "Entries must have a non-empty <title> element.",
);
pub static ATOM_ENTRY_UPDATED_IS_REQUIRED: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_ENTRY_UPDATED_IS_REQUIRED",
    Level::Error,
    "Entries must have a non-empty <updated> element.",
);
pub static ATOM_ENTRY_MISSING_CAP_LINK: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_ENTRY_MISSING_CAP_LINK",
    Level::Error,
    "Entries that do not embed CAP must contain a link to a CAP document, normally found with \
     type='application/cap+xml' or type='application/common-alerting-protocol+xml'.",
);
pub static ATOM_ENTRY_NON_UNIQUE_IDS: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_ENTRY_NON_UNIQUE_IDS",
    Level::Error,
    "Entries must have unique <id> elements, '{0}' is repeated.",
);
pub static ATOM_ENTRY_INVALID_CONTENT: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_ENTRY_INVALID_CONTENT",
    Level::Error,
    "Entry <content> could not be read as a CAP alert: {0}",
);
pub static ATOM_ENTRY_AMBIGUOUS_CAP_LINK: ReasonType = ReasonType::new(
    SOURCE,
    "ATOM_ENTRY_AMBIGUOUS_CAP_LINK",
    Level::Warning,
    "Entry has no typed CAP link and {0} untyped links; using '{1}'.",
);

pub static RSS_ITEM_TITLE_OR_DESCRIPTION_IS_REQUIRED: ReasonType = ReasonType::new(
    SOURCE,
    "RSS_ITEM_TITLE_OR_DESCRIPTION_IS_REQUIRED",
    Level::Error,
    "Items must have a non-empty <title> or <description>.",
);
pub static RSS_ITEM_MISSING_CAP_LINK: ReasonType = ReasonType::new(
    SOURCE,
    "RSS_ITEM_MISSING_CAP_LINK",
    Level::Error,
    "Item must contain a link to a CAP document.",
);
pub static RSS_PUBDATE_IS_RECOMMENDED: ReasonType = ReasonType::new(
    SOURCE,
    "RSS_PUBDATE_IS_RECOMMENDED",
    Level::Recommendation,
    "Feeds should contain a <pubDate>.",
);
pub static RSS_ITEM_GUID_IS_RECOMMENDED: ReasonType = ReasonType::new(
    SOURCE,
    "RSS_ITEM_GUID_IS_RECOMMENDED",
    Level::Recommendation,
    "Items should contain a <guid>.",
);

pub static EDXLDE_CONTENT_OBJECT_IS_REQUIRED: ReasonType = ReasonType::new(
    SOURCE,
    "EDXLDE_CONTENT_OBJECT_IS_REQUIRED",
    Level::Error,
    "Feeds must have a non-empty <contentObject> element.",
);
pub static EDXLDE_NO_CAP_IN_CONTENT_OBJECT: ReasonType = ReasonType::new(
    SOURCE,
    "EDXLDE_NO_CAP_IN_CONTENT_OBJECT",
    Level::Error,
    "Feeds must contain an xmlContent element containing a CAP alert, or a nonXMLContent \
     element pointing to a CAP alert.",
);

pub static LINK_UNREACHABLE: ReasonType = ReasonType::new(
    SOURCE,
    "LINK_UNREACHABLE",
    Level::Error,
    "Unable to load linked CAP document '{0}': {1}",
);
pub static LINK_NOT_CAP: ReasonType = ReasonType::new(
    SOURCE,
    "LINK_NOT_CAP",
    Level::Error,
    "Linked document '{0}' is not a CAP alert: {1}",
);

pub static OTHER: ReasonType = ReasonType::new(SOURCE, "OTHER", Level::Error, "{0}");
