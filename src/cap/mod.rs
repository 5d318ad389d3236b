//! Common Alerting Protocol
//!
//! Alert data model, parser and date handling for CAP 1.0, 1.1 and 1.2.

pub mod date;
pub mod model;
pub mod parser;

pub use model::{Alert, Area, CapVersion, Info, Resource, ValuePair};
pub use parser::{parse_alert, parse_alert_str, ParsedAlert};

pub const CAP10_XMLNS: &str = "http://www.incident.com/cap/1.0";
pub const CAP11_XMLNS: &str = "urn:oasis:names:tc:emergency:cap:1.1";
pub const CAP12_XMLNS: &str = "urn:oasis:names:tc:emergency:cap:1.2";

pub const CAP_MIME_TYPE: &str = "application/cap+xml";
pub const ALTERNATE_CAP_MIME_TYPE: &str = "application/common-alerting-protocol+xml";

/// Whether `content_type` names a CAP payload, ignoring parameters and case.
pub fn is_cap_mime_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();
    essence.eq_ignore_ascii_case(CAP_MIME_TYPE) || essence.eq_ignore_ascii_case(ALTERNATE_CAP_MIME_TYPE)
}
