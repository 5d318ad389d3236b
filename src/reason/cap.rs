//! CAP catalog
//!
//! Findings about a single alert, independent of any profile.

use super::{Level, ReasonType};

pub const SOURCE: &str = "CAP";

pub static CERTAINTY_VERY_LIKELY_DEPRECATED: ReasonType = ReasonType::new(
    SOURCE,
    "CERTAINTY_VERY_LIKELY_DEPRECATED",
    Level::Error,
    "<certainty> \"Very Likely\" has been deprecated. Use Likely instead.",
);
pub static CIRCULAR_REFERENCE: ReasonType = ReasonType::new(
    SOURCE,
    "CIRCULAR_REFERENCE",
    Level::Error,
    "Invalid <references>: \"{0}\". Alert cannot reference itself.",
);
pub static DUPLICATE_ELEMENT: ReasonType = ReasonType::new(
    SOURCE,
    "DUPLICATE_ELEMENT",
    Level::Error,
    "Invalid duplicate <{0}>, ignoring \"{1}\".",
);
pub static INVALID_ALTITUDE_CEILING_RANGE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_ALTITUDE_CEILING_RANGE",
    Level::Error,
    "Invalid <area>; ceiling must be greater than altitude.",
);
pub static INVALID_AREA: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_AREA",
    Level::Error,
    "Invalid <area>; when ceiling is specified altitude must also be specified.",
);
pub static INVALID_CIRCLE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_CIRCLE",
    Level::Error,
    "Invalid <circle> \"{0}\". Must be formatted like: \"-12.345,67.89 15.2\", \
     which is a [WGS 84] coordinate followed by a radius in kilometers.",
);
pub static INVALID_DATE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_DATE",
    Level::Error,
    "Invalid <{0}>: \"{1}\". Must be formatted like \"2002-05-24T16:49:00-07:00\".",
);
pub static INVALID_DEREF_URI: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_DEREF_URI",
    Level::Error,
    "Invalid <derefUri> \"{0}\". Must be base64-encoded.",
);
pub static INVALID_ENUM_VALUE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_ENUM_VALUE",
    Level::Error,
    "Invalid enum value <{0}> = \"{1}\". Must be one of {2}.",
);
pub static INVALID_IDENTIFIER: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_IDENTIFIER",
    Level::Error,
    "Invalid <identifier> \"{0}\". Must not include spaces, commas, or restricted characters (< and &).",
);
pub static INVALID_LANGUAGE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_LANGUAGE",
    Level::Error,
    "Invalid <language> \"{0}\". Must follow RFC 3066.",
);
pub static INVALID_MIME_TYPE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_MIME_TYPE",
    Level::Error,
    "Invalid <mimeType> \"{0}\". Must follow RFC 2046.",
);
pub static INVALID_POLYGON: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_POLYGON",
    Level::Error,
    "Invalid <polygon> \"{0}\". Expect a minimum of four [WGS 84] coordinates like: \
     \"12.3,-4.2 12.3,-4.3 12.4,-4.3 12.3,-4.2\", where the first and last coordinates are equal.",
);
pub static INVALID_REFERENCES: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_REFERENCES",
    Level::Error,
    "Invalid <references>: \"{0}\". Must be a non-empty, space-separated list of sender,identifier,sent triplets.",
);
pub static INVALID_RESOURCE_SIZE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_RESOURCE_SIZE",
    Level::Error,
    "Invalid size: \"{0}\".",
);
pub static INVALID_SENDER: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_SENDER",
    Level::Error,
    "Invalid <sender>: \"{0}\". Must not include spaces, commas, or restricted characters (< and &).",
);
pub static INVALID_SEQUENCE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_SEQUENCE",
    Level::Error,
    "Elements are not in the correct sequence order. One of {0} expected instead of \"{1}\".",
);
pub static INVALID_VALUE: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_VALUE",
    Level::Error,
    "Unsupported value <{0}> = \"{1}\".",
);
pub static INVALID_URI: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_URI",
    Level::Error,
    "Invalid <uri>: \"{0}\". Must be a full absolute or relative URI.",
);
pub static INVALID_WEB: ReasonType = ReasonType::new(
    SOURCE,
    "INVALID_WEB",
    Level::Error,
    "Invalid <web>: \"{0}\". Must be a full absolute URI.",
);
pub static MISSING_REQUIRED_ELEMENT: ReasonType = ReasonType::new(
    SOURCE,
    "MISSING_REQUIRED_ELEMENT",
    Level::Error,
    "The content of <{0}> is not complete. One of {1} is required.",
);
pub static OTHER: ReasonType = ReasonType::new(SOURCE, "OTHER", Level::Error, "{0}");
pub static PASSWORD_DEPRECATED: ReasonType = ReasonType::new(
    SOURCE,
    "PASSWORD_DEPRECATED",
    Level::Error,
    "<password> has been deprecated.",
);
pub static RELATIVE_URI_MISSING_DEREF_URI: ReasonType = ReasonType::new(
    SOURCE,
    "RELATIVE_URI_MISSING_DEREF_URI",
    Level::Error,
    "Relative <uri> must reference the content of <derefUri>.",
);
pub static RESTRICTION_SCOPE_MISMATCH: ReasonType = ReasonType::new(
    SOURCE,
    "RESTRICTION_SCOPE_MISMATCH",
    Level::Error,
    "<restriction> should be used only when <scope> is Restricted.",
);
pub static SIGNATURE_INVALID: ReasonType = ReasonType::new(
    SOURCE,
    "SIGNATURE_INVALID",
    Level::Error,
    "Invalid <Signature>: {0}",
);
pub static UNSUPPORTED_ELEMENT: ReasonType = ReasonType::new(
    SOURCE,
    "UNSUPPORTED_ELEMENT",
    Level::Error,
    "Unsupported element <{0}>.",
);

pub static TEXT_CONTAINS_HTML_ENTITIES: ReasonType = ReasonType::new(
    SOURCE,
    "TEXT_CONTAINS_HTML_ENTITIES",
    Level::Warning,
    "<{0}> contains HTML entities, which is discouraged as per section 3.3.3 of the CAP 1.2 specification.",
);
pub static TEXT_CONTAINS_HTML_TAGS: ReasonType = ReasonType::new(
    SOURCE,
    "TEXT_CONTAINS_HTML_TAGS",
    Level::Warning,
    "<{0}> contains HTML tags, which is discouraged.",
);
pub static POSTDATED_REFERENCE: ReasonType = ReasonType::new(
    SOURCE,
    "POSTDATED_REFERENCE",
    Level::Warning,
    "Invalid <references>: \"{0}\". Alert should not have post-dated references.",
);
pub static SAME_TEXT_DIFFERENT_LANGUAGE: ReasonType = ReasonType::new(
    SOURCE,
    "SAME_TEXT_DIFFERENT_LANGUAGE",
    Level::Warning,
    "Text in <{0}> appears in multiple <info> blocks but each specifies a different <language>.",
);

/// Schema diagnostics that match no translation row.
pub static SCHEMA_OTHER: ReasonType = ReasonType::new("Schema", "OTHER", Level::Error, "{0}");
pub static SCHEMA_INVALID_ENUMERATION: ReasonType = ReasonType::new(
    "Schema",
    "INVALID_ENUMERATION",
    Level::Error,
    "Value \"{0}\" is not one of {1}.",
);
pub static SCHEMA_INVALID_FORMAT: ReasonType = ReasonType::new(
    "Schema",
    "INVALID_FORMAT",
    Level::Error,
    "Value \"{0}\" does not match the required format for {1}.",
);
pub static SCHEMA_INVALID_VALUE: ReasonType = ReasonType::new(
    "Schema",
    "INVALID_VALUE",
    Level::Error,
    "\"{0}\" is not a valid value for {1}.",
);
