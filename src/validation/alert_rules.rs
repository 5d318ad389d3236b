//! Alert rules
//!
//! Checks on a parsed alert that need more than one element, or more than
//! the element's own text, to decide. Paths are relative to the alert.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::cap::date;
use crate::cap::model::{Alert, CapVersion, Certainty, Info, Resource, Scope};
use crate::reason::{cap, Reasons};

static LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").expect("valid regex"));
static ABSOLUTE_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:\S+$").expect("valid regex"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9]*(\s[^<>]*)?/?>").expect("valid regex"));
static HTML_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#x[0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("valid regex"));

const MIME_TOP_LEVEL: [&str; 8] = [
    "application",
    "audio",
    "image",
    "message",
    "model",
    "multipart",
    "text",
    "video",
];

const ALERT: &str = "/alert[1]";

pub fn check_alert(alert: &Alert) -> Reasons {
    let mut reasons = Reasons::new();
    let version = alert.version().unwrap_or(CapVersion::V1_2);

    if has_restricted_chars(&alert.identifier) {
        reasons.add_with(
            format!("{ALERT}/identifier[1]"),
            &cap::INVALID_IDENTIFIER,
            [alert.identifier.clone()],
        );
    }
    if has_restricted_chars(&alert.sender) {
        reasons.add_with(
            format!("{ALERT}/sender[1]"),
            &cap::INVALID_SENDER,
            [alert.sender.clone()],
        );
    }
    if alert.password.is_some() && version > CapVersion::V1_0 {
        reasons.add(format!("{ALERT}/password[1]"), &cap::PASSWORD_DEPRECATED);
    }
    if alert.restriction.is_some() && alert.scope.is_some_and(|s| s != Scope::Restricted) {
        reasons.add(
            format!("{ALERT}/restriction[1]"),
            &cap::RESTRICTION_SCOPE_MISMATCH,
        );
    }

    check_references(alert, version, &mut reasons);

    for (i, info) in alert.infos.iter().enumerate() {
        let path = format!("{ALERT}/info[{}]", i + 1);
        check_info(info, &path, version, &mut reasons);
    }
    check_translations(alert, &mut reasons);

    reasons
}

fn has_restricted_chars(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || c == ',' || c == '<' || c == '&')
}

fn check_references(alert: &Alert, version: CapVersion, reasons: &mut Reasons) {
    let Some(references) = &alert.references else {
        return;
    };
    let path = format!("{ALERT}/references[1]");

    if references.is_empty() {
        reasons.add_with(path, &cap::INVALID_REFERENCES, [String::new()]);
        return;
    }

    let sent = date::parse(&alert.sent);
    for reference in &references.values {
        if version == CapVersion::V1_0 {
            // CAP 1.0 references are `identifier/sender`, without a sent time.
            match reference.split_once('/') {
                Some((identifier, _)) if !identifier.is_empty() => {
                    if identifier == alert.identifier {
                        reasons.add_with(path.clone(), &cap::CIRCULAR_REFERENCE, [reference.clone()]);
                    }
                }
                _ => reasons.add_with(path.clone(), &cap::INVALID_REFERENCES, [reference.clone()]),
            }
            continue;
        }

        let parts: Vec<&str> = reference.split(',').collect();
        let [_sender, identifier, ref_sent] = parts.as_slice() else {
            reasons.add_with(path.clone(), &cap::INVALID_REFERENCES, [reference.clone()]);
            continue;
        };

        let Some(ref_sent) = date::parse(ref_sent) else {
            reasons.add_with(path.clone(), &cap::INVALID_REFERENCES, [reference.clone()]);
            continue;
        };

        if *identifier == alert.identifier {
            reasons.add_with(path.clone(), &cap::CIRCULAR_REFERENCE, [reference.clone()]);
        } else if sent.is_some_and(|sent| ref_sent > sent) {
            reasons.add_with(path.clone(), &cap::POSTDATED_REFERENCE, [reference.clone()]);
        }
    }
}

fn check_info(info: &Info, path: &str, version: CapVersion, reasons: &mut Reasons) {
    if let Some(language) = &info.language {
        if !LANGUAGE.is_match(language) {
            reasons.add_with(
                format!("{path}/language[1]"),
                &cap::INVALID_LANGUAGE,
                [language.clone()],
            );
        }
    }

    if info.certainty == Some(Certainty::VeryLikely) && version > CapVersion::V1_0 {
        reasons.add(
            format!("{path}/certainty[1]"),
            &cap::CERTAINTY_VERY_LIKELY_DEPRECATED,
        );
    }

    if let Some(web) = &info.web {
        if !ABSOLUTE_URI.is_match(web) {
            reasons.add_with(format!("{path}/web[1]"), &cap::INVALID_WEB, [web.clone()]);
        }
    }

    for (name, text) in [
        ("headline", &info.headline),
        ("description", &info.description),
        ("instruction", &info.instruction),
    ] {
        let Some(text) = text else { continue };
        if HTML_TAG.is_match(text) {
            reasons.add_with(format!("{path}/{name}[1]"), &cap::TEXT_CONTAINS_HTML_TAGS, [name]);
        }
        if HTML_ENTITY.is_match(text) {
            reasons.add_with(
                format!("{path}/{name}[1]"),
                &cap::TEXT_CONTAINS_HTML_ENTITIES,
                [name],
            );
        }
    }

    for (j, resource) in info.resources.iter().enumerate() {
        check_resource(resource, &format!("{path}/resource[{}]", j + 1), reasons);
    }

    for (k, area) in info.areas.iter().enumerate() {
        let area_path = format!("{path}/area[{}]", k + 1);
        match (area.altitude, area.ceiling) {
            (None, Some(_)) => reasons.add(area_path, &cap::INVALID_AREA),
            (Some(altitude), Some(ceiling)) if altitude > ceiling => reasons.add(
                format!("{area_path}/ceiling[1]"),
                &cap::INVALID_ALTITUDE_CEILING_RANGE,
            ),
            _ => {}
        }
    }
}

fn check_resource(resource: &Resource, path: &str, reasons: &mut Reasons) {
    if !resource.mime_type.is_empty() && !is_mime_type(&resource.mime_type) {
        reasons.add_with(
            format!("{path}/mimeType[1]"),
            &cap::INVALID_MIME_TYPE,
            [resource.mime_type.clone()],
        );
    }

    if let Some(deref) = &resource.deref_uri {
        let compact: String = deref.split_whitespace().collect();
        if STANDARD.decode(compact.as_bytes()).is_err() {
            reasons.add_with(
                format!("{path}/derefUri[1]"),
                &cap::INVALID_DEREF_URI,
                [abbreviate(deref)],
            );
        }
    }

    if let Some(uri) = &resource.uri {
        if uri.chars().any(char::is_whitespace) {
            reasons.add_with(format!("{path}/uri[1]"), &cap::INVALID_URI, [uri.clone()]);
        } else if !ABSOLUTE_URI.is_match(uri) && resource.deref_uri.is_none() {
            reasons.add(format!("{path}/uri[1]"), &cap::RELATIVE_URI_MISSING_DEREF_URI);
        }
    }
}

fn is_mime_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((top, sub)) = essence.split_once('/') else {
        return false;
    };
    let top = top.to_ascii_lowercase();
    let token = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
    };
    (MIME_TOP_LEVEL.contains(&top.as_str()) || top.starts_with("x-")) && token(sub)
}

fn abbreviate(value: &str) -> String {
    const MAX: usize = 40;
    match value.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

/// The same human-readable text should not appear under different languages.
fn check_translations(alert: &Alert, reasons: &mut Reasons) {
    let mut seen: HashMap<(&str, &str), &str> = HashMap::new();

    for (i, info) in alert.infos.iter().enumerate() {
        let language = info.language_or_default();
        for (name, text) in [
            ("headline", &info.headline),
            ("description", &info.description),
            ("instruction", &info.instruction),
        ] {
            let Some(text) = text.as_deref().filter(|t| !t.is_empty()) else {
                continue;
            };
            match seen.get(&(name, text)) {
                Some(first) if !first.eq_ignore_ascii_case(language) => reasons.add_with(
                    format!("{ALERT}/info[{}]/{name}[1]", i + 1),
                    &cap::SAME_TEXT_DIFFERENT_LANGUAGE,
                    [name],
                ),
                Some(_) => {}
                None => {
                    seen.insert((name, text), language);
                }
            }
        }
    }
}
