//! Rule shapes shared by the profile catalogs.

use std::collections::BTreeSet;

use crate::cap::date;
use crate::cap::model::{Alert, Info, MsgType, ValuePair};
use crate::reason::{ReasonType, Reasons};

pub const ALERT: &str = "/alert[1]";

pub fn info_path(index: usize) -> String {
    format!("{ALERT}/info[{}]", index + 1)
}

pub fn area_path(info: usize, area: usize) -> String {
    format!("{}/area[{}]", info_path(info), area + 1)
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Flag a date whose offset is zero. Values that do not parse are left to
/// the structural checks.
pub fn check_zero_timezone(
    reasons: &mut Reasons,
    value: Option<&str>,
    path: impl Into<String>,
    kind: &'static ReasonType,
) {
    let Some(value) = value else {
        return;
    };
    if !date::is_valid(value) {
        return;
    }
    if date::timezone_offset_minutes(value) == Some(0) {
        reasons.add(path, kind);
    }
}

/// Report every info whose `key` set differs from the first info's.
pub fn flag_mismatched_infos<'a, T, F>(
    reasons: &mut Reasons,
    infos: &'a [Info],
    key: F,
    kind: &'static ReasonType,
) where
    T: Ord,
    F: Fn(&'a Info) -> BTreeSet<T>,
{
    let Some((first, rest)) = infos.split_first() else {
        return;
    };
    let expected = key(first);
    for (i, info) in rest.iter().enumerate() {
        if key(info) != expected {
            reasons.add(info_path(i + 1), kind);
        }
    }
}

pub fn event_code_set(info: &Info) -> BTreeSet<&ValuePair> {
    info.event_codes.iter().collect()
}

/// Whether exactly one pair is named `name`, and it passes `shape`.
/// A pair failing `shape` counts as none at all, so callers raise a single
/// "required" reason rather than a mix of signals.
pub fn exactly_one_named(pairs: &[ValuePair], name: &str, shape: impl Fn(&str) -> bool) -> bool {
    let mut count = 0;
    for pair in pairs.iter().filter(|p| p.value_name == name) {
        if !shape(&pair.value) {
            return false;
        }
        count += 1;
    }
    count == 1
}

/// Updates and cancellations must name the alerts they replace.
pub fn check_update_references(reasons: &mut Reasons, alert: &Alert, kind: &'static ReasonType) {
    let replaces = matches!(alert.msg_type, Some(MsgType::Update | MsgType::Cancel));
    if replaces && !alert.has_references() {
        reasons.add(format!("{ALERT}/msgType[1]"), kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::Level;

    static ZERO: ReasonType = ReasonType::new("Test", "ZERO", Level::Error, "zero offset");

    #[test]
    fn test_zero_timezone_only_for_valid_dates() {
        let mut reasons = Reasons::new();
        check_zero_timezone(&mut reasons, Some("2011-01-20T16:49:00+00:00"), "/a", &ZERO);
        check_zero_timezone(&mut reasons, Some("2011-01-20T16:49:00-00:00"), "/b", &ZERO);
        check_zero_timezone(&mut reasons, Some("2011-01-20 16:49:00+00:00"), "/c", &ZERO);
        check_zero_timezone(&mut reasons, Some("2011-01-20T16:49:00-07:00"), "/d", &ZERO);
        check_zero_timezone(&mut reasons, None, "/e", &ZERO);
        let paths: Vec<&str> = reasons.iter().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[test]
    fn test_exactly_one_named() {
        let pairs = vec![ValuePair::new("SAME", "CEM"), ValuePair::new("other", "x")];
        assert!(exactly_one_named(&pairs, "SAME", |v| v.len() == 3));

        let twice = vec![ValuePair::new("SAME", "CEM"), ValuePair::new("SAME", "TOR")];
        assert!(!exactly_one_named(&twice, "SAME", |v| v.len() == 3));

        let bad_shape = vec![ValuePair::new("SAME", "CEMX")];
        assert!(!exactly_one_named(&bad_shape, "SAME", |v| v.len() == 3));
        assert!(!exactly_one_named(&[], "SAME", |_| true));
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("  ")));
        assert!(!is_blank(Some("x")));
    }
}
