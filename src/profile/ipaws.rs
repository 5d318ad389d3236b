//! US IPAWS profile, version 1.0
//!
//! Constraints the IPAWS profile places on top of CAP 1.2 for alerts
//! bound for EAS, CMAS and HazCollect.

use std::collections::BTreeSet;

use super::checks::{
    area_path, check_update_references, check_zero_timezone, event_code_set,
    exactly_one_named, flag_mismatched_infos, info_path, is_blank, ALERT,
};
use super::Profile;
use crate::cap::Alert;
use crate::reason::{Level, ReasonType, Reasons};

pub const CODE: &str = "IPAWSv1.0";

macro_rules! reason {
    ($name:ident, $level:ident, $template:literal) => {
        pub static $name: ReasonType =
            ReasonType::new(CODE, stringify!($name), Level::$level, $template);
    };
}

reason!(
    SENT_INCLUDE_TIMEZONE_OFFSET,
    Error,
    "<sent> should include the timezone offset. An offset of 0 is unlikely for US alerts."
);
reason!(
    EXPIRES_INCLUDE_TIMEZONE_OFFSET,
    Error,
    "<expires> should include the timezone offset. An offset of 0 is unlikely for US alerts."
);
reason!(VERSION_CODE_REQUIRED, Error, "<code>{0}</code> required.");
reason!(
    UPDATE_OR_CANCEL_MUST_REFERENCE,
    Error,
    "All related messages that have not yet expired MUST be referenced for \"Update\" and \"Cancel\" messages."
);
reason!(
    EVENT_CODES_MUST_MATCH,
    Error,
    "All <info> blocks must contain the same <eventCode>s."
);
reason!(
    CATEGORIES_MUST_MATCH,
    Error,
    "All <info> blocks must contain the same <category>s."
);
reason!(
    SAME_EVENT_CODE_REQUIRED,
    Error,
    "Messages intended for EAS, CMAS and HazCollect dissemination MUST include one and only one \
     instance of <eventCode> with a <valueName> of \"SAME\" and using a SAME-standard three-letter value."
);
reason!(EXPIRES_IS_REQUIRED, Error, "<expires> is required.");
reason!(AREA_IS_REQUIRED, Error, "At least one <area> must be present.");
reason!(
    INFO_EFFECTIVE_IS_IGNORED,
    Recommendation,
    "<effective> is ignored if present. Alerts SHALL be effective upon issuance."
);
reason!(
    INFO_ONSET_IS_IGNORED,
    Recommendation,
    "<onset> is ignored if present. Alerts SHALL be effective upon issuance."
);
reason!(
    INFO_DESCRIPTION_RECOMMENDED,
    Recommendation,
    "Messages should have meaningful values for the <description>."
);
reason!(
    INFO_INSTRUCTION_RECOMMENDED,
    Recommendation,
    "Messages should have meaningful values for the <instruction>."
);
reason!(
    AREA_SAME_GEOCODE_RECOMMENDED,
    Recommendation,
    "At least one instance of <geocode> with a <valueName> of \"SAME\" and a value of a SAME \
     6-digit location (extended FIPS) SHOULD be used."
);

#[derive(Debug, Clone, Copy, Default)]
pub struct IpawsProfile;

impl Profile for IpawsProfile {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        "US IPAWS Profile v1.0"
    }

    fn documentation_url(&self) -> &'static str {
        "http://docs.oasis-open.org/emergency/cap/v1.2/ipaws-profile/v1.0/cap-v1.2-ipaws-profile-v1.0.pdf"
    }

    fn validate(&self, alert: &Alert) -> Reasons {
        let mut reasons = Reasons::new();
        errors(alert, &mut reasons);
        recommendations(alert, &mut reasons);
        reasons
    }
}

fn errors(alert: &Alert, reasons: &mut Reasons) {
    check_zero_timezone(
        reasons,
        Some(&alert.sent),
        format!("{ALERT}/sent[1]"),
        &SENT_INCLUDE_TIMEZONE_OFFSET,
    );

    if !alert.has_code(CODE) {
        reasons.add_with(ALERT, &VERSION_CODE_REQUIRED, [CODE]);
    }

    check_update_references(reasons, alert, &UPDATE_OR_CANCEL_MUST_REFERENCE);

    flag_mismatched_infos(reasons, &alert.infos, event_code_set, &EVENT_CODES_MUST_MATCH);
    flag_mismatched_infos(
        reasons,
        &alert.infos,
        |info| info.categories.iter().copied().collect::<BTreeSet<_>>(),
        &CATEGORIES_MUST_MATCH,
    );

    for (i, info) in alert.infos.iter().enumerate() {
        let path = info_path(i);

        if is_blank(info.expires.as_deref()) {
            reasons.add(path.clone(), &EXPIRES_IS_REQUIRED);
        } else {
            check_zero_timezone(
                reasons,
                info.expires.as_deref(),
                format!("{path}/expires[1]"),
                &EXPIRES_INCLUDE_TIMEZONE_OFFSET,
            );
        }

        if !exactly_one_named(&info.event_codes, "SAME", |v| v.chars().count() == 3) {
            reasons.add(path.clone(), &SAME_EVENT_CODE_REQUIRED);
        }

        if info.areas.is_empty() {
            reasons.add(path, &AREA_IS_REQUIRED);
        }
    }
}

fn recommendations(alert: &Alert, reasons: &mut Reasons) {
    for (i, info) in alert.infos.iter().enumerate() {
        let path = info_path(i);

        if !is_blank(info.effective.as_deref()) {
            reasons.add(format!("{path}/effective[1]"), &INFO_EFFECTIVE_IS_IGNORED);
        }
        if !is_blank(info.onset.as_deref()) {
            reasons.add(format!("{path}/onset[1]"), &INFO_ONSET_IS_IGNORED);
        }
        if is_blank(info.description.as_deref()) {
            reasons.add(path.clone(), &INFO_DESCRIPTION_RECOMMENDED);
        }
        if is_blank(info.instruction.as_deref()) {
            reasons.add(path.clone(), &INFO_INSTRUCTION_RECOMMENDED);
        }

        for (j, area) in info.areas.iter().enumerate() {
            let has_same = area
                .geocodes
                .iter()
                .any(|g| g.value_name == "SAME" && g.value.chars().count() == 6);
            if !has_same {
                reasons.add(area_path(i, j), &AREA_SAME_GEOCODE_RECOMMENDED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::model::{Area, Category, Info, MsgType, ValuePair};
    use crate::cap::CAP12_XMLNS;

    fn info() -> Info {
        Info {
            categories: vec![Category::Met],
            event: "Tornado".to_string(),
            event_codes: vec![ValuePair::new("SAME", "TOR")],
            expires: Some("2011-01-20T18:49:00-07:00".to_string()),
            description: Some("A tornado".to_string()),
            instruction: Some("Take cover".to_string()),
            areas: vec![Area {
                area_desc: "County".to_string(),
                geocodes: vec![ValuePair::new("SAME", "006113")],
                ..Area::default()
            }],
            ..Info::default()
        }
    }

    fn alert() -> Alert {
        let mut alert = Alert::new(CAP12_XMLNS);
        alert.identifier = "a1".to_string();
        alert.sender = "s@example.com".to_string();
        alert.sent = "2011-01-20T16:49:00-07:00".to_string();
        alert.msg_type = Some(MsgType::Alert);
        alert.codes = vec![CODE.to_string()];
        alert.infos = vec![info()];
        alert
    }

    fn keys(reasons: &Reasons) -> Vec<(&'static str, &str)> {
        reasons.iter().map(|r| (r.key(), r.path())).collect()
    }

    #[test]
    fn test_conformant_alert() {
        assert!(IpawsProfile.validate(&alert()).is_empty());
    }

    #[test]
    fn test_event_codes_differ_on_second_info() {
        let mut alert = alert();
        let mut second = info();
        second.event_codes.push(ValuePair::new("NWS", "TOW"));
        alert.infos.push(second);
        assert_eq!(
            keys(&IpawsProfile.validate(&alert)),
            vec![("EVENT_CODES_MUST_MATCH", "/alert[1]/info[2]")]
        );
    }

    #[test]
    fn test_zero_offset_and_unparsable_dates() {
        let mut alert = alert();
        alert.sent = "2011-01-20T16:49:00+00:00".to_string();
        assert_eq!(
            keys(&IpawsProfile.validate(&alert)),
            vec![("SENT_INCLUDE_TIMEZONE_OFFSET", "/alert[1]/sent[1]")]
        );

        alert.sent = "yesterday".to_string();
        assert!(IpawsProfile.validate(&alert).is_empty());
    }

    #[test]
    fn test_errors_and_recommendations() {
        let mut alert = alert();
        alert.codes.clear();
        alert.msg_type = Some(MsgType::Cancel);
        let info = &mut alert.infos[0];
        info.event_codes = vec![ValuePair::new("SAME", "TOR"), ValuePair::new("SAME", "TORN")];
        info.expires = None;
        info.onset = Some("2011-01-20T16:49:00-07:00".to_string());
        info.instruction = None;
        info.areas[0].geocodes.clear();

        assert_eq!(
            keys(&IpawsProfile.validate(&alert)),
            vec![
                ("VERSION_CODE_REQUIRED", "/alert[1]"),
                ("UPDATE_OR_CANCEL_MUST_REFERENCE", "/alert[1]/msgType[1]"),
                ("EXPIRES_IS_REQUIRED", "/alert[1]/info[1]"),
                ("SAME_EVENT_CODE_REQUIRED", "/alert[1]/info[1]"),
                ("INFO_ONSET_IS_IGNORED", "/alert[1]/info[1]/onset[1]"),
                ("INFO_INSTRUCTION_RECOMMENDED", "/alert[1]/info[1]"),
                ("AREA_SAME_GEOCODE_RECOMMENDED", "/alert[1]/info[1]/area[1]"),
            ]
        );
    }
}
