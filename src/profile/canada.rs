//! CAP Canadian Profile (CAP-CP) 1.0

use std::collections::HashSet;

use super::checks::{
    area_path, check_update_references, event_code_set, flag_mismatched_infos, info_path,
    is_blank, ALERT,
};
use super::Profile;
use crate::cap::model::{Alert, MsgType};
use crate::reason::{Level, ReasonType, Reasons};

pub const CODE: &str = "profile:CAP-CP:1.0";
pub const VERSION_PREFIX: &str = "profile:CAP-CP:";
pub const EVENT_PREFIX: &str = "profile:CAP-CP:Event:";
pub const LOCATION_PREFIX: &str = "profile:CAP-CP:Location";

macro_rules! reason {
    ($name:ident, $level:ident, $template:literal) => {
        pub static $name: ReasonType =
            ReasonType::new(CODE, stringify!($name), Level::$level, $template);
    };
}

reason!(VERSION_CODE_REQUIRED, Error, "<code>{0}</code> required.");
reason!(INFO_IS_REQUIRED, Error, "At least one <info> must be present.");
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
    RECOGNIZED_EVENT_CODE_REQUIRED,
    Error,
    "The CAP-CP requires the use of an <eventCode> value from the CAP-CP Event References \
     document that should match the corresponding <event> value."
);
reason!(AREA_IS_REQUIRED, Error, "At least one <area> must be present.");
reason!(
    AREA_GEOCODE_IS_REQUIRED,
    Error,
    "At least one <geocode> value from the CAP-CP Location References document for messages \
     that describe areas within Canada is required."
);
reason!(
    ENGLISH_AND_FRENCH,
    Recommendation,
    "Consider alerts with 2 <info> blocks, one each for English and French."
);
reason!(
    EXPIRES_STRONGLY_RECOMMENDED,
    Recommendation,
    "<expires> is strongly recommended."
);
reason!(
    SENDER_NAME_STRONGLY_RECOMMENDED,
    Recommendation,
    "<senderName> is strongly recommended."
);
reason!(
    RESPONSE_TYPE_STRONGLY_RECOMMENDED,
    Recommendation,
    "<responseType> is strongly recommended."
);
reason!(
    INSTRUCTION_STRONGLY_RECOMMENDED,
    Recommendation,
    "<instruction> is strongly recommended."
);
reason!(
    CIRCLE_POLYGON_ENCOURAGED,
    Recommendation,
    "<polygon> and <circle>, while optional, are encouraged as more accurate representations \
     of <geocode> values."
);

#[derive(Debug, Clone, Copy, Default)]
pub struct CanadianProfile;

impl Profile for CanadianProfile {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        "CAP Canadian Profile v1.0"
    }

    fn documentation_url(&self) -> &'static str {
        "http://capan.ca/uploads/CAP-CP/CAP-CP_Intro_Rules_Beta_0.4.pdf"
    }

    fn validate(&self, alert: &Alert) -> Reasons {
        let mut reasons = Reasons::new();
        errors(alert, &mut reasons);
        recommendations(alert, &mut reasons);
        reasons
    }
}

fn errors(alert: &Alert, reasons: &mut Reasons) {
    if !alert.codes.iter().any(|c| c.starts_with(VERSION_PREFIX)) {
        reasons.add_with(ALERT, &VERSION_CODE_REQUIRED, [CODE]);
    }

    let public = !matches!(alert.msg_type, Some(MsgType::Ack | MsgType::Error));
    if public && alert.infos.is_empty() {
        reasons.add(ALERT, &INFO_IS_REQUIRED);
    }

    check_update_references(reasons, alert, &UPDATE_OR_CANCEL_MUST_REFERENCE);
    flag_mismatched_infos(reasons, &alert.infos, event_code_set, &EVENT_CODES_MUST_MATCH);

    for (i, info) in alert.infos.iter().enumerate() {
        let path = info_path(i);

        if !info.event_codes.iter().any(|c| c.value_name.starts_with(EVENT_PREFIX)) {
            reasons.add(path.clone(), &RECOGNIZED_EVENT_CODE_REQUIRED);
        }

        if info.areas.is_empty() {
            reasons.add(path, &AREA_IS_REQUIRED);
        }

        for (j, area) in info.areas.iter().enumerate() {
            if !area.geocodes.iter().any(|g| g.value_name.starts_with(LOCATION_PREFIX)) {
                reasons.add(area_path(i, j), &AREA_GEOCODE_IS_REQUIRED);
            }
        }
    }
}

fn recommendations(alert: &Alert, reasons: &mut Reasons) {
    let mut languages = HashSet::new();

    for (i, info) in alert.infos.iter().enumerate() {
        let path = info_path(i);
        languages.insert(info.language_or_default());

        if is_blank(info.expires.as_deref()) {
            reasons.add(path.clone(), &EXPIRES_STRONGLY_RECOMMENDED);
        }
        if is_blank(info.sender_name.as_deref()) {
            reasons.add(path.clone(), &SENDER_NAME_STRONGLY_RECOMMENDED);
        }
        if info.response_types.is_empty() {
            reasons.add(path.clone(), &RESPONSE_TYPE_STRONGLY_RECOMMENDED);
        }
        if is_blank(info.instruction.as_deref()) {
            reasons.add(path.clone(), &INSTRUCTION_STRONGLY_RECOMMENDED);
        }

        let has_shape = info
            .areas
            .iter()
            .any(|a| !a.polygons.is_empty() || !a.circles.is_empty());
        if !info.areas.is_empty() && !has_shape {
            reasons.add(area_path(i, 0), &CIRCLE_POLYGON_ENCOURAGED);
        }
    }

    let english = languages.contains("en-US") || languages.contains("en-CA");
    if !english || !languages.contains("fr-CA") {
        reasons.add(ALERT, &ENGLISH_AND_FRENCH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::model::{Area, Circle, Info, Point, ResponseType, ValuePair};
    use crate::cap::CAP12_XMLNS;

    fn info(language: &str) -> Info {
        Info {
            language: Some(language.to_string()),
            event: "tornado".to_string(),
            response_types: vec![ResponseType::Shelter],
            event_codes: vec![ValuePair::new("profile:CAP-CP:Event:0.4", "tornado")],
            expires: Some("2011-01-20T18:49:00-05:00".to_string()),
            sender_name: Some("Environment Canada".to_string()),
            instruction: Some("Take cover".to_string()),
            areas: vec![Area {
                area_desc: "Ottawa".to_string(),
                geocodes: vec![ValuePair::new("profile:CAP-CP:Location:0.3", "3506008")],
                circles: vec![Circle {
                    center: Point {
                        latitude: 45.4,
                        longitude: -75.7,
                    },
                    radius: 10.0,
                }],
                ..Area::default()
            }],
            ..Info::default()
        }
    }

    fn alert() -> Alert {
        let mut alert = Alert::new(CAP12_XMLNS);
        alert.msg_type = Some(MsgType::Alert);
        alert.codes = vec![CODE.to_string()];
        alert.infos = vec![info("en-CA"), info("fr-CA")];
        alert
    }

    fn keys(reasons: &Reasons) -> Vec<(&'static str, &str)> {
        reasons.iter().map(|r| (r.key(), r.path())).collect()
    }

    #[test]
    fn test_conformant_alert() {
        let reasons = CanadianProfile.validate(&alert());
        assert!(reasons.is_empty(), "{reasons:?}");
    }

    #[test]
    fn test_missing_infos() {
        let mut alert = alert();
        alert.codes.clear();
        alert.infos.clear();
        assert_eq!(
            keys(&CanadianProfile.validate(&alert)),
            vec![
                ("VERSION_CODE_REQUIRED", "/alert[1]"),
                ("INFO_IS_REQUIRED", "/alert[1]"),
                ("ENGLISH_AND_FRENCH", "/alert[1]"),
            ]
        );

        alert.msg_type = Some(MsgType::Ack);
        assert!(!CanadianProfile.validate(&alert).contains_key("INFO_IS_REQUIRED"));
    }

    #[test]
    fn test_unrecognized_codes() {
        let mut alert = alert();
        alert.infos[1].event_codes = vec![ValuePair::new("SAME", "TOR")];
        alert.infos[1].areas[0].geocodes = vec![ValuePair::new("SAME", "006113")];
        alert.infos[1].areas[0].circles.clear();
        assert_eq!(
            keys(&CanadianProfile.validate(&alert)),
            vec![
                ("EVENT_CODES_MUST_MATCH", "/alert[1]/info[2]"),
                ("RECOGNIZED_EVENT_CODE_REQUIRED", "/alert[1]/info[2]"),
                ("AREA_GEOCODE_IS_REQUIRED", "/alert[1]/info[2]/area[1]"),
                ("CIRCLE_POLYGON_ENCOURAGED", "/alert[1]/info[2]/area[1]"),
            ]
        );
    }

    #[test]
    fn test_reasons_carry_profile_source() {
        let mut alert = alert();
        alert.infos.pop();
        let reasons = CanadianProfile.validate(&alert);
        assert_eq!(keys(&reasons), vec![("ENGLISH_AND_FRENCH", "/alert[1]")]);
        assert_eq!(reasons.iter().next().unwrap().source(), CODE);
        assert_eq!(reasons.iter().next().unwrap().level(), Level::Recommendation);
    }
}
