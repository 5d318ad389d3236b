//! CAP data model
//!
//! Typed view of an alert. Free-text and date fields are kept as the
//! literal strings found in the document so validators can report the
//! offending value verbatim.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Declares a CAP enumeration whose variants map one-to-one onto the
/// literal strings allowed in the XML.
macro_rules! cap_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Allowed literals, formatted for messages: `[a, b, c]`.
            pub fn allowed() -> String {
                let names: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                format!("[{}]", names.join(", "))
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

cap_enum!(Status {
    Actual => "Actual",
    Exercise => "Exercise",
    System => "System",
    Test => "Test",
    Draft => "Draft",
});

cap_enum!(MsgType {
    Alert => "Alert",
    Update => "Update",
    Cancel => "Cancel",
    Ack => "Ack",
    Error => "Error",
});

cap_enum!(Scope {
    Public => "Public",
    Restricted => "Restricted",
    Private => "Private",
});

cap_enum!(Category {
    Geo => "Geo",
    Met => "Met",
    Safety => "Safety",
    Security => "Security",
    Rescue => "Rescue",
    Fire => "Fire",
    Health => "Health",
    Env => "Env",
    Transport => "Transport",
    Infra => "Infra",
    Cbrne => "CBRNE",
    Other => "Other",
});

cap_enum!(ResponseType {
    Shelter => "Shelter",
    Evacuate => "Evacuate",
    Prepare => "Prepare",
    Execute => "Execute",
    Avoid => "Avoid",
    Monitor => "Monitor",
    Assess => "Assess",
    AllClear => "AllClear",
    None => "None",
});

cap_enum!(Urgency {
    Immediate => "Immediate",
    Expected => "Expected",
    Future => "Future",
    Past => "Past",
    Unknown => "Unknown",
});

cap_enum!(Severity {
    Extreme => "Extreme",
    Severe => "Severe",
    Moderate => "Moderate",
    Minor => "Minor",
    Unknown => "Unknown",
});

cap_enum!(
    /// `Very Likely` is the CAP 1.0 spelling, deprecated since 1.1.
    Certainty {
        Observed => "Observed",
        VeryLikely => "Very Likely",
        Likely => "Likely",
        Possible => "Possible",
        Unlikely => "Unlikely",
        Unknown => "Unknown",
    }
);

/// CAP schema version, identified by the alert's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CapVersion {
    V1_0,
    V1_1,
    V1_2,
}

impl CapVersion {
    pub fn from_namespace(ns: &str) -> Option<Self> {
        match ns {
            super::CAP10_XMLNS => Some(CapVersion::V1_0),
            super::CAP11_XMLNS => Some(CapVersion::V1_1),
            super::CAP12_XMLNS => Some(CapVersion::V1_2),
            _ => None,
        }
    }

    pub fn namespace(&self) -> &'static str {
        match self {
            CapVersion::V1_0 => super::CAP10_XMLNS,
            CapVersion::V1_1 => super::CAP11_XMLNS,
            CapVersion::V1_2 => super::CAP12_XMLNS,
        }
    }
}

/// Whitespace-separated list where double-quoted runs may contain spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    pub values: Vec<String>,
}

impl Group {
    pub fn parse(text: &str) -> Group {
        let mut values = Vec::new();
        let mut current = String::new();
        let mut quoted = false;

        for ch in text.chars() {
            match ch {
                '"' => {
                    if quoted && !current.is_empty() {
                        values.push(std::mem::take(&mut current));
                    }
                    quoted = !quoted;
                }
                c if c.is_whitespace() && !quoted => {
                    if !current.is_empty() {
                        values.push(std::mem::take(&mut current));
                    }
                }
                c => current.push(c),
            }
        }
        if !current.is_empty() {
            values.push(current);
        }

        Group { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ValuePair {
    pub value_name: String,
    pub value: String,
}

impl ValuePair {
    pub fn new(value_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value_name: value_name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Area {
    pub area_desc: String,
    pub polygons: Vec<Polygon>,
    pub circles: Vec<Circle>,
    pub geocodes: Vec<ValuePair>,
    pub altitude: Option<f64>,
    pub ceiling: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resource {
    pub resource_desc: String,
    pub mime_type: String,
    pub size: Option<u64>,
    pub uri: Option<String>,
    pub deref_uri: Option<String>,
    pub digest: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Info {
    pub language: Option<String>,
    pub categories: Vec<Category>,
    pub event: String,
    pub response_types: Vec<ResponseType>,
    pub urgency: Option<Urgency>,
    pub severity: Option<Severity>,
    pub certainty: Option<Certainty>,
    pub audience: Option<String>,
    pub event_codes: Vec<ValuePair>,
    pub effective: Option<String>,
    pub onset: Option<String>,
    pub expires: Option<String>,
    pub sender_name: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub web: Option<String>,
    pub contact: Option<String>,
    pub parameters: Vec<ValuePair>,
    pub resources: Vec<Resource>,
    pub areas: Vec<Area>,
}

impl Info {
    /// Language of the block, `en-US` when unspecified.
    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or("en-US")
    }

    pub fn event_codes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ValuePair> + 'a {
        self.event_codes.iter().filter(move |p| p.value_name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub xmlns: String,
    pub identifier: String,
    pub sender: String,
    pub password: Option<String>,
    pub sent: String,
    pub status: Option<Status>,
    pub msg_type: Option<MsgType>,
    pub source: Option<String>,
    pub scope: Option<Scope>,
    pub restriction: Option<String>,
    pub addresses: Option<Group>,
    pub codes: Vec<String>,
    pub note: Option<String>,
    pub references: Option<Group>,
    pub incidents: Option<Group>,
    pub infos: Vec<Info>,
}

impl Alert {
    pub fn new(xmlns: impl Into<String>) -> Self {
        Self {
            xmlns: xmlns.into(),
            identifier: String::new(),
            sender: String::new(),
            password: None,
            sent: String::new(),
            status: None,
            msg_type: None,
            source: None,
            scope: None,
            restriction: None,
            addresses: None,
            codes: Vec::new(),
            note: None,
            references: None,
            incidents: None,
            infos: Vec::new(),
        }
    }

    pub fn version(&self) -> Option<CapVersion> {
        CapVersion::from_namespace(&self.xmlns)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn has_references(&self) -> bool {
        self.references.as_ref().is_some_and(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_literals() {
        assert_eq!("Very Likely".parse::<Certainty>(), Ok(Certainty::VeryLikely));
        assert_eq!("CBRNE".parse::<Category>(), Ok(Category::Cbrne));
        assert!("actual".parse::<Status>().is_err());
        assert_eq!(Scope::allowed(), "[Public, Restricted, Private]");
    }

    #[test]
    fn test_group_parse_quotes() {
        let group = Group::parse("one \"two three\"  four");
        assert_eq!(group.values, vec!["one", "two three", "four"]);
        assert!(Group::parse("   ").is_empty());
    }

    #[test]
    fn test_version_from_namespace() {
        let alert = Alert::new(crate::cap::CAP12_XMLNS);
        assert_eq!(alert.version(), Some(CapVersion::V1_2));
        assert_eq!(CapVersion::from_namespace("urn:example"), None);
    }
}
