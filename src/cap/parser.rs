//! Alert parser
//!
//! Builds an [`Alert`] from a CAP `<alert>` element. Problems that only
//! affect part of the alert (a missing mandatory child, a duplicate
//! single-valued element, an unknown enum literal, a malformed date or
//! geometry) do not abort parsing; they are collected as reasons with
//! paths relative to the alert, starting at `/alert[1]`.

use roxmltree::{Document, Node};

use super::date;
use super::model::*;
use crate::document::nodes::{self, Child};
use crate::error::CapError;
use crate::reason::{cap, Reasons};

/// A parsed alert and the findings collected while parsing it.
#[derive(Debug, Clone)]
pub struct ParsedAlert {
    pub alert: Alert,
    pub reasons: Reasons,
}

/// Whether `node` is an `<alert>` in one of the CAP namespaces.
pub fn is_alert(node: Node<'_, '_>) -> bool {
    node.is_element()
        && node.tag_name().name() == "alert"
        && node
            .tag_name()
            .namespace()
            .and_then(CapVersion::from_namespace)
            .is_some()
}

/// Parse a standalone CAP document.
pub fn parse_alert_str(text: &str) -> Result<ParsedAlert, CapError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let doc = Document::parse(text)?;
    parse_alert(doc.root_element())
}

/// Parse an `<alert>` element in place.
pub fn parse_alert(node: Node<'_, '_>) -> Result<ParsedAlert, CapError> {
    let tag = node.tag_name();
    let version = tag
        .namespace()
        .and_then(CapVersion::from_namespace)
        .filter(|_| tag.name() == "alert")
        .ok_or_else(|| CapError::NotCapDocument {
            reason: match tag.namespace() {
                Some(ns) => format!("<{}> in namespace {ns} is not a CAP alert", tag.name()),
                None => format!("<{}> is not a CAP alert", tag.name()),
            },
        })?;

    let mut parser = AlertParser {
        version,
        reasons: Reasons::new(),
    };
    let path = format!("/alert[{}]", nodes::sibling_index(node));
    let alert = parser.alert(node, &path);

    Ok(ParsedAlert {
        alert,
        reasons: parser.reasons,
    })
}

struct AlertParser {
    version: CapVersion,
    reasons: Reasons,
}

/// Children of one CAP element, split by name.
struct Fields<'a, 'input> {
    name: &'static str,
    path: String,
    children: Vec<Child<'a, 'input>>,
}

impl<'a, 'input> Fields<'a, 'input> {
    fn all<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s Child<'a, 'input>> {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn has(&self, name: &str) -> bool {
        self.all(name).next().is_some()
    }
}

impl AlertParser {
    fn fields<'a, 'input>(
        &mut self,
        node: Node<'a, 'input>,
        name: &'static str,
        path: &str,
        known: &[&str],
    ) -> Fields<'a, 'input> {
        let ns = self.version.namespace();
        let mut children = Vec::new();

        for child in nodes::element_children(node, path) {
            if !child.in_namespace(ns) {
                // Signatures and extensions live in other namespaces.
                continue;
            }
            if known.contains(&child.name.as_str()) {
                children.push(child);
            } else {
                self.reasons
                    .add_with(child.path.clone(), &cap::UNSUPPORTED_ELEMENT, [child.name.clone()]);
            }
        }

        Fields {
            name,
            path: path.to_string(),
            children,
        }
    }

    /// First occurrence of a single-valued element; later ones are reported.
    fn single<'f, 'a, 'input>(
        &mut self,
        fields: &'f Fields<'a, 'input>,
        name: &str,
    ) -> Option<&'f Child<'a, 'input>> {
        let mut matches = fields.all(name);
        let first = matches.next()?;
        for dup in matches {
            self.reasons.add_with(
                dup.path.clone(),
                &cap::DUPLICATE_ELEMENT,
                [name.to_string(), dup.text()],
            );
        }
        Some(first)
    }

    fn required<'f, 'a, 'input>(
        &mut self,
        fields: &'f Fields<'a, 'input>,
        name: &str,
    ) -> Option<&'f Child<'a, 'input>> {
        let found = self.single(fields, name);
        if found.is_none() {
            self.missing(fields, name);
        }
        found
    }

    fn missing(&mut self, fields: &Fields<'_, '_>, name: &str) {
        self.reasons.add_with(
            fields.path.clone(),
            &cap::MISSING_REQUIRED_ELEMENT,
            [fields.name.to_string(), format!("<{name}>")],
        );
    }

    fn text(&mut self, fields: &Fields<'_, '_>, name: &str) -> Option<String> {
        self.single(fields, name).map(Child::text)
    }

    fn required_text(&mut self, fields: &Fields<'_, '_>, name: &str) -> String {
        self.required(fields, name)
            .map(Child::text)
            .unwrap_or_default()
    }

    fn date(&mut self, fields: &Fields<'_, '_>, name: &str, required: bool) -> Option<String> {
        let child = if required {
            self.required(fields, name)
        } else {
            self.single(fields, name)
        }?;
        let value = child.text();
        if !date::is_valid(&value) {
            self.reasons
                .add_with(child.path.clone(), &cap::INVALID_DATE, [name.to_string(), value.clone()]);
        }
        Some(value)
    }

    fn enum_value<T>(&mut self, child: &Child<'_, '_>, allowed: fn() -> String) -> Option<T>
    where
        T: std::str::FromStr,
    {
        let value = child.text();
        match value.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                self.reasons.add_with(
                    child.path.clone(),
                    &cap::INVALID_ENUM_VALUE,
                    [child.name.clone(), value, allowed()],
                );
                None
            }
        }
    }

    fn single_enum<T>(
        &mut self,
        fields: &Fields<'_, '_>,
        name: &str,
        required: bool,
        allowed: fn() -> String,
    ) -> Option<T>
    where
        T: std::str::FromStr,
    {
        let child = if required {
            self.required(fields, name)
        } else {
            self.single(fields, name)
        }?;
        self.enum_value(child, allowed)
    }

    fn alert(&mut self, node: Node<'_, '_>, path: &str) -> Alert {
        let fields = self.fields(
            node,
            "alert",
            path,
            &[
                "identifier", "sender", "password", "sent", "status", "msgType", "source",
                "scope", "restriction", "addresses", "code", "note", "references", "incidents",
                "info",
            ],
        );

        let mut alert = Alert::new(self.version.namespace());
        alert.identifier = self.required_text(&fields, "identifier");
        alert.sender = self.required_text(&fields, "sender");
        alert.password = self.text(&fields, "password");
        alert.sent = self.date(&fields, "sent", true).unwrap_or_default();
        alert.status = self.single_enum(&fields, "status", true, Status::allowed);
        alert.msg_type = self.single_enum(&fields, "msgType", true, MsgType::allowed);
        alert.source = self.text(&fields, "source");
        alert.scope = self.single_enum(&fields, "scope", true, Scope::allowed);
        alert.restriction = self.text(&fields, "restriction");
        alert.addresses = self.text(&fields, "addresses").map(|t| Group::parse(&t));
        alert.codes = fields.all("code").map(Child::text).collect();
        alert.note = self.text(&fields, "note");
        alert.references = self.text(&fields, "references").map(|t| Group::parse(&t));
        alert.incidents = self.text(&fields, "incidents").map(|t| Group::parse(&t));

        for child in fields.all("info") {
            let info = self.info(child.node, &child.path);
            alert.infos.push(info);
        }

        alert
    }

    fn info(&mut self, node: Node<'_, '_>, path: &str) -> Info {
        let fields = self.fields(
            node,
            "info",
            path,
            &[
                "language", "category", "event", "responseType", "urgency", "severity",
                "certainty", "audience", "eventCode", "effective", "onset", "expires",
                "senderName", "headline", "description", "instruction", "web", "contact",
                "parameter", "resource", "area",
            ],
        );

        let mut info = Info {
            language: self.text(&fields, "language"),
            ..Default::default()
        };

        if !fields.has("category") {
            self.missing(&fields, "category");
        }
        for child in fields.all("category") {
            if let Some(category) = self.enum_value(child, Category::allowed) {
                info.categories.push(category);
            }
        }
        info.event = self.required_text(&fields, "event");
        for child in fields.all("responseType") {
            if let Some(response) = self.enum_value(child, ResponseType::allowed) {
                info.response_types.push(response);
            }
        }
        info.urgency = self.single_enum(&fields, "urgency", true, Urgency::allowed);
        info.severity = self.single_enum(&fields, "severity", true, Severity::allowed);
        info.certainty = self.single_enum(&fields, "certainty", true, Certainty::allowed);
        info.audience = self.text(&fields, "audience");
        info.event_codes = fields
            .all("eventCode")
            .filter_map(|c| self.value_pair(c))
            .collect::<Vec<_>>();
        info.effective = self.date(&fields, "effective", false);
        info.onset = self.date(&fields, "onset", false);
        info.expires = self.date(&fields, "expires", false);
        info.sender_name = self.text(&fields, "senderName");
        info.headline = self.text(&fields, "headline");
        info.description = self.text(&fields, "description");
        info.instruction = self.text(&fields, "instruction");
        info.web = self.text(&fields, "web");
        info.contact = self.text(&fields, "contact");
        info.parameters = fields
            .all("parameter")
            .filter_map(|c| self.value_pair(c))
            .collect::<Vec<_>>();

        for child in fields.all("resource") {
            let resource = self.resource(child.node, &child.path);
            info.resources.push(resource);
        }
        for child in fields.all("area") {
            let area = self.area(child.node, &child.path);
            info.areas.push(area);
        }

        info
    }

    /// `<valueName>`/`<value>` children, or the CAP 1.0 `name=value` text.
    fn value_pair(&mut self, child: &Child<'_, '_>) -> Option<ValuePair> {
        let (name, ns) = (child.name.as_str(), self.version.namespace());
        let parts: Vec<Child<'_, '_>> = nodes::element_children(child.node, &child.path)
            .into_iter()
            .filter(|c| c.in_namespace(ns))
            .collect();

        if parts.is_empty() && self.version == CapVersion::V1_0 {
            let text = child.text();
            return match text.split_once('=') {
                Some((n, v)) => Some(ValuePair::new(n.trim(), v.trim())),
                None => Some(ValuePair::new(text, "")),
            };
        }

        let value_name = nodes::child_text(&parts, "valueName");
        let value = parts.iter().find(|c| c.name == "value").map(Child::text);
        match (value_name, value) {
            (Some(value_name), Some(value)) => Some(ValuePair { value_name, value }),
            (None, _) => {
                self.reasons.add_with(
                    child.path.clone(),
                    &cap::MISSING_REQUIRED_ELEMENT,
                    [name.to_string(), "<valueName>".to_string()],
                );
                None
            }
            (_, None) => {
                self.reasons.add_with(
                    child.path.clone(),
                    &cap::MISSING_REQUIRED_ELEMENT,
                    [name.to_string(), "<value>".to_string()],
                );
                None
            }
        }
    }

    fn resource(&mut self, node: Node<'_, '_>, path: &str) -> Resource {
        let fields = self.fields(
            node,
            "resource",
            path,
            &["resourceDesc", "mimeType", "size", "uri", "derefUri", "digest"],
        );

        let mut resource = Resource {
            resource_desc: self.required_text(&fields, "resourceDesc"),
            ..Default::default()
        };
        resource.mime_type = if self.version == CapVersion::V1_0 {
            self.text(&fields, "mimeType").unwrap_or_default()
        } else {
            self.required_text(&fields, "mimeType")
        };
        if let Some(child) = self.single(&fields, "size") {
            let text = child.text();
            match text.parse::<u64>() {
                Ok(size) => resource.size = Some(size),
                Err(_) => self
                    .reasons
                    .add_with(child.path.clone(), &cap::INVALID_RESOURCE_SIZE, [text]),
            }
        }
        resource.uri = self.text(&fields, "uri");
        resource.deref_uri = self.text(&fields, "derefUri");
        resource.digest = self.text(&fields, "digest");
        resource
    }

    fn area(&mut self, node: Node<'_, '_>, path: &str) -> Area {
        let fields = self.fields(
            node,
            "area",
            path,
            &["areaDesc", "polygon", "circle", "geocode", "altitude", "ceiling"],
        );

        let mut area = Area {
            area_desc: self.required_text(&fields, "areaDesc"),
            ..Default::default()
        };

        for child in fields.all("polygon") {
            let text = child.text();
            match parse_polygon(&text) {
                Some(polygon) => area.polygons.push(polygon),
                None => self
                    .reasons
                    .add_with(child.path.clone(), &cap::INVALID_POLYGON, [text]),
            }
        }
        for child in fields.all("circle") {
            let text = child.text();
            match parse_circle(&text) {
                Some(circle) => area.circles.push(circle),
                None => self
                    .reasons
                    .add_with(child.path.clone(), &cap::INVALID_CIRCLE, [text]),
            }
        }
        area.geocodes = fields
            .all("geocode")
            .filter_map(|c| self.value_pair(c))
            .collect::<Vec<_>>();
        area.altitude = self.number(&fields, "altitude");
        area.ceiling = self.number(&fields, "ceiling");
        area
    }

    fn number(&mut self, fields: &Fields<'_, '_>, name: &str) -> Option<f64> {
        let child = self.single(fields, name)?;
        let text = child.text();
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                self.reasons
                    .add_with(child.path.clone(), &cap::INVALID_VALUE, [name.to_string(), text]);
                None
            }
        }
    }
}

fn parse_point(text: &str) -> Option<Point> {
    let (lat, lon) = text.split_once(',')?;
    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lon.trim().parse().ok()?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    Some(Point {
        latitude,
        longitude,
    })
}

/// At least four WGS 84 points, first equal to last.
pub fn parse_polygon(text: &str) -> Option<Polygon> {
    let points = text
        .split_whitespace()
        .map(parse_point)
        .collect::<Option<Vec<_>>>()?;
    if points.len() < 4 || points.first() != points.last() {
        return None;
    }
    Some(Polygon { points })
}

/// `lat,lon radius`, radius in kilometers.
pub fn parse_circle(text: &str) -> Option<Circle> {
    let mut parts = text.split_whitespace();
    let center = parse_point(parts.next()?)?;
    let radius: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !radius.is_finite() || radius < 0.0 {
        return None;
    }
    Some(Circle { center, radius })
}
