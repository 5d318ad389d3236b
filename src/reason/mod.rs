//! Validation findings
//!
//! A [`Reason`] is one finding: a structural path into the document, a
//! [`ReasonType`] from one of the catalogs and the arguments for its
//! message template. [`Reasons`] is an ordered collection of them.

pub mod cap;
pub mod feed;
pub mod kind;
pub mod level;

pub use kind::ReasonType;
pub use level::Level;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason {
    path: String,
    kind: &'static ReasonType,
    args: Vec<String>,
    source: Option<String>,
}

impl Reason {
    pub fn new(path: impl Into<String>, kind: &'static ReasonType) -> Self {
        Self {
            path: path.into(),
            kind,
            args: Vec::new(),
            source: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Tag the reason with the component that produced it, overriding the
    /// catalog's own source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &'static ReasonType {
        self.kind
    }

    pub fn key(&self) -> &'static str {
        self.kind.key
    }

    pub fn level(&self) -> Level {
        self.kind.level
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(self.kind.source)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn message(&self) -> String {
        self.kind.format(&self.args)
    }

    /// Same reason, with `prefix` prepended to its path.
    pub fn prefixed(&self, prefix: &str) -> Reason {
        let mut reason = self.clone();
        if !prefix.is_empty() {
            reason.path = format!("{prefix}{}", self.path);
        }
        reason
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message())
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Reason", 5)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("key", self.key())?;
        state.serialize_field("source", self.source())?;
        state.serialize_field("level", &self.level())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// Ordered collection of reasons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reasons {
    items: Vec<Reason>,
}

impl Reasons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reason: Reason) {
        self.items.push(reason);
    }

    pub fn add(&mut self, path: impl Into<String>, kind: &'static ReasonType) {
        self.push(Reason::new(path, kind));
    }

    pub fn add_with<I, S>(&mut self, path: impl Into<String>, kind: &'static ReasonType, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Reason::new(path, kind).with_args(args));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reason> {
        self.items.iter()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.iter().any(|r| r.key() == key)
    }

    pub fn contains_level_or_higher(&self, level: Level) -> bool {
        self.items.iter().any(|r| r.level() >= level)
    }

    pub fn with_level(&self, level: Level) -> Reasons {
        self.items
            .iter()
            .filter(|r| r.level() == level)
            .cloned()
            .collect()
    }

    pub fn with_level_or_higher(&self, level: Level) -> Reasons {
        self.items
            .iter()
            .filter(|r| r.level() >= level)
            .cloned()
            .collect()
    }

    /// Every reason with `prefix` prepended to its path.
    pub fn prefixed(&self, prefix: &str) -> Reasons {
        self.items.iter().map(|r| r.prefixed(prefix)).collect()
    }

    pub fn into_vec(self) -> Vec<Reason> {
        self.items
    }
}

impl FromIterator<Reason> for Reasons {
    fn from_iter<T: IntoIterator<Item = Reason>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Reason> for Reasons {
    fn extend<T: IntoIterator<Item = Reason>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Reasons {
    type Item = Reason;
    type IntoIter = std::vec::IntoIter<Reason>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Reasons {
    type Item = &'a Reason;
    type IntoIter = std::slice::Iter<'a, Reason>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_uses_args() {
        let reason = Reason::new("/alert[1]/sent[1]", &cap::INVALID_DATE)
            .with_args(["sent", "2002-05-24"]);
        assert_eq!(reason.level(), Level::Error);
        assert_eq!(reason.source(), "CAP");
        assert!(reason.message().starts_with("Invalid <sent>: \"2002-05-24\"."));
    }

    #[test]
    fn test_source_override() {
        let reason = Reason::new("/alert[1]", &cap::OTHER)
            .with_args(["x"])
            .with_source("custom");
        assert_eq!(reason.source(), "custom");
        assert_eq!(reason.key(), "OTHER");
    }

    #[test]
    fn test_level_filters() {
        let mut reasons = Reasons::new();
        reasons.add("/rss[1]/channel[1]", &feed::RSS_PUBDATE_IS_RECOMMENDED);
        assert!(!reasons.contains_level_or_higher(Level::Warning));
        assert!(reasons.contains_level_or_higher(Level::Recommendation));

        reasons.add("/rss[1]/channel[1]/item[1]", &feed::RSS_ITEM_MISSING_CAP_LINK);
        assert!(reasons.contains_level_or_higher(Level::Error));
        assert_eq!(reasons.with_level(Level::Error).len(), 1);
        assert_eq!(reasons.with_level_or_higher(Level::Info).len(), 2);
    }

    #[test]
    fn test_serializes_rendered_message() {
        let reason = Reason::new("/rss[1]/channel[1]", &feed::RSS_PUBDATE_IS_RECOMMENDED);
        let value = serde_json::to_value(&reason).unwrap();
        assert_eq!(value["path"], "/rss[1]/channel[1]");
        assert_eq!(value["key"], "RSS_PUBDATE_IS_RECOMMENDED");
        assert_eq!(value["source"], "Feed");
        assert_eq!(value["level"], "recommendation");
        assert_eq!(value["message"], reason.message());
    }

    #[test]
    fn test_prefixed_paths() {
        let mut reasons = Reasons::new();
        reasons.add("/alert[1]/info[1]", &cap::OTHER);
        let prefixed = reasons.prefixed("/feed[1]/entry[2]/content[1]");
        assert_eq!(
            prefixed.iter().next().map(Reason::path),
            Some("/feed[1]/entry[2]/content[1]/alert[1]/info[1]")
        );
        assert_eq!(reasons.prefixed("").iter().next().map(Reason::path), Some("/alert[1]/info[1]"));
    }
}
