//! Line index
//!
//! One pass over the document records the start line of every element by
//! structural path, and the line of every link target: an Atom
//! `<link href>`, the text of an RSS `<link>` or the text of an EDXL-DE
//! `<uri>`.

use std::collections::HashMap;

use super::path::{self, PathStack};
use super::tokens::{TokenKind, Tokens};
use crate::error::CapError;

/// Element whose text is being collected as a link target.
struct PendingLink {
    depth: usize,
    line: usize,
    text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    paths: HashMap<String, usize>,
    links: HashMap<String, usize>,
}

impl LineIndex {
    pub fn build(text: &str) -> Result<Self, CapError> {
        let mut index = LineIndex::default();
        let mut stack = PathStack::new();
        let mut pending: Option<PendingLink> = None;

        for token in Tokens::new(text) {
            let token = token?;
            match token.kind {
                TokenKind::StartTag | TokenKind::EmptyTag => {
                    let name = token.local_name();
                    let line = token.start.line;
                    stack.push(name);
                    index.record_path(stack.path(), line);

                    match (name, token.attribute("href")) {
                        ("link", Some(href)) => index.record_link(href.trim(), line),
                        ("link" | "uri", None) if token.kind == TokenKind::StartTag => {
                            pending = Some(PendingLink {
                                depth: stack.depth(),
                                line,
                                text: String::new(),
                            });
                        }
                        _ => {}
                    }

                    if token.kind == TokenKind::EmptyTag {
                        stack.pop(name, token.start)?;
                    }
                }
                TokenKind::EndTag => {
                    if let Some(link) = pending.take_if(|p| p.depth == stack.depth()) {
                        index.record_link(link.text.trim(), link.line);
                    }
                    stack.pop(token.local_name(), token.start)?;
                }
                TokenKind::Text | TokenKind::CData => {
                    if let Some(link) = pending.as_mut() {
                        link.text.push_str(&token.text());
                    }
                }
                _ => {}
            }
        }

        if let Some(open) = stack.current() {
            let lines = text.lines().count().max(1);
            return Err(CapError::malformed(
                lines,
                1,
                format!("element <{open}> is never closed"),
            ));
        }

        Ok(index)
    }

    fn record_path(&mut self, path: &str, line: usize) {
        self.paths.entry(path.to_string()).or_insert(line);
    }

    fn record_link(&mut self, target: &str, line: usize) {
        if target.is_empty() {
            return;
        }
        let slot = self.links.entry(target.to_string()).or_insert(0);
        if *slot == 0 {
            *slot = line;
        }
    }

    /// Line of the element at `path`, if it exists.
    pub fn line_of(&self, path: &str) -> Option<usize> {
        self.paths.get(path).copied()
    }

    /// Line of the first element pointing at `target`.
    pub fn line_of_link(&self, target: &str) -> Option<usize> {
        self.links.get(target.trim()).copied()
    }

    /// Line of `path`, or of its nearest recorded ancestor, or 0.
    pub fn resolve(&self, path: &str) -> usize {
        let mut current = Some(path);
        while let Some(p) = current {
            if let Some(line) = self.line_of(p) {
                return line;
            }
            current = path::parent(p);
        }
        0
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>1</id>
    <link href="http://example.org/a.cap" type="application/cap+xml"/>
  </entry>
  <entry>
    <id>2</id>
  </entry>
</feed>"#;

    #[test]
    fn test_paths_and_links() {
        let index = LineIndex::build(FEED).unwrap();
        assert_eq!(index.line_of("/feed[1]"), Some(2));
        assert_eq!(index.line_of("/feed[1]/entry[1]/link[1]"), Some(5));
        assert_eq!(index.line_of("/feed[1]/entry[2]/id[1]"), Some(8));
        assert_eq!(index.line_of_link("http://example.org/a.cap"), Some(5));
    }

    #[test]
    fn test_resolve_falls_back_to_ancestor() {
        let index = LineIndex::build(FEED).unwrap();
        assert_eq!(index.resolve("/feed[1]/entry[2]/title[1]"), 7);
        assert_eq!(index.resolve("/rss[1]/channel[1]"), 0);
    }

    #[test]
    fn test_text_links_first_wins() {
        let rss = "<rss>\n<channel>\n<item><link>\n  http://x/1 </link></item>\n\
                   <item><link>http://x/1</link></item>\n<item><link/></item></channel></rss>";
        let index = LineIndex::build(rss).unwrap();
        assert_eq!(index.line_of_link("http://x/1"), Some(3));
        assert_eq!(index.line_of("/rss[1]/channel[1]/item[3]/link[1]"), Some(6));
    }

    #[test]
    fn test_unbalanced_documents_fail() {
        assert!(LineIndex::build("<a><b></a>").is_err());
        assert!(LineIndex::build("<a>\n<b/>").is_err());
    }
}
