//! Structural paths
//!
//! A path names an element by its ancestry with 1-based same-name sibling
//! indexes, e.g. `/feed[1]/entry[2]/content[1]/alert[1]/info[1]`.

use std::collections::HashMap;

use crate::error::CapError;
use crate::location::tokens::Position;

struct Frame {
    name: String,
    /// Length of the path string before this frame was pushed.
    parent_len: usize,
    children: HashMap<String, usize>,
}

/// Stack of open elements, maintaining the current path incrementally.
#[derive(Default)]
pub struct PathStack {
    frames: Vec<Frame>,
    roots: HashMap<String, usize>,
    path: String,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn counts(&self) -> &HashMap<String, usize> {
        self.frames.last().map_or(&self.roots, |f| &f.children)
    }

    /// Index the next `name` child of the current element would get.
    pub fn peek_index(&self, name: &str) -> usize {
        self.counts().get(name).copied().unwrap_or(0) + 1
    }

    /// Open `name` under the current element and return its index.
    pub fn push(&mut self, name: &str) -> usize {
        let counts = match self.frames.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.roots,
        };
        let index = match counts.get_mut(name) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                counts.insert(name.to_string(), 1);
                1
            }
        };

        let parent_len = self.path.len();
        self.path.push('/');
        self.path.push_str(name);
        self.path.push('[');
        self.path.push_str(&index.to_string());
        self.path.push(']');

        self.frames.push(Frame {
            name: name.to_string(),
            parent_len,
            children: HashMap::new(),
        });
        index
    }

    /// Close the current element, which must be `name`.
    pub fn pop(&mut self, name: &str, at: Position) -> Result<(), CapError> {
        match self.frames.last() {
            Some(frame) if frame.name == name => {
                self.path.truncate(frame.parent_len);
                self.frames.pop();
                Ok(())
            }
            Some(frame) => Err(CapError::malformed(
                at.line,
                at.column,
                format!("end tag </{name}> does not match <{}>", frame.name),
            )),
            None => Err(CapError::malformed(
                at.line,
                at.column,
                format!("unexpected end tag </{name}>"),
            )),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.frames.last().map(|f| f.name.as_str())
    }
}

/// Parent of `path`, or `None` at the root.
pub fn parent(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(0) | None => None,
        Some(i) => Some(&path[..i]),
    }
}

/// Local name in the last segment of `path`, without its index.
pub fn last_name(path: &str) -> &str {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.split('[').next().unwrap_or(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_paths() {
        let mut stack = PathStack::new();
        let at = Position::new(1, 1);
        stack.push("feed");
        stack.push("entry");
        stack.pop("entry", at).unwrap();
        assert_eq!(stack.peek_index("entry"), 2);
        assert_eq!(stack.push("entry"), 2);
        stack.push("id");
        assert_eq!(stack.path(), "/feed[1]/entry[2]/id[1]");
        stack.pop("id", at).unwrap();
        assert_eq!(stack.path(), "/feed[1]/entry[2]");
        assert_eq!(stack.current(), Some("entry"));
    }

    #[test]
    fn test_mismatched_end_tag() {
        let mut stack = PathStack::new();
        stack.push("a");
        let err = stack.pop("b", Position::new(3, 4)).unwrap_err();
        assert!(matches!(err, CapError::MalformedDocument { line: 3, column: 4, .. }));
    }

    #[test]
    fn test_parent_and_last_name() {
        assert_eq!(parent("/a[1]/b[2]"), Some("/a[1]"));
        assert_eq!(parent("/a[1]"), None);
        assert_eq!(last_name("/a[1]/info[3]"), "info");
    }
}
