//! XML token stream
//!
//! Wraps a `quick_xml` reader and stamps every event with the line and
//! column where it starts and ends, for the line index and schema
//! diagnostics to replay the document structure against.

use std::borrow::Cow;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::CapError;

/// Token types in an XML document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name ...>`
    StartTag,
    /// `<name ... />`
    EmptyTag,
    /// `</name>`
    EndTag,
    Text,
    CData,
    Comment,
    /// The XML declaration or any other processing instruction.
    ProcessingInstruction,
    Doctype,
}

impl TokenKind {
    fn of(event: &Event<'_>) -> Self {
        match event {
            Event::Start(_) => TokenKind::StartTag,
            Event::Empty(_) => TokenKind::EmptyTag,
            Event::End(_) => TokenKind::EndTag,
            Event::Text(_) => TokenKind::Text,
            Event::CData(_) => TokenKind::CData,
            Event::Comment(_) => TokenKind::Comment,
            Event::DocType(_) => TokenKind::Doctype,
            _ => TokenKind::ProcessingInstruction,
        }
    }

    fn is_markup(self) -> bool {
        self != TokenKind::Text
    }
}

/// 1-based line and column. Columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub start: Position,
    /// Position just past the token's last character.
    pub end: Position,
    event: Event<'a>,
}

impl Token<'_> {
    /// Tag name without its namespace prefix, empty for non-tag tokens.
    pub fn local_name(&self) -> &str {
        let bytes = match &self.event {
            Event::Start(tag) | Event::Empty(tag) => tag.local_name().into_inner(),
            Event::End(tag) => tag.local_name().into_inner(),
            _ => return "",
        };
        std::str::from_utf8(bytes).unwrap_or("")
    }

    /// Unescaped value of the attribute `name` on a start or empty tag.
    pub fn attribute(&self, name: &str) -> Option<String> {
        let (Event::Start(tag) | Event::Empty(tag)) = &self.event else {
            return None;
        };
        let attribute = tag.try_get_attribute(name).ok().flatten()?;
        attribute.unescape_value().ok().map(Cow::into_owned)
    }

    /// Character data of a text or CDATA token. Text that cannot be
    /// unescaped, such as a DTD-declared entity, is returned verbatim.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.event {
            Event::Text(text) => text
                .unescape()
                .unwrap_or_else(|_| String::from_utf8_lossy(text)),
            Event::CData(data) => String::from_utf8_lossy(data),
            _ => Cow::Borrowed(""),
        }
    }
}

/// Byte offset to line and column.
struct LineMap {
    starts: Vec<usize>,
}

impl LineMap {
    fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn locate(&self, text: &str, offset: usize) -> Position {
        let offset = offset.min(text.len());
        let line = self.starts.partition_point(|&s| s <= offset);
        let line_start = self.starts[line - 1];
        let column = text
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count());
        Position::new(line, column + 1)
    }
}

/// Tokens of `text` in document order. Stops after the first error.
pub struct Tokens<'a> {
    reader: Reader<&'a [u8]>,
    text: &'a str,
    lines: LineMap,
    done: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            reader: Reader::from_str(text),
            text,
            lines: LineMap::new(text),
            done: false,
        }
    }

    /// The reader may report markup as starting just past its `<`.
    fn markup_start(&self, offset: usize) -> usize {
        let bytes = self.text.as_bytes();
        if offset > 0 && bytes.get(offset) != Some(&b'<') && bytes[offset - 1] == b'<' {
            offset - 1
        } else {
            offset
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, CapError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let begin = self.reader.buffer_position() as usize;
        match self.reader.read_event() {
            Ok(Event::Eof) => {
                self.done = true;
                None
            }
            Ok(event) => {
                let kind = TokenKind::of(&event);
                let begin = if kind.is_markup() {
                    self.markup_start(begin)
                } else {
                    begin
                };
                let end = self.reader.buffer_position() as usize;
                Some(Ok(Token {
                    kind,
                    start: self.lines.locate(self.text, begin),
                    end: self.lines.locate(self.text, end),
                    event,
                }))
            }
            Err(err) => {
                self.done = true;
                let at = self
                    .lines
                    .locate(self.text, self.reader.error_position() as usize);
                Some(Err(CapError::malformed(at.line, at.column, err.to_string())))
            }
        }
    }
}
