//! Recursive-descent parser for Paradox script files.
//!
//! The grammar is line-agnostic:
//!
//! ```text
//! document := element*
//! element  := token | token '=' token | token '=' '{' element* '}'
//! token    := '"' any-except-quote '"' | bareword
//! ```
//!
//! A token is only known to be a key once the following `=` is seen, so the
//! parser scans a token first and decides with one character of lookahead.
//! Malformed input never fails the lenient entry points: whatever was built
//! before the parser gave up is returned.

use std::borrow::Cow;
use std::io::Read;
use std::iter::Peekable;
use std::path::Path;

use tracing::{debug, warn};

use super::document::Document;
use super::element::Element;
use crate::errors::ParseError;

/// Blocks nested deeper than this are abandoned rather than recursed into.
pub const MAX_DEPTH: usize = 512;

/// Parse script text, recovering from malformed input.
pub fn parse(input: &str) -> Document {
    Parser::new(input.chars()).parse()
}

/// Parse script text, failing if a block body stopped making progress or
/// nesting exceeded [`MAX_DEPTH`].
pub fn parse_strict(input: &str) -> Result<Document, ParseError> {
    let mut parser = Parser::new(input.chars());
    let document = parser.parse();
    match parser.take_error() {
        Some(err) => Err(err),
        None => Ok(document),
    }
}

/// Read everything from `reader` and parse it. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Document, ParseError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(parse(&decode(&bytes)))
}

/// Open and parse the script file at `path`.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document, ParseError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "parsing script file");
    let bytes = std::fs::read(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&decode(&bytes)))
}

/// Decode raw file bytes as UTF-8, replacing invalid sequences and dropping
/// a leading byte-order mark.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Cow::Owned(mut text) => {
            if text.starts_with('\u{feff}') {
                text.remove(0);
            }
            Cow::Owned(text)
        }
    }
}

/// Result of scanning one key or value token.
struct Token {
    /// Accumulated text, `None` when nothing was accumulated.
    text: Option<String>,
    /// `false` when input ran out before a terminator was seen.
    terminated: bool,
}

/// Forward-only parser over a character stream with one character of
/// lookahead.
pub struct Parser<I: Iterator<Item = char>> {
    input: Peekable<I>,
    offset: usize,
    depth: usize,
    error: Option<ParseError>,
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn new(input: I) -> Self {
        Self {
            input: input.peekable(),
            offset: 0,
            depth: 0,
            error: None,
        }
    }

    /// Number of characters consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Parse top-level elements until the input is exhausted or no further
    /// element can be formed.
    pub fn parse(&mut self) -> Document {
        let mut elements = Vec::new();
        while self.peek().is_some() {
            match self.parse_element() {
                Some(element) => elements.push(element),
                None => {
                    if let Some(found) = self.peek() {
                        debug!(offset = self.offset, %found, "stopping at unparsable input");
                    }
                    break;
                }
            }
        }
        debug!(
            count = elements.len(),
            chars = self.offset,
            "parsed script elements"
        );
        Document::new(elements)
    }

    /// The stall or nesting error recorded during [`Parser::parse`], if any.
    pub fn take_error(&mut self) -> Option<ParseError> {
        self.error.take()
    }

    fn peek(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.input.next();
        if next.is_some() {
            self.offset += 1;
        }
        next
    }

    /// Skip whitespace; returns whether any input follows.
    fn skip_whitespace(&mut self) -> bool {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                return true;
            }
            self.bump();
        }
        false
    }

    fn scan_token(&mut self) -> Token {
        let mut text = String::new();
        let mut quoted = false;
        loop {
            let Some(c) = self.peek() else {
                return Token {
                    text: non_empty(text),
                    terminated: false,
                };
            };

            if quoted {
                self.bump();
                if c == '"' {
                    return Token {
                        text: non_empty(text),
                        terminated: true,
                    };
                }
                text.push(c);
                continue;
            }

            if c == '"' && text.is_empty() {
                quoted = true;
                self.bump();
                continue;
            }

            if c.is_whitespace() || matches!(c, '=' | '{' | '}' | '"') {
                return Token {
                    text: non_empty(text),
                    terminated: true,
                };
            }

            text.push(c);
            self.bump();
        }
    }

    fn parse_element(&mut self) -> Option<Element> {
        if !self.skip_whitespace() {
            return None;
        }

        let key = self.scan_token();
        if !key.terminated {
            return key.text.map(Element::scalar);
        }

        if !self.skip_whitespace() || self.peek() != Some('=') {
            return key.text.map(Element::scalar);
        }
        self.bump();
        let key = key.text.unwrap_or_default();

        if !self.skip_whitespace() {
            return Some(Element::key_value(key, Some(String::new())));
        }

        if self.peek() == Some('{') {
            self.bump();
            if self.depth >= MAX_DEPTH {
                self.too_deep();
                return Some(Element::key_block(key, Vec::new()));
            }
            self.depth += 1;
            let children = self.parse_block_body();
            self.depth -= 1;
            return Some(Element::key_block(key, children));
        }

        let value = self.scan_token();
        Some(Element::key_value(key, value.text))
    }

    /// Elements up to and including the closing `}` (or end of input).
    fn parse_block_body(&mut self) -> Vec<Element> {
        let mut children = Vec::new();
        loop {
            match self.peek() {
                None => break,
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(_) => {}
            }

            let start = self.offset;
            if let Some(child) = self.parse_element() {
                children.push(child);
            }
            if self.offset == start {
                self.stall();
            }
        }
        children
    }

    /// A nested element consumed nothing (a stray `{`). Record it and treat
    /// the remaining input as the end of the stream.
    fn stall(&mut self) {
        let found = self.peek().unwrap_or_default();
        warn!(offset = self.offset, %found, "block parse made no progress, discarding rest of input");
        let err = ParseError::Stalled {
            offset: self.offset,
            found,
        };
        self.abandon(err);
    }

    /// A block opened past [`MAX_DEPTH`]. Record it and discard the rest of
    /// the input.
    fn too_deep(&mut self) {
        warn!(offset = self.offset, max_depth = MAX_DEPTH, "blocks nested too deeply, discarding rest of input");
        let err = ParseError::TooDeep {
            offset: self.offset,
            max_depth: MAX_DEPTH,
        };
        self.abandon(err);
    }

    /// Keep the first recorded error and drain the input so every enclosing
    /// block loop sees end of stream.
    fn abandon(&mut self, err: ParseError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
        while self.bump().is_some() {}
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
