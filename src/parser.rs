//! The grammar state machine: tokenizes and validates JSON, dispatching one
//! event per token to a [`Handler`](crate::Handler).
//!
//! Unlike the source library, which scans a mutable buffer and carves
//! tokens out of it by writing temporary NUL terminators, this crate scans
//! an immutable `&[u8]` and hands out `(start, end)` slices directly — both
//! designs are valid renderings of the same grammar (see DESIGN.md), and
//! the immutable one means a slice handed to a callback stays valid for as
//! long as the original buffer does, not just for the duration of the call.

use crate::error::ParseError;
use crate::handler::{Handler, HandlerStack};
use std::ops::ControlFlow;

/// Maximum nesting depth, counting the implicit root frame. Exceeding it is
/// a syntax error. This is part of the contract, not a tunable — see
/// DESIGN.md's Open Question log.
const MAX_DEPTH: usize = 512;

struct Parser<'h> {
    buf: &'h [u8],
    pos: usize,
    handlers: HandlerStack<'h>,
    depth: usize,
}

/// Parse `input` as a single JSON document, delivering events to `root`.
///
/// `root` is borrowed, not consumed, so callers can inspect whatever state
/// it accumulated once parsing finishes (successfully or not).
///
/// Returns `Err(ParseError::Syntax { .. })` for malformed input, or
/// `Err(ParseError::Aborted { .. })` if a handler callback returned
/// `ControlFlow::Break`. On success, exactly one value (scalar, object, or
/// array) has been fully delivered and nothing but whitespace follows it.
pub fn parse<'h, H>(input: &'h [u8], root: &'h mut H) -> Result<(), ParseError>
where
    H: Handler + 'h,
{
    let boxed: Box<dyn Handler + 'h> = Box::new(root);
    let mut parser = Parser {
        buf: input,
        pos: 0,
        handlers: HandlerStack::new(boxed),
        depth: 0,
    };
    parser.run()
}

impl<'h> Parser<'h> {
    fn run(&mut self) -> Result<(), ParseError> {
        self.skip_ws();
        if self.pos >= self.buf.len() {
            return self.syntax_error();
        }
        self.parse_value()?;
        self.skip_ws();
        if self.pos != self.buf.len() {
            return self.syntax_error();
        }
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(0x20 | 0x09 | 0x0A | 0x0D)) {
            self.pos += 1;
        }
    }

    fn syntax_error<T>(&self) -> Result<T, ParseError> {
        Err(ParseError::Syntax {
            position: self.pos,
        })
    }

    fn call<F>(&mut self, f: F) -> Result<(), ParseError>
    where
        F: FnOnce(&mut dyn Handler, &mut crate::handler::ParserHandle<'_, 'h>) -> ControlFlow<i32>,
    {
        match self.handlers.dispatch(self.depth, f) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(code) => Err(ParseError::Aborted {
                position: self.pos,
                code,
            }),
        }
    }

    fn parse_value(&mut self) -> Result<(), ParseError> {
        self.skip_ws();
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => {
                let s = self.scan_string_body()?;
                self.call(|h, handle| h.on_string(handle, s))
            }
            Some(b't') => {
                self.expect_literal(b"true")?;
                self.call(|h, handle| h.on_bool(handle, true))
            }
            Some(b'f') => {
                self.expect_literal(b"false")?;
                self.call(|h, handle| h.on_bool(handle, false))
            }
            Some(b'n') => {
                self.expect_literal(b"null")?;
                self.call(|h, handle| h.on_null(handle))
            }
            Some(b'-') | Some(b'0'..=b'9') => {
                let n = self.scan_number()?;
                self.call(|h, handle| h.on_number(handle, n))
            }
            _ => self.syntax_error(),
        }
    }

    fn expect_literal(&mut self, literal: &'static [u8]) -> Result<(), ParseError> {
        if self.buf[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            self.syntax_error()
        }
    }

    fn parse_object(&mut self) -> Result<(), ParseError> {
        self.pos += 1; // consume '{'
        self.call(|h, handle| h.on_start_object(handle))?;
        if self.depth + 1 >= MAX_DEPTH {
            return self.syntax_error();
        }
        self.depth += 1;

        let mut after_comma = false;
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'}') => {
                    if after_comma {
                        return self.syntax_error();
                    }
                    self.pos += 1;
                    self.call(|h, handle| h.on_end_object(handle))?;
                    self.depth -= 1;
                    return Ok(());
                }
                Some(b'"') => {
                    let key = self.scan_string_body()?;
                    self.call(|h, handle| h.on_key(handle, key))?;
                    self.skip_ws();
                    if self.peek() != Some(b':') {
                        return self.syntax_error();
                    }
                    self.pos += 1;
                    self.parse_value()?;
                    after_comma = false;
                    self.skip_ws();
                    match self.peek() {
                        Some(b',') => {
                            self.pos += 1;
                            after_comma = true;
                        }
                        Some(b'}') => {
                            self.pos += 1;
                            self.call(|h, handle| h.on_end_object(handle))?;
                            self.depth -= 1;
                            return Ok(());
                        }
                        _ => return self.syntax_error(),
                    }
                }
                _ => return self.syntax_error(),
            }
        }
    }

    fn parse_array(&mut self) -> Result<(), ParseError> {
        self.pos += 1; // consume '['
        self.call(|h, handle| h.on_start_array(handle))?;
        if self.depth + 1 >= MAX_DEPTH {
            return self.syntax_error();
        }
        self.depth += 1;

        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.call(|h, handle| h.on_end_array(handle))?;
            self.depth -= 1;
            return Ok(());
        }

        loop {
            self.parse_value()?;
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    continue;
                }
                Some(b']') => {
                    self.pos += 1;
                    self.call(|h, handle| h.on_end_array(handle))?;
                    self.depth -= 1;
                    return Ok(());
                }
                _ => return self.syntax_error(),
            }
        }
    }

    /// Scans a JSON string body starting at the opening `"` (`self.peek()`
    /// must be `Some(b'"')`), returning the bytes between the quotes
    /// (undecoded) and leaving `self.pos` just past the closing quote.
    ///
    /// A `"` ends the string iff it is preceded by an even number of
    /// consecutive backslashes (zero counts as even); an odd run means the
    /// quote itself is escaped and scanning continues.
    fn scan_string_body(&mut self) -> Result<&'h [u8], ParseError> {
        self.pos += 1; // consume opening quote
        let start = self.pos;
        loop {
            let rel = self.buf[self.pos..].iter().position(|&b| b == b'"');
            let Some(rel) = rel else {
                return self.syntax_error();
            };
            let quote_pos = self.pos + rel;
            if quote_pos > start && self.buf[quote_pos - 1] == b'\\' {
                let mut k = quote_pos;
                while k > start && self.buf[k - 1] == b'\\' {
                    k -= 1;
                }
                let backslash_run = quote_pos - k;
                if backslash_run % 2 == 1 {
                    self.pos = quote_pos + 1;
                    continue;
                }
            }
            let slice = &self.buf[start..quote_pos];
            self.pos = quote_pos + 1;
            return Ok(slice);
        }
    }

    /// Scans `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?` starting at
    /// the current position, returning the matched slice. Shared by
    /// object-value, array-element, and root-scalar contexts — the source
    /// library hand-duplicates this state machine once per context.
    fn scan_number(&mut self) -> Result<&'h [u8], ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return self.syntax_error();
                }
            }
            Some(b'1'..=b'9') => {
                self.pos += 1;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            }
            _ => return self.syntax_error(),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            let frac_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.pos == frac_start {
                return self.syntax_error();
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.pos == exp_start {
                return self.syntax_error();
            }
        }

        Ok(&self.buf[start..self.pos])
    }
}
