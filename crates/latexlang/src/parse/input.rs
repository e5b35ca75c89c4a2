use super::{Error, Location};
use crate::prelude as txl;

/// A cursor over the source text that tracks line and column.
pub(crate) struct Input {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    file: String,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    pos: usize,
    line: usize,
    column: usize,
}

impl Input {
    pub fn new(file: &str, source: &str) -> Input {
        Input {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            file: file.into(),
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.file.clone(), self.line, self.column)
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes the character if it is next.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.next();
            true
        } else {
            false
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    /// Skips a comment, including its newline and the next line's indentation.
    pub fn skip_comment(&mut self) {
        while let Some(c) = self.next() {
            if c == '\n' {
                break;
            }
        }
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.next();
        }
    }

    /// Skips spaces, comments and at most one line break.
    ///
    /// A blank line is never skipped.
    pub fn skip_spaces(&mut self) {
        let mut newline = false;
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.next();
                }
                Some('\n') if !newline => {
                    newline = true;
                    self.next();
                }
                Some('%') => self.skip_comment(),
                _ => return,
            }
        }
    }

    pub fn read_letters(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            s.push(c);
            self.next();
        }
        s
    }

    /// Reads raw text up to the closing delimiter, which is consumed.
    ///
    /// The opening delimiter must already be consumed.
    /// Braces nest; other delimiters only close at brace depth zero.
    /// Escaped characters are kept with their backslash; comments are dropped.
    pub fn read_raw(&mut self, close: char) -> txl::Result<String> {
        let mut s = String::new();
        let mut depth = 0_usize;
        loop {
            let Some(c) = self.next() else {
                return Err(Error::new(format!("`{close}`"), "the end of the input").into());
            };
            match c {
                '\\' => {
                    s.push(c);
                    if let Some(escaped) = self.next() {
                        s.push(escaped);
                    }
                }
                '%' => self.skip_comment(),
                c if c == close && depth == 0 => return Ok(s),
                '{' => {
                    depth += 1;
                    s.push(c);
                }
                '}' => {
                    if depth == 0 {
                        return Err(Error::new(format!("`{close}`"), "`}`").into());
                    }
                    depth -= 1;
                    s.push(c);
                }
                c => s.push(c),
            }
        }
    }

    /// Reads text up to the next unescaped occurrence of the character, which is consumed.
    pub fn read_until(&mut self, end: char) -> txl::Result<String> {
        let mut s = String::new();
        loop {
            match self.next() {
                None => {
                    return Err(Error::new(format!("`{end}`"), "the end of the input").into())
                }
                Some('\\') => {
                    s.push('\\');
                    if let Some(c) = self.next() {
                        s.push(c);
                    }
                }
                Some(c) if c == end => return Ok(s),
                Some(c) => s.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_tracking() {
        let mut input = Input::new("a.tex", "ab\ncd");
        input.next();
        input.next();
        assert_eq!(input.location(), Location::new("a.tex", 1, 3));
        input.next();
        assert_eq!(input.location(), Location::new("a.tex", 2, 1));
    }

    #[test]
    fn skip_spaces_keeps_blank_line() {
        let mut input = Input::new("", "  \n  \nx");
        input.skip_spaces();
        assert_eq!(input.peek(), Some('\n'));
    }

    #[test]
    fn skip_spaces_and_comments() {
        let mut input = Input::new("", " % comment\n   x");
        input.skip_spaces();
        assert_eq!(input.peek(), Some('x'));
    }

    #[test]
    fn read_raw_nested() {
        let mut input = Input::new("", "a{]}\\]b]c");
        assert_eq!(input.read_raw(']').unwrap(), "a{]}\\]b");
        assert_eq!(input.peek(), Some('c'));
    }

    #[test]
    fn read_raw_unterminated() {
        let mut input = Input::new("", "abc");
        let err = input.read_raw('}').unwrap_err();
        assert_eq!(err.title(), "expected `}`, found the end of the input");
    }

    #[test]
    fn read_raw_stray_brace() {
        let mut input = Input::new("", "a}b]");
        assert!(input.read_raw(']').is_err());
    }

    #[test]
    fn checkpoint_restore() {
        let mut input = Input::new("", "x\ny");
        let checkpoint = input.checkpoint();
        input.next();
        input.next();
        input.restore(checkpoint);
        assert_eq!(input.location(), Location::new("", 1, 1));
        assert_eq!(input.peek(), Some('x'));
    }
}
