use crate::token::Span;

/// Cursor into template source: byte offset plus 1-based line and
/// column.
///
/// Columns count Unicode scalar values, not bytes. `\r\n`, `\r` and
/// `\n` each end a line; `\r\n` counts once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Position of the first character of a template.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }

    /// Move past `text`, which must be the source slice that starts at
    /// the current offset.
    pub fn advance(&mut self, text: &str) {
        let bytes = text.as_bytes();
        let mut separators = 0;
        let mut tail = None;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    separators += 1;
                    i += 2;
                    tail = Some(i);
                }
                b'\r' | b'\n' => {
                    separators += 1;
                    i += 1;
                    tail = Some(i);
                }
                _ => i += 1,
            }
        }

        self.offset += text.len();

        match tail {
            Some(start) => {
                self.line += separators;
                self.column = 1 + text[start..].chars().count();
            }
            None => self.column += text.chars().count(),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}
