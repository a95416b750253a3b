use crate::AsmError;

pub const MAX_LABEL_LEN: usize = 32;

pub fn is_label_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

pub fn is_blank(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// Character scanner over the source text with one-character lookahead.
/// Both passes scan the same text with a fresh scanner; the second pass is
/// the "rewind" of the original design.
pub struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    /// Line number of the next unconsumed character, for diagnostics.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let c = self.peek();
        if let Some(c) = c {
            self.pos += 1;
            if c == b'\n' {
                self.line += 1;
            }
        }
        c
    }

    pub fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(c) if is_blank(c)) {
            self.bump();
        }
    }

    /// Consume the rest of the line, including the newline. Outside a
    /// comment only blanks and a `//` comment opener are allowed.
    pub fn finish_line(&mut self, mut in_comment: bool) -> Result<(), AsmError> {
        while let Some(c) = self.bump() {
            if c == b'\n' {
                return Ok(());
            }

            if in_comment || is_blank(c) {
                continue;
            }

            if c != b'/' {
                return Err(AsmError::Syntax {
                    line: self.line,
                    message: "Expected end-of-line",
                });
            }

            let line = self.line;
            if self.bump() != Some(b'/') {
                return Err(AsmError::Syntax {
                    line,
                    message: "Unexpected '/'",
                });
            }

            in_comment = true;
        }

        Ok(())
    }

    /// Read a label token. The caller has already checked that the next
    /// character is a label character.
    pub fn read_label(&mut self) -> Result<String, AsmError> {
        let line = self.line;

        if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            return Err(AsmError::Syntax {
                line,
                message: "Label begins with digit",
            });
        }

        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !is_label_char(c) {
                break;
            }
            if name.len() == MAX_LABEL_LEN {
                return Err(AsmError::LabelTooLong { line });
            }
            name.push(c as char);
            self.bump();
        }

        Ok(name)
    }
}
