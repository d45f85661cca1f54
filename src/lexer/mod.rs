use tracing::trace;

/// Lex returns the full token stream, terminated by a single `Token::Eof`.
pub type LexResult = Vec<Token>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Eof,
    Plus,
    Number,
}

impl core::fmt::Display for TokenType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Eof => write!(f, "end of input"),
            Self::Plus => write!(f, "'+'"),
            Self::Number => write!(f, "a number"),
        }
    }
}

/// Token represents any valid token in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Eof,
    Plus,
    Number(i64),
}

impl Token {
    pub fn to_token_type(&self) -> TokenType {
        match self {
            Token::Eof => TokenType::Eof,
            Token::Plus => TokenType::Plus,
            Token::Number(_) => TokenType::Number,
        }
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "the number {}", value),
            other => write!(f, "{}", other.to_token_type()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    col: usize,
    line: usize,
}

impl Cursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn increment_column_mut(&mut self) {
        self.index += 1;
        self.col += 1;
    }

    pub fn increment_line_mut(&mut self) {
        self.index += 1;
        self.line += 1;
        self.col = 0;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            index: 0,
            col: 0,
            line: 1,
        }
    }
}

impl core::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line: {}, column: {}", self.line, self.col)
    }
}

/// Scanner walks a source string one character at a time, handing out a
/// single token per request.
///
/// Any character that is neither a digit nor `+` is skipped. The scanner never
/// fails; rejecting stray input is left to the parser.
pub struct Scanner<'a> {
    source: core::iter::Peekable<core::str::Chars<'a>>,
    cursor: Cursor,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekable(),
            cursor: Cursor::default(),
        }
    }

    /// Returns the position of the next unread character.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn advance_mut(&mut self) -> Option<char> {
        let next = self.source.next();
        match next {
            Some('\n') => self.cursor.increment_line_mut(),
            Some(_) => self.cursor.increment_column_mut(),
            None => (),
        }
        next
    }

    /// Scans the next token. Once the source is exhausted every call returns
    /// `Token::Eof`.
    pub fn scan_token(&mut self) -> Token {
        loop {
            match self.source.peek().copied() {
                None => return Token::Eof,
                Some('+') => {
                    self.advance_mut();
                    return Token::Plus;
                }
                Some(c) if c.is_ascii_digit() => return self.scan_number(),
                Some(c) => {
                    if !c.is_whitespace() {
                        trace!(cursor = %self.cursor, character = ?c, "skipping unrecognized character");
                    }
                    self.advance_mut();
                }
            }
        }
    }

    // consumes the full run of digits. overflow wraps.
    fn scan_number(&mut self) -> Token {
        let mut value: i64 = 0;
        while let Some(digit) = self.source.peek().and_then(|c| c.to_digit(10)) {
            self.advance_mut();
            value = value.wrapping_mul(10).wrapping_add(i64::from(digit));
        }

        Token::Number(value)
    }
}

impl<'a> IntoIterator for Scanner<'a> {
    type Item = Token;
    type IntoIter = ScannerIntoIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        ScannerIntoIterator {
            scanner: self,
            exhausted: false,
        }
    }
}

/// Yields every token up to and including the terminating `Token::Eof`.
pub struct ScannerIntoIterator<'a> {
    scanner: Scanner<'a>,
    exhausted: bool,
}

impl<'a> Iterator for ScannerIntoIterator<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let next = self.scanner.scan_token();
        trace!(token = ?next, cursor = %self.scanner.cursor(), "scanned token");
        if next == Token::Eof {
            self.exhausted = true;
        }
        Some(next)
    }
}

/// lex all tokens into a vector, including the trailing `Token::Eof`.
pub fn lex(src: &str) -> LexResult {
    Scanner::new(src).into_iter().collect()
}
