//! Token classification for roll queries

/// One whitespace-delimited piece of a query, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Optional sign followed by ASCII digits, fitting in `i64`
    Integer(i64),
    /// Integer-shaped but outside `i64`
    Overflow(&'a str),
    /// Anything else; eligible as a label
    Word(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(raw: &'a str) -> Self {
        if !is_integer_shaped(raw) {
            return Token::Word(raw);
        }

        match raw.parse::<i64>() {
            Ok(n) => Token::Integer(n),
            Err(_) => Token::Overflow(raw),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Token::Integer(_) | Token::Overflow(_))
    }
}

fn is_integer_shaped(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Split a raw query into tokens; consecutive whitespace yields no empty tokens
pub fn tokenize(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}
