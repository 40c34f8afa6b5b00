/// A forward-only scanner over a catalog text field.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Consume characters while `pred` holds and return them.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek().filter(|&c| pred(c)) {
            self.pos += c.len_utf8();
        }
        &self.text[start..self.pos]
    }

    /// Skip leading whitespace, then consume a run of non-whitespace.
    pub fn word(&mut self) -> &'a str {
        self.skip_whitespace();
        self.take_while(|c| !c.is_whitespace())
    }

    /// Advance just past the next `delim`. Consumes everything if there is none.
    pub fn skip_past(&mut self, delim: char) -> bool {
        match self.rest().find(delim) {
            Some(i) => {
                self.pos += i + delim.len_utf8();
                true
            }
            None => {
                self.pos = self.text.len();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanning() {
        let mut cur = Cursor::new("  58 Eta Oph: rest");
        assert_eq!(cur.word(), "58");
        cur.skip_whitespace();
        assert_eq!(cur.take_while(|c| c.is_ascii_alphabetic()), "Eta");
        assert_eq!(cur.bump(), Some(' '));
        assert_eq!(cur.peek(), Some('O'));
        assert!(cur.skip_past(':'));
        assert_eq!(cur.rest(), " rest");
        assert_eq!(cur.word(), "rest");
        assert!(cur.is_at_end());
        assert_eq!(cur.word(), "");
        assert_eq!(cur.bump(), None);
        assert!(!cur.skip_past(':'));
    }
}
