// File: crates/options/src/parser/cursor.rs
//
// Position within the token list and within the current token's characters.
//
// The character position is only meaningful while a clustered switch group
// (`-dv`, `-Ilib`) is being scanned.

use crate::argument::Argument;

#[derive(Debug, Clone)]
pub struct Cursor {
    arguments: Vec<Argument>,
    argument_index: usize,
    character_index: usize,
    chars: Vec<char>,
}

impl Cursor {
    pub fn new(arguments: Vec<Argument>) -> Self {
        Self {
            arguments,
            argument_index: 0,
            character_index: 0,
            chars: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&Argument> {
        self.arguments.get(self.argument_index)
    }

    pub fn advance_token(&mut self) {
        self.argument_index = self.argument_index.saturating_add(1);
    }

    /// Start scanning the current token's dashed form after its leading dash.
    pub fn begin_scan(&mut self) {
        self.chars = self
            .current()
            .map(|a| a.dashed_value().chars().collect())
            .unwrap_or_default();
        self.character_index = 1;
    }

    pub fn peek_current_char(&self) -> Option<char> {
        self.chars.get(self.character_index).copied()
    }

    pub fn advance_char(&mut self) {
        self.character_index = self.character_index.saturating_add(1);
    }

    /// Step past the current character and return the rest of the token, if any.
    ///
    /// Never moves to the next token, so `-W` alone yields `None`.
    pub fn take_remainder(&mut self) -> Option<String> {
        self.advance_char();
        self.chars
            .get(self.character_index..)
            .filter(|rest| !rest.is_empty())
            .map(|rest| rest.iter().collect())
    }

    /// Move to the next whole token and return its original text.
    pub fn next_whole_token(&mut self) -> Option<String> {
        self.advance_token();
        self.current().map(|a| a.original_value().to_string())
    }

    /// Place the character position on the last character of the token, so that
    /// the next `take_remainder` reports nothing.
    pub fn skip_to_token_end(&mut self) {
        self.character_index = self.chars.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::tokenize;

    #[test]
    fn remainder_is_rest_of_token_after_current_char() {
        let mut c = Cursor::new(tokenize(["-Ilib", "next"], false));
        c.begin_scan();
        assert_eq!(c.peek_current_char(), Some('I'));
        assert_eq!(c.take_remainder().as_deref(), Some("lib"));
        assert_eq!(c.current().unwrap().original_value(), "-Ilib");
    }

    #[test]
    fn remainder_is_absent_at_token_end() {
        let mut c = Cursor::new(tokenize(["-W"], false));
        c.begin_scan();
        assert_eq!(c.take_remainder(), None);
        assert_eq!(c.take_remainder(), None);
    }

    #[test]
    fn next_whole_token_uses_original_text() {
        let mut c = Cursor::new(tokenize(["-e", "puts 1"], true));
        c.begin_scan();
        assert_eq!(c.take_remainder(), None);
        assert_eq!(c.next_whole_token().as_deref(), Some("puts 1"));
        assert_eq!(c.next_whole_token(), None);
    }

    #[test]
    fn clustered_characters_scan_in_order() {
        let mut c = Cursor::new(tokenize(["-dvw"], false));
        c.begin_scan();
        let mut seen = Vec::new();
        while let Some(ch) = c.peek_current_char() {
            seen.push(ch);
            c.advance_char();
        }
        assert_eq!(seen, vec!['d', 'v', 'w']);
    }

    #[test]
    fn skip_to_end_forces_next_token() {
        let mut c = Cursor::new(tokenize(["--enable", "gems"], false));
        c.begin_scan();
        c.skip_to_token_end();
        assert_eq!(c.take_remainder(), None);
        assert_eq!(c.next_whole_token().as_deref(), Some("gems"));
    }
}
