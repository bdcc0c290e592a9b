//! Character classes of the grammar notation. Pure predicates, no I/O.

/// Punctuation allowed as a terminal symbol.
pub const SYMBOLS: &str = "'\"(){}[],;|";

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn is_symbol(ch: char) -> bool {
    SYMBOLS.contains(ch)
}

pub fn is_underscore(ch: char) -> bool {
    ch == '_'
}

/// Any character that may appear between terminal quotes.
pub fn is_character(ch: char) -> bool {
    is_digit(ch) || is_letter(ch) || is_symbol(ch) || is_underscore(ch)
}

pub fn is_terminal_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

pub fn is_space(ch: char) -> bool {
    ch == ' '
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_set() {
        for ch in "09azAZ_'\"(){}[],;|".chars() {
            assert!(is_character(ch), "{ch:?} should be a grammar character");
        }
        for ch in " \t\n=+-.é".chars() {
            assert!(!is_character(ch), "{ch:?} should not be a grammar character");
        }
    }

    #[test]
    fn test_quotes_are_also_symbols() {
        assert!(is_terminal_quote('\'') && is_symbol('\''));
        assert!(is_terminal_quote('"') && is_symbol('"'));
        assert!(!is_terminal_quote('`'));
    }
}
