use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
}

/// Tokenize text by lowercasing, splitting on non-alphanumeric boundaries, and
/// dropping tokens shorter than `min_len` characters.
///
/// Total over arbitrary input: empty or punctuation-only text yields an empty
/// sequence, never an error.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|token| token.chars().count() >= min_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_enforces_minimum_length() {
        let tokens = tokenize("Hello, world! 123 go", 3);
        assert_eq!(tokens, vec!["hello", "world", "123"]);
    }

    #[test]
    fn empty_and_symbol_only_input_yield_no_tokens() {
        assert!(tokenize("", 2).is_empty());
        assert!(tokenize("!!! --- ...", 2).is_empty());
    }

    #[test]
    fn unicode_letters_are_token_constituents() {
        let tokens = tokenize("Grüße café 東京", 2);
        assert_eq!(tokens, vec!["grüße", "café", "東京"]);
    }

    #[test]
    fn same_input_always_yields_same_sequence() {
        let a = tokenize("Repeatable: input? text.", 2);
        let b = tokenize("Repeatable: input? text.", 2);
        assert_eq!(a, b);
    }
}
