//! Text cleanup ahead of vectorization: lowercase, punctuation to spaces,
//! whitespace collapsed to single spaces.

/// Normalizes a fragment for the vectorizer. Alphanumeric characters are
/// lower-cased, everything else becomes a separator, and runs of
/// separators collapse to one space.
pub fn preprocess(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_space = true;
        }
    }
    out
}

/// Splits preprocessed text into terms, dropping tokens shorter than
/// `min_chars` characters.
pub fn tokenize(text: &str, min_chars: usize) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(move |token| token.chars().count() >= min_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_becomes_separator() {
        assert_eq!(preprocess("CRUZ, negra. (brazo)"), "cruz negra brazo");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(preprocess("  rosa   roja  "), "rosa roja");
    }

    #[test]
    fn short_tokens_dropped() {
        let tokens: Vec<&str> = tokenize("rosa y cruz", 2).collect();
        assert_eq!(tokens, vec!["rosa", "cruz"]);
    }

    #[test]
    fn accents_survive_preprocessing() {
        assert_eq!(preprocess("Corazón!"), "corazón");
    }
}
