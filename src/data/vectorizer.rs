// ============================================================
// Layer 4 — Character Vectorizer
// ============================================================
// Turns a domain string into the integer sequence the embedding
// layer consumes:
//
//   "nvidia.com" → [110, 118, 105, 100, 105, 97, 46, 99, 111, 109]
//
// Truncation keeps the first `width` characters (char, not byte,
// boundaries). Code 0 doubles as padding and as the code for any
// character outside the vocabulary.

/// Code used for padding and for out-of-vocabulary characters.
pub const PAD_CODE: u32 = 0;

/// Default vocabulary: the 128 ASCII code points.
pub const ASCII_VOCAB: usize = 128;

#[derive(Debug, Clone, Copy)]
pub struct CharVectorizer {
    vocab_size: usize,
}

impl CharVectorizer {
    pub fn new(vocab_size: usize) -> Self {
        Self { vocab_size }
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Keep at most the first `width` characters of `domain`.
    pub fn truncate<'a>(&self, domain: &'a str, width: usize) -> &'a str {
        match domain.char_indices().nth(width) {
            Some((byte_idx, _)) => &domain[..byte_idx],
            None => domain,
        }
    }

    /// Map every character to its code point, or `PAD_CODE` when the
    /// code point does not fit the vocabulary.
    pub fn encode(&self, domain: &str) -> Vec<u32> {
        domain
            .chars()
            .map(|c| {
                let code = c as u32;
                if (code as usize) < self.vocab_size { code } else { PAD_CODE }
            })
            .collect()
    }

    /// Truncate then encode.
    pub fn vectorize(&self, domain: &str, width: usize) -> Vec<u32> {
        self.encode(self.truncate(domain, width))
    }
}

impl Default for CharVectorizer {
    fn default() -> Self {
        Self::new(ASCII_VOCAB)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_domain_is_truncated_to_width() {
        let v = CharVectorizer::default();
        assert_eq!(v.truncate("abcdefghij.com", 5), "abcde");
        assert_eq!(v.vectorize("abcdefghij.com", 5).len(), 5);
    }

    #[test]
    fn test_short_domain_is_unaffected() {
        let v = CharVectorizer::default();
        assert_eq!(v.truncate("nvidia.com", 10), "nvidia.com");
        assert_eq!(v.truncate("nvidia.com", 100), "nvidia.com");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let v = CharVectorizer::default();
        assert_eq!(v.truncate("bücher.de", 2), "bü");
    }

    #[test]
    fn test_encode_uses_ascii_codes() {
        let v = CharVectorizer::default();
        assert_eq!(v.encode("a.Z"), vec![97, 46, 90]);
    }

    #[test]
    fn test_out_of_vocab_maps_to_pad_code() {
        let v = CharVectorizer::default();
        assert_eq!(v.encode("bü"), vec![98, PAD_CODE]);

        let small = CharVectorizer::new(100);
        assert_eq!(small.encode("az"), vec![97, PAD_CODE]);
    }

    #[test]
    fn test_zero_width_gives_empty_sequence() {
        let v = CharVectorizer::default();
        assert!(v.vectorize("nvidia.com", 0).is_empty());
    }
}
