// ============================================================
// Layer 4 — Domain Preprocessor
// ============================================================
// Cleans raw domain strings read from files or the command
// line before they reach the vectorizer.
//
// Cleaning steps (applied in order):
//   1. Trim surrounding whitespace (including \r from CRLF files)
//   2. Strip surrounding double quotes left by CSV exporters
//   3. Drop a single trailing root dot ("example.com." → "example.com")
//
// Case is preserved: the network sees raw character codes.

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean one domain string. Returns an owned String.
    pub fn clean(&self, domain: &str) -> String {
        let trimmed = domain.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(trimmed)
            .trim();
        unquoted.strip_suffix('.').unwrap_or(unquoted).to_string()
    }

    /// True for lines loaders should skip: blank or `#` comments.
    pub fn is_ignorable(&self, line: &str) -> bool {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_edges() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  nvidia.com\r"), "nvidia.com");
    }

    #[test]
    fn test_strips_root_dot() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("example.com."), "example.com");
    }

    #[test]
    fn test_strips_quotes() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("\"xj3f9sd.biz\""), "xj3f9sd.biz");
    }

    #[test]
    fn test_preserves_case() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("NVIDIA.com"), "NVIDIA.com");
    }

    #[test]
    fn test_ignorable_lines() {
        let p = Preprocessor::new();
        assert!(p.is_ignorable("   "));
        assert!(p.is_ignorable("# comment"));
        assert!(!p.is_ignorable("nvidia.com"));
    }
}
