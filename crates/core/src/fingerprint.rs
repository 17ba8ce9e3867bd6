//! Content fingerprinting for deduplication.
//!
//! A fingerprint identifies one publication as returned by the search
//! provider. Two results with the same descriptive fields always produce the
//! same digest, which is what the store's uniqueness constraint keys on.

use sha2::{Digest, Sha256};

/// Compute the dedup fingerprint for a result.
///
/// Fields are trimmed of surrounding whitespace and joined with `|` in a
/// fixed order before hashing, so the digest is stable across cycles and
/// across restarts. Missing fields are passed as empty strings.
pub fn fingerprint(title: &str, authors: &str, year: &str, url: &str) -> String {
    let base = format!(
        "{}|{}|{}|{}",
        title.trim(),
        authors.trim(),
        year.trim(),
        url.trim()
    );
    format!("{:x}", Sha256::digest(base.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = fingerprint("Attention Is All You Need", "Vaswani et al.", "2017", "https://x");
        let b = fingerprint("Attention Is All You Need", "Vaswani et al.", "2017", "https://x");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        let fp = fingerprint("t", "a", "y", "u");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_trims_outer_whitespace() {
        let a = fingerprint("  Title  ", "Authors", " 2020", "https://x ");
        let b = fingerprint("Title", "Authors", "2020", "https://x");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_differs_per_field() {
        let base = fingerprint("Title", "Authors", "2020", "https://x");
        assert_ne!(base, fingerprint("Title2", "Authors", "2020", "https://x"));
        assert_ne!(base, fingerprint("Title", "Authors2", "2020", "https://x"));
        assert_ne!(base, fingerprint("Title", "Authors", "2021", "https://x"));
        assert_ne!(base, fingerprint("Title", "Authors", "2020", "https://y"));
    }

    #[test]
    fn test_fingerprint_inner_whitespace_matters() {
        assert_ne!(
            fingerprint("Graph Networks", "A", "2020", "u"),
            fingerprint("Graph  Networks", "A", "2020", "u")
        );
    }

    #[test]
    fn test_fingerprint_empty_fields_allowed() {
        let fp = fingerprint("", "", "", "");
        assert_eq!(fp.len(), 64);
    }

    #[test]
    fn test_fingerprint_separator_prevents_field_bleed() {
        // "ab"+"c" must not collide with "a"+"bc" across the separator.
        assert_ne!(
            fingerprint("ab", "c", "", ""),
            fingerprint("a", "bc", "", "")
        );
    }
}
