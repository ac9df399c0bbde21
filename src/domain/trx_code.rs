//! Customer-facing transaction codes, e.g. `TRX-7QK2ZD`.

use uuid::Uuid;

pub const TRX_CODE_PREFIX: &str = "TRX-";
pub const TRX_CODE_LEN: usize = 6;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random transaction code. Uniqueness is checked by the caller.
pub fn generate() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    let suffix: String = bytes
        .iter()
        .take(TRX_CODE_LEN)
        .map(|b| ALPHABET[usize::from(*b) % ALPHABET.len()] as char)
        .collect();

    format!("{}{}", TRX_CODE_PREFIX, suffix)
}

pub fn is_well_formed(code: &str) -> bool {
    code.strip_prefix(TRX_CODE_PREFIX).is_some_and(|suffix| {
        suffix.len() == TRX_CODE_LEN
            && suffix
                .chars()
                .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_codes_are_well_formed() {
        for _ in 0..100 {
            let code = generate();
            assert!(is_well_formed(&code), "unexpected code {}", code);
        }
    }

    #[test]
    fn generated_codes_vary() {
        // Uniqueness is enforced by the creation retry loop; this only checks
        // the generator is not constant.
        let codes: HashSet<String> = (0..20).map(|_| generate()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(is_well_formed("TRX-ABC123"));
        assert!(!is_well_formed("TRX-abc123"));
        assert!(!is_well_formed("TRX-ABC12"));
        assert!(!is_well_formed("ABC-ABC123"));
    }
}
