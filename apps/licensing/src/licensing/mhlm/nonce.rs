//! Correlation identifiers for one login attempt.
//!
//! These only pair up messages between the page and the login frame. They are
//! not secrets, so v4 UUID bits are plenty.

use uuid::Uuid;

/// 64 random bits. XOR-ing the halves of a v4 UUID cancels out its fixed
/// version and variant bits, since they sit at different positions.
fn random_u64() -> u64 {
    let (high, low) = Uuid::new_v4().as_u64_pair();
    high ^ low
}

/// A random fraction in `[0, 1)` rendered as decimal digits, without the
/// leading `0.`.
pub fn client_nonce() -> String {
    let fraction = (random_u64() >> 11) as f64 / (1u64 << 53) as f64;
    let rendered = fraction.to_string();
    match rendered.strip_prefix("0.") {
        Some(digits) => digits.to_string(),
        None => rendered,
    }
}

/// Two random base-36 strings glued together.
pub fn source_id() -> String {
    format!("{}{}", to_base36(random_u64()), to_base36(random_u64()))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(13);
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_client_nonce_is_digits_only() {
        for _ in 0..100 {
            let nonce = client_nonce();
            assert!(!nonce.is_empty());
            assert!(nonce.chars().all(|c| c.is_ascii_digit()), "unexpected nonce {nonce}");
        }
    }

    #[test]
    fn test_source_id_is_lowercase_base36() {
        let id = source_id();
        assert!(id.len() >= 2 && id.len() <= 26);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_identifiers_are_unique() {
        let nonces: HashSet<String> = (0..1000).map(|_| client_nonce()).collect();
        let source_ids: HashSet<String> = (0..1000).map(|_| source_id()).collect();
        assert_eq!(nonces.len(), 1000);
        assert_eq!(source_ids.len(), 1000);
    }
}
