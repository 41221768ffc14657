//! One-time code generation and hashing.

use jiff::SignedDuration;
use rand::{Rng, rngs::OsRng};
use sha2::{Digest, Sha256};

/// How long a code stays usable after it is issued.
pub const CODE_TTL_MINUTES: i64 = 10;

pub const CODE_TTL: SignedDuration = SignedDuration::from_mins(CODE_TTL_MINUTES);

/// Six random decimal digits, zero padded.
#[must_use]
pub fn generate_code() -> String {
    format!("{:06}", OsRng.gen_range(0..1_000_000_u32))
}

/// Hex SHA-256 of the code as submitted, ignoring surrounding whitespace.
#[must_use]
pub fn hash_code(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.trim().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();

            assert_eq!(code.len(), 6, "code {code} has wrong length");
            assert!(code.chars().all(|c| c.is_ascii_digit()), "code {code} not numeric");
        }
    }

    #[test]
    fn hash_is_stable_hex_sha256() {
        assert_eq!(
            hash_code("123456"),
            "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92"
        );
        assert_eq!(hash_code(" 123456 "), hash_code("123456"));
        assert_ne!(hash_code("123456"), hash_code("123457"));
    }
}
