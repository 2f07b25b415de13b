//! Device token generation.
//!
//! Tokens are opaque bearer identifiers for paired devices. They are random but
//! not secret-grade; global uniqueness is enforced by the device registry's
//! unique constraint, not by the generator. Callers must regenerate and retry
//! when an insert reports a collision.

use lazy_static::lazy_static;
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;

/// Length of a device token.
pub const DEVICE_TOKEN_LEN: usize = 24;

lazy_static! {
    static ref DEVICE_TOKEN_RE: Regex = Regex::new(r"^[A-Za-z0-9]{24}$").unwrap();
}

/// Source of fresh device tokens.
///
/// Behind a trait so the registry's collision-retry path can be driven
/// deterministically in tests.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Default generator drawing uniformly from the alphanumeric alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceTokenGenerator;

impl TokenGenerator for DeviceTokenGenerator {
    fn generate(&self) -> String {
        let rng = rand::thread_rng();
        rng.sample_iter(&Alphanumeric)
            .take(DEVICE_TOKEN_LEN)
            .map(char::from)
            .collect()
    }
}

/// Returns true if `token` has the shape of a device token.
///
/// Used to short-circuit lookups for path parameters that cannot possibly
/// match a device row.
pub fn is_well_formed_token(token: &str) -> bool {
    DEVICE_TOKEN_RE.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length() {
        let token = DeviceTokenGenerator.generate();
        assert_eq!(token.len(), DEVICE_TOKEN_LEN);
    }

    #[test]
    fn test_token_alphabet() {
        for _ in 0..100 {
            let token = DeviceTokenGenerator.generate();
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric()), "{token}");
        }
    }

    #[test]
    fn test_tokens_are_distinct() {
        let a = DeviceTokenGenerator.generate();
        let b = DeviceTokenGenerator.generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_tokens_are_well_formed() {
        let token = DeviceTokenGenerator.generate();
        assert!(is_well_formed_token(&token));
    }

    #[test]
    fn test_well_formed_rejects_bad_shapes() {
        assert!(!is_well_formed_token(""));
        assert!(!is_well_formed_token("short"));
        assert!(!is_well_formed_token(&"a".repeat(23)));
        assert!(!is_well_formed_token(&"a".repeat(25)));
        assert!(!is_well_formed_token("abcdefghijklmnopqrstuv-!"));
    }

    #[test]
    fn test_trait_object_generator() {
        let gen: Box<dyn TokenGenerator> = Box::new(DeviceTokenGenerator);
        assert_eq!(gen.generate().len(), DEVICE_TOKEN_LEN);
    }
}
