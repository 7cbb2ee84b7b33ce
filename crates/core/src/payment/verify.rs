//! Payment signature verification gate.
//!
//! The gateway signs `order_id + "|" + payment_id` with HMAC-SHA256
//! under the shared key secret and sends the hex digest back with the
//! checkout result. Every payment-success state transition is gated on
//! recomputing and matching that digest. Comparison is constant-time
//! via `Mac::verify_slice`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the expected hex signature for an order/payment pair.
#[must_use]
pub fn expected_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies an inbound payment signature.
///
/// Returns true only on an exact digest match. Malformed input (odd
/// length, non-hex characters) returns false. Performs no I/O.
#[must_use]
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(supplied) = hex::decode(signature) else {
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());

    mac.verify_slice(&supplied).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_key_secret";

    #[test]
    fn test_known_digest_accepted() {
        let sig = expected_signature(SECRET, "order_abc", "pay_xyz");
        assert!(verify_signature(SECRET, "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let sig = expected_signature(SECRET, "o1", "p1");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let sig = expected_signature(SECRET, "order_abc", "pay_xyz");
        assert!(!verify_signature("other_secret", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_swapped_ids_rejected() {
        let sig = expected_signature(SECRET, "order_abc", "pay_xyz");
        assert!(!verify_signature(SECRET, "pay_xyz", "order_abc", &sig));
    }

    #[test]
    fn test_malformed_signature_rejected() {
        assert!(!verify_signature(SECRET, "o1", "p1", "not-hex"));
        assert!(!verify_signature(SECRET, "o1", "p1", "abc")); // odd length
        assert!(!verify_signature(SECRET, "o1", "p1", ""));
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let sig = expected_signature(SECRET, "o1", "p1");
        assert!(!verify_signature(SECRET, "o1", "p1", &sig[..62]));
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The gate accepts exactly the digest it computes.
        #[test]
        fn prop_roundtrip(
            secret in "[a-zA-Z0-9]{8,32}",
            order_id in "order_[a-zA-Z0-9]{1,14}",
            payment_id in "pay_[a-zA-Z0-9]{1,14}",
        ) {
            let sig = expected_signature(&secret, &order_id, &payment_id);
            prop_assert!(verify_signature(&secret, &order_id, &payment_id, &sig));
        }

        /// Any single-character mutation of the signature is rejected.
        #[test]
        fn prop_single_char_mutation_rejected(
            order_id in "order_[a-zA-Z0-9]{1,14}",
            payment_id in "pay_[a-zA-Z0-9]{1,14}",
            pos in 0usize..64,
        ) {
            let secret = "prop_secret";
            let sig = expected_signature(secret, &order_id, &payment_id);

            let mut mutated: Vec<char> = sig.chars().collect();
            let original = mutated[pos];
            mutated[pos] = if original == '0' { '1' } else { '0' };
            let mutated: String = mutated.into_iter().collect();

            prop_assume!(mutated != sig);
            prop_assert!(!verify_signature(secret, &order_id, &payment_id, &mutated));
        }
    }
}
