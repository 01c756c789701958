//! Reward codes handed out on a win.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

/// Length of a reward code.
pub const REWARD_CODE_LENGTH: usize = 8;

/// Characters a reward code is drawn from.
pub const REWARD_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a reward code from the operating system's secure random source.
#[must_use]
pub fn generate_reward_code() -> String {
    generate_reward_code_with(&mut OsRng)
}

/// Generate a reward code from a caller-supplied secure generator.
#[must_use]
pub fn generate_reward_code_with<R: Rng + CryptoRng>(rng: &mut R) -> String {
    (0..REWARD_CODE_LENGTH)
        .map(|_| char::from(REWARD_CODE_ALPHABET[rng.gen_range(0..REWARD_CODE_ALPHABET.len())]))
        .collect()
}

/// Check that `code` has the shape of a reward code.
#[must_use]
pub fn is_valid_reward_code(code: &str) -> bool {
    code.len() == REWARD_CODE_LENGTH && code.bytes().all(|b| REWARD_CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_code_shape() {
        for _ in 0..200 {
            let code = generate_reward_code();
            assert!(is_valid_reward_code(&code), "bad code {code}");
        }
    }

    #[test]
    fn test_seeded_codes_repeat() {
        let first = generate_reward_code_with(&mut StdRng::seed_from_u64(42));
        let second = generate_reward_code_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert!(is_valid_reward_code(&first));

        let mut rng = StdRng::seed_from_u64(42);
        let codes: Vec<String> = (0..4).map(|_| generate_reward_code_with(&mut rng)).collect();
        assert_eq!(codes[0], first);
        assert!(codes.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn test_rejects_malformed_codes() {
        assert!(!is_valid_reward_code("ABC"));
        assert!(!is_valid_reward_code("abcdefgh"));
        assert!(!is_valid_reward_code("ABCD-FGH"));
        assert!(is_valid_reward_code("AB12CD34"));
    }
}
