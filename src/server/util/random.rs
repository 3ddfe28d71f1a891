use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                         abcdefghijklmnopqrstuvwxyz\
                         0123456789";

/// Generates a cryptographically secure random alphanumeric string.
///
/// Used for sign-off and reviewer access tokens and for generated temporary
/// passwords. Uses the system's random number generator.
pub fn alphanumeric_token(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(alphanumeric_token(32).len(), 32);
        assert_eq!(alphanumeric_token(12).len(), 12);
    }

    #[test]
    fn generates_distinct_tokens() {
        assert_ne!(alphanumeric_token(32), alphanumeric_token(32));
    }

    #[test]
    fn only_contains_alphanumeric_characters() {
        assert!(alphanumeric_token(64)
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
    }
}
