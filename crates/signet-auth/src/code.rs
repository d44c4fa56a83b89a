//! One-time verification code generation.

/// Generate a uniformly distributed 6-digit numeric code, zero-padded
/// to fixed width.
///
/// Fixed width: the rendered code must not leak the magnitude of the
/// underlying draw. Uses the standard thread-local generator.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    let n = rand::Rng::random_range(&mut rng, 0..1_000_000u32);
    format!("{n:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn code_is_in_range() {
        for _ in 0..200 {
            let n: u32 = generate_code().parse().unwrap();
            assert!(n < 1_000_000);
        }
    }

    #[test]
    fn codes_vary() {
        let codes: std::collections::HashSet<String> = (0..100).map(|_| generate_code()).collect();
        assert!(codes.len() > 1, "100 draws should not all collide");
    }

    #[test]
    fn small_draws_are_padded() {
        // With 1000 draws the odds of never seeing a leading zero are
        // below 1e-45, so this is a deterministic check in practice.
        let padded = (0..1000)
            .map(|_| generate_code())
            .any(|c| c.starts_with('0'));
        assert!(padded, "codes below 100000 must be zero-padded");
    }
}
