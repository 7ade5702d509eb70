use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
pub const CODE_LENGTH: usize = 6;

pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Draw codes until `try_claim` accepts one. The claim itself must be atomic
/// (e.g. a vacant map entry) so two callers can never end up with the same code.
pub fn claim_join_code<F>(mut try_claim: F) -> String
where
    F: FnMut(&str) -> bool,
{
    loop {
        let code = generate_join_code();
        if try_claim(&code) {
            return code;
        }
    }
}

/// Codes are typed by humans: ignore surrounding whitespace and case
pub fn normalize_join_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}
