use sha2::{Digest, Sha512};

/// Derive the stored credential from a username and raw password
///
/// SHA-512 over the username (used as salt) followed by the raw password,
/// lowercase hex encoded. Deterministic, so a freshly computed value always
/// equals the one persisted by `add_user`.
pub fn encode_password(username: &str, password: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(username.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two encoded passwords in constant time
pub fn verify_encoded_password(provided: &str, expected: &str) -> bool {
    provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
