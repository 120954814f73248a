//! Request nonces and timestamps

use crate::types::constants::NONCE_LENGTH;
use rand::{distributions::Alphanumeric, Rng};

/// Generate a random alphanumeric nonce
///
/// Drawn from the thread-local CSPRNG, so concurrent calls never share
/// generator state.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Current Unix time in whole seconds, as a decimal string
pub fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}
