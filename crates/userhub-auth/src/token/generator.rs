//! Cryptographically strong opaque token generation.
//!
//! Tokens carry no embedded structure; they are pure lookup keys. Raw OS
//! entropy is condensed through SHA-256 and encoded as URL-safe base64
//! without padding, so the output length is a constant determined by the
//! digest width rather than by the requested entropy.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use userhub_core::error::AppError;
use userhub_core::result::AppResult;

/// Minimum number of random bytes a caller may request.
pub const MIN_ENTROPY_BYTES: usize = 32;

/// Length of every generated token: a 256-bit digest in unpadded base64.
pub const TOKEN_LENGTH: usize = 43;

/// Produces opaque session tokens from OS entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenGenerator;

impl TokenGenerator {
    /// Create a new token generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate an opaque token from `entropy_bytes` random bytes.
    ///
    /// Fails with `WeakTokenRequest` when fewer than
    /// [`MIN_ENTROPY_BYTES`] are requested and with `EntropyUnavailable`
    /// when the OS entropy source fails. Entropy failures are fatal to
    /// the request and never retried here.
    pub fn generate(&self, entropy_bytes: usize) -> AppResult<String> {
        if entropy_bytes < MIN_ENTROPY_BYTES {
            return Err(AppError::weak_token_request(format!(
                "requested {entropy_bytes} random bytes, minimum is {MIN_ENTROPY_BYTES}"
            )));
        }

        let mut raw = vec![0u8; entropy_bytes];
        OsRng.try_fill_bytes(&mut raw).map_err(|e| {
            AppError::entropy_unavailable(format!("OS entropy source failed: {e}"))
        })?;

        let digest = Sha256::digest(&raw);
        Ok(URL_SAFE_NO_PAD.encode(digest))
    }
}
