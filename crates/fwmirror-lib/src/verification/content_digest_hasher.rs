use digest::Digest;
use md5::Md5;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncReadExt;

/// Files are hashed in chunks of this size so large images never need to be
/// held in memory.
pub const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Verification failed: expected {expected}, got {actual}")]
    VerificationFailed { expected: String, actual: String },

    #[error("Failed to hash {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

/// Compares hex digests without regard to letter case.
pub fn digests_match(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected)
}

/// Incrementally hashes content and checks it against a published MD5.
pub struct ContentDigestVerifier {
    hasher: Md5,
    expected_digest: String,
}

impl ContentDigestVerifier {
    #[inline]
    pub fn new(expected_digest: impl Into<String>) -> Self {
        Self {
            hasher: Md5::new(),
            expected_digest: expected_digest.into(),
        }
    }

    #[inline]
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        Digest::update(&mut self.hasher, data.as_ref());
    }

    /// Lowercase hex of everything fed so far.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.hasher.finalize())
    }

    pub fn verify(self) -> Result<(), VerificationError> {
        let expected = self.expected_digest.clone();
        let actual = self.finalize_hex();

        if digests_match(&actual, &expected) {
            Ok(())
        } else {
            Err(VerificationError::VerificationFailed { expected, actual })
        }
    }
}

/// Streams `path` through MD5 in [`CHUNK_SIZE`] reads and compares the result
/// with `expected_digest`.
pub async fn verify_file(path: &Path, expected_digest: &str) -> Result<(), VerificationError> {
    let mut verifier = ContentDigestVerifier::new(expected_digest);
    stream_into(path, &mut verifier)
        .await
        .map_err(|e| VerificationError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    verifier.verify()
}

async fn stream_into(path: &Path, verifier: &mut ContentDigestVerifier) -> std::io::Result<()> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        verifier.update(&buffer[..bytes_read]);
    }
    Ok(())
}
