pub mod content_digest_hasher;

pub use content_digest_hasher::{
    CHUNK_SIZE, ContentDigestVerifier, VerificationError, digests_match, verify_file,
};
