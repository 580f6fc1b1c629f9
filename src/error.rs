// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Coarse classification used by callers to pick a reaction:
/// fix the input, re-prompt / reject the data, or alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-input bug, reported before any cryptographic work.
    Validation,
    /// Opaque cryptographic failure (wrong key, wrong password, tampered data).
    Cryptographic,
    /// The primitive provider misbehaved. Not expected in normal operation.
    Provider,
}

#[derive(Error, Debug)]
pub enum CryptoError {
    // ── validation ────────────────────────────────────────────
    #[error("Password can't be empty")]
    PasswordEmpty,

    #[error("Incomplete file key: IV and tag are required")]
    IncompleteFileKey,

    #[error("File key has no IV")]
    MissingIv,

    #[error("File key has no authentication tag")]
    MissingTag,

    #[error("Unknown {kind} version: {value}")]
    UnknownVersion { kind: &'static str, value: String },

    #[error("Invalid base64 in field `{field}`")]
    InvalidEncoding { field: &'static str },

    #[error("Invalid length for `{field}`: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Cipher session exceeded the maximum GCM message length")]
    SessionTooLong,

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ── cryptographic ─────────────────────────────────────────
    #[error("Error encrypting file key")]
    FileKeyEncryptionFailed,

    #[error("Error decrypting file key")]
    FileKeyDecryptionFailed,

    #[error("Authentication failed: data was modified or key/IV/tag are wrong")]
    AuthenticationFailed,

    // ── provider / integrity ──────────────────────────────────
    #[error("Error creating key pair: {0}")]
    KeyPairGenerationFailed(String),

    #[error("Error checking key pair: generated private key can't be decrypted")]
    KeyPairIntegrityFailure,

    #[error("Secure random number generator failed")]
    RandomGenerationFailed,

    #[error("Error creating cipher: {0}")]
    CipherInitFailed(String),

    #[error("Error finalizing cipher: {0}")]
    FinalizationFailed(String),
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::PasswordEmpty
            | CryptoError::IncompleteFileKey
            | CryptoError::MissingIv
            | CryptoError::MissingTag
            | CryptoError::UnknownVersion { .. }
            | CryptoError::InvalidEncoding { .. }
            | CryptoError::InvalidKeyLength { .. }
            | CryptoError::SessionTooLong
            | CryptoError::Json(_) => ErrorKind::Validation,

            CryptoError::FileKeyEncryptionFailed
            | CryptoError::FileKeyDecryptionFailed
            | CryptoError::AuthenticationFailed => ErrorKind::Cryptographic,

            CryptoError::KeyPairGenerationFailed(_)
            | CryptoError::KeyPairIntegrityFailure
            | CryptoError::RandomGenerationFailed
            | CryptoError::CipherInitFailed(_)
            | CryptoError::FinalizationFailed(_) => ErrorKind::Provider,
        }
    }

    /// True when correcting the input (or re-entering the password) may succeed.
    pub fn is_user_correctable(&self) -> bool {
        self.kind() == ErrorKind::Validation || matches!(self, CryptoError::FileKeyDecryptionFailed)
    }

    pub(crate) fn unknown_version(kind: &'static str, value: impl Into<String>) -> Self {
        CryptoError::UnknownVersion {
            kind,
            value: value.into(),
        }
    }
}
