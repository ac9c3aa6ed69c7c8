use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};

// Errors returned by credential signing/verification.
#[derive(Debug)]
pub enum CodecError {
    // Structure could not be parsed (segments, base64, JSON, claim shape).
    InvalidCredential(jsonwebtoken::errors::Error),
    // Structure is fine but the integrity tag does not match the payload.
    TamperedCredential,
    Sign(jsonwebtoken::errors::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredential(e) => write!(f, "invalid credential: {}", e),
            Self::TamperedCredential => write!(f, "credential integrity check failed"),
            Self::Sign(e) => write!(f, "failed to sign credential: {}", e),
        }
    }
}

impl StdError for CodecError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidCredential(e) | Self::Sign(e) => Some(e),
            Self::TamperedCredential => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for CodecError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::TamperedCredential,
            _ => Self::InvalidCredential(e),
        }
    }
}

/// Credential payload.
///
/// NOTE:
/// - Only the subject id is carried; role is always re-read from the user row.
/// - No `exp`/`iat`: credentials do not age out (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialClaims {
    pub id: i64,
}

/// HS256 signer/verifier keyed by the process-wide secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Credentials carry no registered claims at all.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            validation,
        }
    }

    /// Sign `{ id: subject_id }`. Same input, same key → same credential.
    pub fn sign(&self, subject_id: i64) -> Result<String, CodecError> {
        let claims = CredentialClaims { id: subject_id };
        jsonwebtoken::encode(&self.header, &claims, &self.encoding_key).map_err(CodecError::Sign)
    }

    /// Verify the integrity tag and return the subject id.
    pub fn verify(&self, credential: &str) -> Result<i64, CodecError> {
        let data = jsonwebtoken::decode::<CredentialClaims>(
            credential,
            &self.decoding_key,
            &self.validation,
        )?;

        Ok(data.claims.id)
    }
}
