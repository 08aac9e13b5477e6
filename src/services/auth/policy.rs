/*
 * Responsibility
 * - 起動時に一度だけ構築する、access token 検証の信頼パラメータ (TrustPolicy)
 * - 公開鍵 PEM → DecodingKey、および鍵種別ごとに許可するアルゴリズム
 * - 構築後は不変。鍵の差し替えは新しい TrustPolicy を作る
 */
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

/// Public-key family the service trusts for access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Ed25519,
    Rsa,
}

impl KeyKind {
    /// Algorithms a token may declare for this key family.
    pub fn algorithms(self) -> Vec<Algorithm> {
        match self {
            KeyKind::Ed25519 => vec![Algorithm::EdDSA],
            KeyKind::Rsa => vec![
                Algorithm::RS256,
                Algorithm::RS384,
                Algorithm::RS512,
                Algorithm::PS256,
                Algorithm::PS384,
                Algorithm::PS512,
            ],
        }
    }
}

impl FromStr for KeyKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ed25519" | "eddsa" => Ok(KeyKind::Ed25519),
            "rsa" => Ok(KeyKind::Rsa),
            other => Err(PolicyError::UnknownKeyKind(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("unknown key type: {0}")]
    UnknownKeyKind(String),
    #[error("invalid {kind:?} public key pem: {source}")]
    InvalidKey {
        kind: KeyKind,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    #[error("failed to read public key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("empty '{0}' in trust policy")]
    Empty(&'static str),
}

/// Trust parameters for bearer-token verification.
///
/// - Holds public key material only.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TrustPolicy {
    decoding_key: DecodingKey,
    validation: Validation,
    kind: KeyKind,
    issuer: String,
    audience: String,
    clock_skew: Duration,
}

impl fmt::Debug for TrustPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TrustPolicy")
            .field("kind", &self.kind)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("clock_skew", &self.clock_skew)
            .finish()
    }
}

impl TrustPolicy {
    pub fn from_pem(
        kind: KeyKind,
        public_key_pem: &str,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        clock_skew: Duration,
    ) -> Result<Self, PolicyError> {
        let issuer = issuer.into();
        let audience = audience.into();
        if issuer.trim().is_empty() {
            return Err(PolicyError::Empty("issuer"));
        }
        if audience.trim().is_empty() {
            return Err(PolicyError::Empty("audience"));
        }

        let decoding_key = match kind {
            KeyKind::Ed25519 => DecodingKey::from_ed_pem(public_key_pem.as_bytes()),
            KeyKind::Rsa => DecodingKey::from_rsa_pem(public_key_pem.as_bytes()),
        }
        .map_err(|source| PolicyError::InvalidKey { kind, source })?;

        Ok(Self {
            decoding_key,
            validation: signature_only_validation(kind),
            kind,
            issuer,
            audience,
            // A negative skew would shrink the validity window; treat it as zero.
            clock_skew: clock_skew.max(Duration::zero()),
        })
    }

    /// Read a PEM file once (process start) and build the policy from it.
    pub fn from_pem_file(
        kind: KeyKind,
        path: &std::path::Path,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        clock_skew: Duration,
    ) -> Result<Self, PolicyError> {
        let pem = std::fs::read_to_string(path).map_err(|source| PolicyError::KeyFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_pem(kind, &pem, issuer, audience, clock_skew)
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub(crate) fn validation(&self) -> &Validation {
        &self.validation
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn clock_skew(&self) -> Duration {
        self.clock_skew
    }
}

// jsonwebtoken only checks structure, the declared algorithm and the signature here.
// iss/aud/exp/nbf are checked by the verifier against an explicit `now`.
fn signature_only_validation(kind: KeyKind) -> Validation {
    let mut validation = Validation::new(kind.algorithms()[0]);
    validation.algorithms = kind.algorithms();
    validation.required_spec_claims = HashSet::new();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation
}
