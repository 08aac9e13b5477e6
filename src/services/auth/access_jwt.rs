/*
 * Responsibility
 * - Bearer access token (JWT) の検証 → VerifiedIdentity / VerificationFailure
 * - 署名は jsonwebtoken、iss/aud/exp/nbf/iat は明示的な `now` に対してここで判定する
 * - 結果ごとにライフサイクルイベントをちょうど 1 回 emit する (AuthService)
 */
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use serde_json::{Map, Value};
use thiserror::Error;

use super::events::{AuthEvent, Notifier};
use super::policy::TrustPolicy;

/// Classified reason a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token issuer does not match")]
    IssuerMismatch,
    #[error("token audience does not match")]
    AudienceMismatch,
    #[error("token is expired or not yet valid")]
    Expired,
    #[error("token is malformed")]
    Malformed,
}

impl VerificationFailure {
    /// Stable machine-readable code (logs, error bodies, WWW-Authenticate).
    pub fn code(&self) -> &'static str {
        match self {
            Self::SignatureInvalid => "signature_invalid",
            Self::IssuerMismatch => "issuer_mismatch",
            Self::AudienceMismatch => "audience_mismatch",
            Self::Expired => "expired",
            Self::Malformed => "malformed",
        }
    }
}

/// Identity extracted from a token that passed every check.
///
/// Carries claims only; no key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub claims: BTreeMap<String, String>,
}

/// Verify `token` against `policy` at instant `now`.
///
/// Checks run in this order and stop at the first failure:
/// structure, declared algorithm + signature, `iss`, `aud`, lifetime window
/// `[max(nbf, iat) - skew, exp + skew]`.
pub fn verify_token(
    token: &str,
    policy: &TrustPolicy,
    now: DateTime<Utc>,
) -> Result<VerifiedIdentity, VerificationFailure> {
    let data = jsonwebtoken::decode::<Map<String, Value>>(
        token,
        policy.decoding_key(),
        policy.validation(),
    )
    .map_err(|e| classify(&e))?;
    let claims = data.claims;

    let subject = match claims.get("sub") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => return Err(VerificationFailure::Malformed),
    };
    let exp = claims
        .get("exp")
        .and_then(numeric_date)
        .ok_or(VerificationFailure::Malformed)?;
    let iat = optional_numeric_date(claims.get("iat"))?;
    let nbf = optional_numeric_date(claims.get("nbf"))?;

    let expires_at = DateTime::from_timestamp(exp, 0).ok_or(VerificationFailure::Malformed)?;
    let issued_at = match iat {
        Some(secs) => {
            Some(DateTime::from_timestamp(secs, 0).ok_or(VerificationFailure::Malformed)?)
        }
        None => None,
    };

    if claims.get("iss").and_then(Value::as_str) != Some(policy.issuer()) {
        return Err(VerificationFailure::IssuerMismatch);
    }

    if !audience_matches(claims.get("aud"), policy.audience()) {
        return Err(VerificationFailure::AudienceMismatch);
    }

    let skew = policy.clock_skew().num_seconds();
    let now_secs = now.timestamp();
    if now_secs > exp.saturating_add(skew) {
        return Err(VerificationFailure::Expired);
    }
    // Both nbf and iat bound the window from below; the later one decides.
    if let Some(not_before) = nbf.max(iat)
        && now_secs < not_before.saturating_sub(skew)
    {
        return Err(VerificationFailure::Expired);
    }

    let claims = claims
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, v)
        })
        .collect();

    Ok(VerifiedIdentity {
        subject,
        issued_at,
        expires_at,
        claims,
    })
}

fn classify(err: &jsonwebtoken::errors::Error) -> VerificationFailure {
    match err.kind() {
        // Declared algorithm outside the key's family counts as a bad signature.
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
            VerificationFailure::SignatureInvalid
        }
        _ => VerificationFailure::Malformed,
    }
}

// NumericDate: seconds since epoch, fractional part ignored.
fn numeric_date(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64)),
        _ => None,
    }
}

fn optional_numeric_date(value: Option<&Value>) -> Result<Option<i64>, VerificationFailure> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => numeric_date(v)
            .map(Some)
            .ok_or(VerificationFailure::Malformed),
    }
}

// `aud` may be a single string or an array of strings.
fn audience_matches(aud: Option<&Value>, expected: &str) -> bool {
    match aud {
        Some(Value::String(s)) => s == expected,
        Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some(expected)),
        _ => false,
    }
}

/// Access-token verifier bound to one immutable `TrustPolicy`.
#[derive(Clone, Debug)]
pub struct AuthService {
    policy: Arc<TrustPolicy>,
    notifier: Notifier,
}

impl AuthService {
    pub fn new(policy: TrustPolicy, notifier: Notifier) -> Self {
        Self {
            policy: Arc::new(policy),
            notifier,
        }
    }

    /// Verify and emit exactly one lifecycle event for the outcome.
    pub fn verify(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedIdentity, VerificationFailure> {
        let result = verify_token(token, &self.policy, now);

        let event = match &result {
            Ok(identity) => AuthEvent::Validated {
                subject: identity.subject.clone(),
            },
            Err(failure) => AuthEvent::Failed(*failure),
        };
        self.notifier.notify(&event);

        result
    }

    /// For the HTTP boundary: a 401 is about to be sent.
    pub fn challenge(&self, reason: impl Into<String>) {
        self.notifier.notify(&AuthEvent::Challenged {
            reason: reason.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Duration;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::json;

    use super::*;
    use crate::services::auth::events::{AuthEventSink, SinkError};
    use crate::services::auth::policy::KeyKind;

    const ED_PRIVATE: &str = include_str!("../../../tests/fixtures/ed25519_private.pem");
    const ED_PUBLIC: &str = include_str!("../../../tests/fixtures/ed25519_public.pem");
    const OTHER_ED_PRIVATE: &str = include_str!("../../../tests/fixtures/ed25519_other_private.pem");
    const RSA_PRIVATE: &str = include_str!("../../../tests/fixtures/rsa_private.pem");
    const RSA_PUBLIC: &str = include_str!("../../../tests/fixtures/rsa_public.pem");

    const ISSUER: &str = "https://auth.example.test";
    const AUDIENCE: &str = "profile-api";
    const NOW: i64 = 1_700_000_000;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(NOW, 0).unwrap()
    }

    fn ed_policy() -> TrustPolicy {
        TrustPolicy::from_pem(KeyKind::Ed25519, ED_PUBLIC, ISSUER, AUDIENCE, Duration::seconds(60))
            .unwrap()
    }

    fn claims() -> Value {
        json!({
            "iss": ISSUER,
            "aud": AUDIENCE,
            "sub": "user-42",
            "iat": NOW - 10,
            "exp": NOW + 600,
            "scope": "profiles:read",
        })
    }

    fn sign_with(private_pem: &str, alg: Algorithm, claims: &Value) -> String {
        let key = match alg {
            Algorithm::EdDSA => EncodingKey::from_ed_pem(private_pem.as_bytes()).unwrap(),
            _ => EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap(),
        };
        jsonwebtoken::encode(&Header::new(alg), claims, &key).unwrap()
    }

    fn sign(claims: &Value) -> String {
        sign_with(ED_PRIVATE, Algorithm::EdDSA, claims)
    }

    fn with(field: &str, value: Value) -> Value {
        let mut c = claims();
        c[field] = value;
        c
    }

    fn without(field: &str) -> Value {
        let mut c = claims();
        c.as_object_mut().unwrap().remove(field);
        c
    }

    #[test]
    fn valid_token_yields_identity_with_subject_and_claims() {
        let identity = verify_token(&sign(&claims()), &ed_policy(), now()).unwrap();

        assert_eq!(identity.subject, "user-42");
        assert_eq!(identity.expires_at.timestamp(), NOW + 600);
        assert_eq!(identity.issued_at.map(|t| t.timestamp()), Some(NOW - 10));
        assert_eq!(identity.claims.get("scope").map(String::as_str), Some("profiles:read"));
        assert_eq!(identity.claims.get("exp").map(String::as_str), Some("1700000600"));
    }

    #[test]
    fn token_signed_by_another_key_is_signature_invalid() {
        let token = sign_with(OTHER_ED_PRIVATE, Algorithm::EdDSA, &claims());
        assert_eq!(
            verify_token(&token, &ed_policy(), now()),
            Err(VerificationFailure::SignatureInvalid)
        );
    }

    #[test]
    fn tampered_payload_is_signature_invalid() {
        let token = sign(&claims());
        let other = sign(&with("sub", json!("admin")));
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(
            verify_token(&forged, &ed_policy(), now()),
            Err(VerificationFailure::SignatureInvalid)
        );
    }

    #[test]
    fn algorithm_outside_key_family_is_signature_invalid() {
        let token = sign_with(RSA_PRIVATE, Algorithm::RS256, &claims());
        assert_eq!(
            verify_token(&token, &ed_policy(), now()),
            Err(VerificationFailure::SignatureInvalid)
        );
    }

    #[test]
    fn rsa_policy_accepts_rs256_tokens() {
        let policy =
            TrustPolicy::from_pem(KeyKind::Rsa, RSA_PUBLIC, ISSUER, AUDIENCE, Duration::zero())
                .unwrap();
        let token = sign_with(RSA_PRIVATE, Algorithm::RS256, &claims());
        assert_eq!(verify_token(&token, &policy, now()).unwrap().subject, "user-42");
    }

    #[test]
    fn garbage_is_malformed() {
        let policy = ed_policy();
        for token in ["", "abc", "a.b", "a.b.c", "not a jwt at all"] {
            assert_eq!(
                verify_token(token, &policy, now()),
                Err(VerificationFailure::Malformed),
                "token: {token:?}"
            );
        }
    }

    #[test]
    fn missing_subject_or_expiry_is_malformed() {
        let policy = ed_policy();
        assert_eq!(
            verify_token(&sign(&without("sub")), &policy, now()),
            Err(VerificationFailure::Malformed)
        );
        assert_eq!(
            verify_token(&sign(&without("exp")), &policy, now()),
            Err(VerificationFailure::Malformed)
        );
        assert_eq!(
            verify_token(&sign(&with("exp", json!("tomorrow"))), &policy, now()),
            Err(VerificationFailure::Malformed)
        );
    }

    #[test]
    fn issuer_must_match_exactly() {
        let policy = ed_policy();
        assert_eq!(
            verify_token(&sign(&with("iss", json!("https://auth.example.test/"))), &policy, now()),
            Err(VerificationFailure::IssuerMismatch)
        );
        assert_eq!(
            verify_token(&sign(&without("iss")), &policy, now()),
            Err(VerificationFailure::IssuerMismatch)
        );
    }

    #[test]
    fn audience_must_match_exactly_or_be_listed() {
        let policy = ed_policy();
        assert_eq!(
            verify_token(&sign(&with("aud", json!("Profile-API"))), &policy, now()),
            Err(VerificationFailure::AudienceMismatch)
        );
        assert_eq!(
            verify_token(&sign(&without("aud")), &policy, now()),
            Err(VerificationFailure::AudienceMismatch)
        );
        assert!(
            verify_token(&sign(&with("aud", json!(["other", AUDIENCE]))), &policy, now()).is_ok()
        );
    }

    #[test]
    fn expiry_honours_clock_skew() {
        let policy = ed_policy();
        // within skew
        assert!(verify_token(&sign(&with("exp", json!(NOW - 60))), &policy, now()).is_ok());
        // strictly before now - skew
        assert_eq!(
            verify_token(&sign(&with("exp", json!(NOW - 61))), &policy, now()),
            Err(VerificationFailure::Expired)
        );
    }

    #[test]
    fn not_yet_valid_tokens_are_expired() {
        let policy = ed_policy();
        assert_eq!(
            verify_token(&sign(&with("iat", json!(NOW + 61))), &policy, now()),
            Err(VerificationFailure::Expired)
        );
        assert_eq!(
            verify_token(&sign(&with("nbf", json!(NOW + 300))), &policy, now()),
            Err(VerificationFailure::Expired)
        );
        assert!(verify_token(&sign(&with("iat", json!(NOW + 60))), &policy, now()).is_ok());
    }

    #[test]
    fn future_issued_at_is_not_masked_by_past_not_before() {
        let policy = ed_policy();
        let mut c = claims();
        c["iat"] = json!(NOW + 3600);
        c["nbf"] = json!(NOW - 10);
        c["exp"] = json!(NOW + 7200);
        assert_eq!(
            verify_token(&sign(&c), &policy, now()),
            Err(VerificationFailure::Expired)
        );

        // future nbf with a past iat is rejected too
        let mut c = claims();
        c["iat"] = json!(NOW - 10);
        c["nbf"] = json!(NOW + 3600);
        assert_eq!(
            verify_token(&sign(&c), &policy, now()),
            Err(VerificationFailure::Expired)
        );
    }

    #[test]
    fn missing_issued_at_has_no_lower_bound() {
        let identity = verify_token(&sign(&without("iat")), &ed_policy(), now()).unwrap();
        assert_eq!(identity.issued_at, None);
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<AuthEvent>>);

    impl AuthEventSink for Recorder {
        fn notify(&self, event: &AuthEvent) -> Result<(), SinkError> {
            self.0.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    #[test]
    fn service_emits_exactly_one_event_per_verification() {
        let recorder = Arc::new(Recorder::default());
        let service = AuthService::new(ed_policy(), Notifier::new().with_sink(recorder.clone()));

        service.verify(&sign(&claims()), now()).unwrap();
        service
            .verify(&sign(&with("exp", json!(NOW - 3600))), now())
            .unwrap_err();

        let events = recorder.0.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                AuthEvent::Validated {
                    subject: "user-42".into()
                },
                AuthEvent::Failed(VerificationFailure::Expired),
            ]
        );
    }

    struct FailingSink;

    impl AuthEventSink for FailingSink {
        fn notify(&self, _event: &AuthEvent) -> Result<(), SinkError> {
            Err(SinkError("boom".into()))
        }
    }

    #[test]
    fn sink_failures_do_not_change_the_result() {
        let service = AuthService::new(ed_policy(), Notifier::new().with_sink(Arc::new(FailingSink)));
        assert_eq!(service.verify(&sign(&claims()), now()).unwrap().subject, "user-42");
        assert_eq!(
            service.verify("nope", now()),
            Err(VerificationFailure::Malformed)
        );
    }
}
