/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use chrono::Duration;

use crate::config::{Config, PublicKeySource};
use crate::services::auth::{
    AuthService, AuthStats, Notifier, PolicyError, TracingSink, TrustPolicy,
};

pub fn build_trust_policy(config: &Config) -> Result<TrustPolicy, PolicyError> {
    let leeway = i64::try_from(config.access_token_leeway_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX);

    match &config.access_jwt_public_key {
        PublicKeySource::Path(path) => TrustPolicy::from_pem_file(
            config.access_jwt_key_kind,
            path,
            config.auth_issuer.as_str(),
            config.auth_audience.as_str(),
            leeway,
        ),
        PublicKeySource::Pem(pem) => TrustPolicy::from_pem(
            config.access_jwt_key_kind,
            pem,
            config.auth_issuer.as_str(),
            config.auth_audience.as_str(),
            leeway,
        ),
    }
}

pub fn build_auth_service(
    config: &Config,
    stats: Arc<AuthStats>,
) -> Result<Arc<AuthService>, PolicyError> {
    let policy = build_trust_policy(config)?;
    tracing::info!(?policy, "access token trust policy loaded");

    let notifier = Notifier::new()
        .with_sink(Arc::new(TracingSink))
        .with_sink(stats);

    Ok(Arc::new(AuthService::new(policy, notifier)))
}
