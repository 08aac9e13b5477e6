pub mod access_jwt;
pub mod events;
pub mod factory;
pub mod policy;

pub use access_jwt::{AuthService, VerificationFailure, VerifiedIdentity, verify_token};
pub use events::{AuthEvent, AuthEventSink, AuthStats, Notifier, TracingSink};
pub use factory::build_auth_service;
pub use policy::{KeyKind, PolicyError, TrustPolicy};
