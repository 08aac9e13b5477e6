/*
 * Responsibility
 * - 環境変数や設定の読み込み (CORS 許可、Auth 設定、検索のページング上限など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::services::auth::KeyKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        let raw = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the access-token public key comes from.
///
/// A file path wins over inline PEM when both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeySource {
    Path(PathBuf),
    Pem(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub access_token_leeway_seconds: u64,

    pub access_jwt_key_kind: KeyKind,
    pub access_jwt_public_key: PublicKeySource,

    pub search_default_page_size: usize,
    pub search_max_page_size: usize,
    pub search_pool_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            parse_origins(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let sqids_min_length = std::env::var("SQIDS_MIN_LENGTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10);

        let sqids_alphabet = std::env::var("SQIDS_ALPHABET").unwrap_or_else(|_| {
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        });

        let auth_issuer =
            std::env::var("AUTH_ISSUER").map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let access_jwt_key_kind = match std::env::var("ACCESS_JWT_KEY_TYPE") {
            Ok(raw) => KeyKind::from_str(&raw)
                .map_err(|_| ConfigError::Invalid("ACCESS_JWT_KEY_TYPE"))?,
            Err(_) => KeyKind::Ed25519,
        };

        let access_jwt_public_key = match std::env::var("ACCESS_JWT_PUBLIC_KEY_PATH") {
            Ok(path) if !path.trim().is_empty() => PublicKeySource::Path(PathBuf::from(path)),
            _ => std::env::var("ACCESS_JWT_PUBLIC_KEY_PEM")
                .map(|pem| PublicKeySource::Pem(pem.replace("\\n", "\n")))
                .map_err(|_| ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PATH"))?,
        };

        let search_default_page_size = positive_usize("SEARCH_DEFAULT_PAGE_SIZE", 20)?;
        let search_max_page_size = positive_usize("SEARCH_MAX_PAGE_SIZE", 100)?;
        if search_max_page_size < search_default_page_size {
            return Err(ConfigError::Invalid("SEARCH_MAX_PAGE_SIZE"));
        }

        let search_pool_size = positive_usize("SEARCH_POOL_SIZE", 50)?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            sqids_min_length,
            sqids_alphabet,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            access_jwt_key_kind,
            access_jwt_public_key,
            search_default_page_size,
            search_max_page_size,
            search_pool_size,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn positive_usize(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    parse_positive_usize(key, std::env::var(key).ok().as_deref(), default)
}

// Unset falls back to the default; set-but-unusable is a startup error.
fn parse_positive_usize(
    key: &'static str,
    raw: Option<&str>,
    default: usize,
) -> Result<usize, ConfigError> {
    match raw {
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(ConfigError::Invalid(key)),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_env_accepts_short_and_long_production_names() {
        assert_eq!(AppEnv::parse("PROD"), AppEnv::Production);
        assert_eq!(AppEnv::parse("production"), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
        assert!(!AppEnv::parse("").is_production());
    }

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        let origins = parse_origins(" https://a.example , ,https://b.example,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn sizes_default_when_unset_and_reject_unusable_values() {
        assert_eq!(parse_positive_usize("SEARCH_POOL_SIZE", None, 50).unwrap(), 50);
        assert_eq!(
            parse_positive_usize("SEARCH_POOL_SIZE", Some(" 75 "), 50).unwrap(),
            75
        );
        for raw in ["lots", "0", "-3", ""] {
            assert!(matches!(
                parse_positive_usize("SEARCH_POOL_SIZE", Some(raw), 50),
                Err(ConfigError::Invalid("SEARCH_POOL_SIZE"))
            ));
        }
    }

    #[test]
    fn config_error_names_the_offending_key() {
        assert_eq!(
            ConfigError::Missing("AUTH_ISSUER").to_string(),
            "missing configuration: AUTH_ISSUER"
        );
        assert_eq!(
            ConfigError::Invalid("PORT").to_string(),
            "invalid configuration: PORT"
        );
    }
}
