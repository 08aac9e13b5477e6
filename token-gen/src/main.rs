use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use clap::{Parser, ValueEnum};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use uuid::Uuid;

/// Mint a signed access token (JWT) for local testing of profile-api.
///
/// - Signs with an Ed25519 (PKCS#8 PEM) or RSA (PKCS#1/PKCS#8 PEM) private key
/// - Claims: iss, aud, sub, iat, exp, jti, plus any `--claim key=value`
/// - The service only ever holds the matching public key
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Path to the issuer's private key in PEM
    #[arg(long, value_name = "FILE")]
    private_key_pem: PathBuf,

    /// Signing algorithm
    #[arg(long, value_enum, default_value_t = Alg::Eddsa)]
    alg: Alg,

    /// Subject (user id)
    #[arg(long)]
    sub: String,

    /// Issuer; must equal the service's AUTH_ISSUER
    #[arg(long, env = "AUTH_ISSUER")]
    iss: String,

    /// Audience; must equal the service's AUTH_AUDIENCE
    #[arg(long, env = "AUTH_AUDIENCE")]
    aud: String,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 600)]
    ttl: i64,

    /// Override iat (unix seconds). Default: now.
    #[arg(long)]
    iat: Option<i64>,

    /// Space-separated scopes
    #[arg(long)]
    scope: Option<String>,

    /// Extra string claim, repeatable: --claim name=Alice
    #[arg(long = "claim", value_name = "KEY=VALUE", value_parser = parse_claim)]
    claims: Vec<(String, String)>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Alg {
    Eddsa,
    Rs256,
    Ps256,
}

impl From<Alg> for Algorithm {
    fn from(alg: Alg) -> Self {
        match alg {
            Alg::Eddsa => Algorithm::EdDSA,
            Alg::Rs256 => Algorithm::RS256,
            Alg::Ps256 => Algorithm::PS256,
        }
    }
}

fn parse_claim(raw: &str) -> Result<(String, String), String> {
    let (k, v) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if k.is_empty() {
        return Err("claim name must not be empty".to_string());
    }
    Ok((k.to_string(), v.to_string()))
}

fn now_unix() -> Result<i64, Box<dyn std::error::Error>> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let pem = fs::read(&args.private_key_pem)?;
    let key = match args.alg {
        Alg::Eddsa => EncodingKey::from_ed_pem(&pem)?,
        Alg::Rs256 | Alg::Ps256 => EncodingKey::from_rsa_pem(&pem)?,
    };

    let iat = match args.iat {
        Some(iat) => iat,
        None => now_unix()?,
    };
    let exp = iat + args.ttl;
    let jti = Uuid::new_v4().to_string();

    let mut claims = serde_json::Map::new();
    // Extra claims go first so the registered ones below always win.
    for (k, v) in args.claims {
        claims.insert(k, serde_json::Value::String(v));
    }
    if let Some(scope) = args.scope {
        claims.insert("scope".to_string(), serde_json::Value::String(scope));
    }
    claims.insert("iss".to_string(), args.iss.into());
    claims.insert("aud".to_string(), args.aud.into());
    claims.insert("sub".to_string(), args.sub.into());
    claims.insert("iat".to_string(), iat.into());
    claims.insert("exp".to_string(), exp.into());
    claims.insert("jti".to_string(), jti.clone().into());

    let mut header = Header::new(args.alg.into());
    header.typ = Some("JWT".to_string());
    let token = jsonwebtoken::encode(&header, &claims, &key)?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("access_token: {}", token);
    println!("iat: {}", iat);
    println!("exp: {}", exp);
    println!("jti: {}", jti);

    Ok(())
}
