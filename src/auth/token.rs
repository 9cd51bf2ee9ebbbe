use axum::extract::FromRef;
use base64ct::{Base64UrlUnpadded, Encoding};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::Deserialize;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use crate::state::AppState;

/// Validity window of a session token.
pub const TOKEN_TTL: Duration = Duration::days(30);

/// The only algorithm tokens are signed and accepted with.
const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature or algorithm mismatch")]
    InvalidSignature,
    #[error("token is malformed")]
    Malformed,
    #[error("token has expired")]
    Expired,
}

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_secret(state.config.jwt.secret.as_bytes())
    }
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, user_id: i64, now: OffsetDateTime) -> anyhow::Result<String> {
        let exp = now + TOKEN_TTL;
        let claims = Claims {
            sub: user_id,
            iat: usize::try_from(now.unix_timestamp())?,
            exp: usize::try_from(exp.unix_timestamp())?,
        };
        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)?;
        debug!(user_id, "session token issued");
        Ok(token)
    }

    /// Checks signature, algorithm and structure, then expiry against `now`.
    pub fn verify(&self, token: &str, now: OffsetDateTime) -> Result<i64, TokenError> {
        // jsonwebtoken cannot parse algorithms it does not know (e.g. "none")
        match header_algorithm(token)?.parse::<Algorithm>() {
            Ok(alg) if alg == ALGORITHM => {}
            _ => return Err(TokenError::InvalidSignature),
        }

        let mut validation = Validation::new(ALGORITHM);
        // expiry is judged against the caller's clock below
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        let exp = i64::try_from(data.claims.exp).map_err(|_| TokenError::Malformed)?;
        if now.unix_timestamp() > exp {
            return Err(TokenError::Expired);
        }

        debug!(user_id = data.claims.sub, "session token verified");
        Ok(data.claims.sub)
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// The `alg` named in the token header, read without trusting anything else.
fn header_algorithm(token: &str) -> Result<String, TokenError> {
    let segment = token
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or(TokenError::Malformed)?;
    let bytes = Base64UrlUnpadded::decode_vec(segment).map_err(|_| TokenError::Malformed)?;
    let header: RawHeader = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;
    Ok(header.alg)
}
