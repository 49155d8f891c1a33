// SPDX-License-Identifier: Apache-2.0

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use formflow_model::{Role, User};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt::{Display, Formatter};
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION: &str = "v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Malformed,
    BadSignature,
    Expired,
    Key,
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::Malformed => "malformed token",
            Self::BadSignature => "token signature mismatch",
            Self::Expired => "token expired",
            Self::Key => "token key rejected",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for TokenError {}

/// Signs and verifies `v1.<claims>.<signature>` bearer tokens.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            secret: secret.to_vec(),
            ttl,
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|_| TokenError::Key)
    }

    fn signing_input(claims_b64: &str) -> String {
        format!("{TOKEN_VERSION}.{claims_b64}")
    }

    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: now.timestamp().saturating_add(ttl),
        };
        let payload = serde_json::to_vec(&claims).map_err(|_| TokenError::Malformed)?;
        let claims_b64 = URL_SAFE_NO_PAD.encode(payload);
        let input = Self::signing_input(&claims_b64);
        let mut mac = self.mac()?;
        mac.update(input.as_bytes());
        let sig = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{input}.{sig}"))
    }

    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let mut parts = token.trim().split('.');
        let (Some(version), Some(claims_b64), Some(sig_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };
        if version != TOKEN_VERSION {
            return Err(TokenError::Malformed);
        }
        let sig = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|_| TokenError::Malformed)?;
        let mut mac = self.mac()?;
        mac.update(Self::signing_input(claims_b64).as_bytes());
        mac.verify_slice(&sig).map_err(|_| TokenError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| TokenError::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".into(),
            username: "asha".into(),
            email: "asha@org.in".into(),
            password_hash: String::new(),
            role: Role::Employee,
            created_at: Utc::now(),
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(b"0123456789abcdef0123", Duration::from_secs(60))
    }

    #[test]
    fn issued_tokens_verify_until_expiry() {
        let now = Utc::now();
        let token = codec().issue(&user(), now).expect("issue");
        assert!(token.starts_with("v1."));
        let claims = codec().verify(&token, now).expect("verify");
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.role, Role::Employee);

        let later = now + chrono::Duration::seconds(61);
        assert_eq!(codec().verify(&token, later), Err(TokenError::Expired));
    }

    #[test]
    fn tampering_and_foreign_keys_are_rejected() {
        let now = Utc::now();
        let token = codec().issue(&user(), now).expect("issue");
        let other = TokenCodec::new(b"another-secret-value", Duration::from_secs(60));
        assert_eq!(other.verify(&token, now), Err(TokenError::BadSignature));

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(
            br#"{"sub":"u1","email":"asha@org.in","role":"admin","exp":99999999999}"#,
        );
        parts[1] = &forged;
        assert_eq!(
            codec().verify(&parts.join("."), now),
            Err(TokenError::BadSignature)
        );
        assert_eq!(codec().verify("garbage", now), Err(TokenError::Malformed));
    }
}
