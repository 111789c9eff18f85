//! Manage json web tokens.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Access token lifetime, in seconds.
pub const ACCESS_TOKEN_TTL: u64 = 900; // 15 minutes.

/// Pieces of information asserted on an access token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Employee the token was issued to.
    pub sub: String,
    /// Role ordinal the employee held at issuance.
    pub role: i32,
    /// Identifies the organization that issued the JWT.
    pub iss: String,
    /// Identifies the time at which the JWT was issued.
    pub iat: u64,
    /// Identifies the time before which the JWT must not be accepted.
    pub nbf: u64,
    /// Identifies the expiration time on or after which the JWT must not
    /// be accepted for processing.
    pub exp: u64,
}

/// Verification failures, collapsed before they reach any client.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature or claims are invalid")]
    InvalidToken,
    #[error("token is expired")]
    Expired,
    #[error("token cannot be decoded")]
    MalformedToken,
}

/// Sign and verify JWT tokens with an RSA key pair.
#[derive(Clone)]
pub struct TokenManager {
    algorithm: Algorithm,
    key_id: Option<String>,
    issuer: String,
    private_key: EncodingKey,
    public_key: DecodingKey,
}

impl TokenManager {
    /// Create a new [`TokenManager`] instance.
    pub fn new(
        issuer: &str,
        key_id: Option<String>,
        public_key_pem: &str,
        private_key_pem: &str,
    ) -> Result<Self> {
        let public_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())?;
        let private_key =
            EncodingKey::from_rsa_pem(private_key_pem.as_bytes())?;

        Ok(Self {
            algorithm: Algorithm::RS256,
            key_id,
            issuer: issuer.to_owned(),
            private_key,
            public_key,
        })
    }

    /// Sign a new access token for an employee.
    ///
    /// `now` comes from the caller's clock so issuance stays testable.
    pub fn create(
        &self,
        employee_id: &str,
        role: i32,
        now: u64,
    ) -> Result<String> {
        let mut header = Header::new(self.algorithm);
        header.kid = self.key_id.clone();

        let claims = AccessClaims {
            sub: employee_id.to_owned(),
            role,
            iss: self.issuer.clone(),
            iat: now,
            nbf: now,
            exp: now + ACCESS_TOKEN_TTL,
        };

        Ok(encode(&header, &claims, &self.private_key)?)
    }

    /// Decode and check a token.
    pub fn decode(
        &self,
        token: &str,
    ) -> std::result::Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_aud = false;
        validation.validate_nbf = true;
        // No leeway, expiry is exact.
        validation.leeway = 0;

        match decode::<AccessClaims>(token, &self.public_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => Err(match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::InvalidToken => TokenError::MalformedToken,
                _ => TokenError::InvalidToken,
            }),
        }
    }
}
