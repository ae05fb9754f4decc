//! Service account authorisation for the Sheets API.
//!
//! Google service accounts authenticate with a self-signed RS256 JWT that is
//! exchanged at the key's token URI for a short-lived bearer token.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::error::SheetsError;

/// OAuth scope granting read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Token endpoint used when the key file does not name one.
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Grant type for the JWT bearer flow.
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion (Google caps this at one hour).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh tokens this long before they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Source of bearer tokens for Sheets requests.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// Return a token valid for at least the next request.
    async fn access_token(&self) -> Result<String, SheetsError>;
}

/// A fixed, pre-issued token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, SheetsError> {
        Ok(self.0.clone())
    }
}

/// The fields of a service account JSON key that the JWT flow needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Service account identity, used as the JWT issuer.
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    /// Token endpoint.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Load a key from a JSON key file downloaded from the cloud console.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SheetsError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse a key from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, SheetsError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

const fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

/// Bearer tokens minted from a service account key, cached until near expiry.
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// Create an authoriser, validating the private key up front.
    pub fn new(key: ServiceAccountKey) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::Credentials(format!("invalid private key: {e}")))?;

        Ok(Self {
            key,
            encoding_key,
            client: reqwest::Client::new(),
            cached: Mutex::new(None),
        })
    }

    /// Service account identity.
    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| SheetsError::Auth(format!("failed to sign assertion: {e}")))
    }

    #[instrument(skip(self), fields(client_email = %self.key.client_email))]
    async fn fetch_token(&self) -> Result<CachedToken, SheetsError> {
        let now = Utc::now();
        let assertion = self.signed_assertion(now)?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        debug!(expires_in = token.expires_in, "Obtained access token");

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }
}
