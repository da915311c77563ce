use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Margem de renovação antecipada para tolerar diferença de relógio
pub const EXPIRY_SKEW_SECS: i64 = 10;

/// Teto para `expires_in` vindo do servidor (10 anos)
const MAX_EXPIRES_IN_SECS: i64 = 10 * 365 * 24 * 60 * 60;

const BEARER: &str = "Bearer";
const MAC: &str = "MAC";
const BASIC: &str = "Basic";

/// Token OAuth2 emitido pelo amoCRM
///
/// Imutável: o cliente substitui o token inteiro quando renova. Pode ser
/// serializado para que o chamador o persista entre execuções.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    access_token: String,
    refresh_token: String,
    token_type: String,
    /// `None` significa que o token nunca expira
    expires_at: Option<DateTime<Utc>>,
}

impl Token {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: token_type.into(),
            expires_at,
        }
    }

    /// Constrói o token a partir da resposta do endpoint, com `expires_at`
    /// relativo a `now`
    pub fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        Self::new(
            response.access_token,
            response.refresh_token,
            response.token_type,
            Some(now + Duration::seconds(response.expires_in.clamp(0, MAX_EXPIRES_IN_SECS))),
        )
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Tipo normalizado (`Bearer`, `MAC`, `Basic` ou o valor original)
    pub fn token_type(&self) -> &str {
        let raw = self.token_type.as_str();
        if raw.is_empty() || raw.eq_ignore_ascii_case(BEARER) {
            BEARER
        } else if raw.eq_ignore_ascii_case(MAC) {
            MAC
        } else if raw.eq_ignore_ascii_case(BASIC) {
            BASIC
        } else {
            raw
        }
    }

    /// Expirado quando não há access token ou quando `now >= expires_at - skew`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_empty() {
            return true;
        }

        match self.expires_at {
            None => false,
            Some(expires_at) => expires_at - Duration::seconds(EXPIRY_SKEW_SECS) <= now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Valor do header `Authorization`
    pub fn authorization_header_value(&self) -> String {
        format!("{} {}", self.token_type(), self.access_token)
    }
}

/// Resposta do endpoint `/oauth2/access_token`
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Segundos até a expiração
    #[serde(default)]
    pub expires_in: i64,
}
