//! Tipos de erro para o crate amocrm

use thiserror::Error;

/// Erros do cliente amoCRM
///
/// Validação de entrada falha antes de qualquer I/O. Erros de transporte
/// carregam o `reqwest::Error` original; erros de protocolo preservam o corpo
/// da resposta para diagnóstico.
#[derive(Debug, Error)]
pub enum AmoCrmError {
    /// `state` vazio ao montar a URL de autorização
    #[error("oauth2: state must not be empty")]
    EmptyState,

    /// Modo de redirecionamento fora de `post_message` / `popup`
    #[error("oauth2: unexpected mode: {0}")]
    InvalidMode(String),

    /// Domínio de conta mal formado
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Token ausente em `set_token`
    #[error("invalid token")]
    InvalidToken,

    /// Relação fora da whitelist da entidade
    #[error("unexpected relation: {0}")]
    UnknownRelation(String),

    #[error("oauth2: empty authorization code")]
    EmptyCode,

    #[error("oauth2: empty refresh token")]
    EmptyRefreshToken,

    /// Parâmetro obrigatório do grant ausente ou vazio
    #[error("oauth2: missing required {grant} grant parameter {parameter}")]
    MissingGrantParameter {
        grant: &'static str,
        parameter: &'static str,
    },

    /// Cliente usado antes de `set_domain`
    #[error("account domain is not set")]
    DomainNotSet,

    /// Cliente usado antes de `set_token`
    #[error("token is not set")]
    TokenNotSet,

    /// Erro de configuração
    #[error("configuration error: {0}")]
    Config(String),

    /// Falha ao enviar a requisição (inclui timeout)
    #[error("send request: {0}")]
    Transport(#[from] reqwest::Error),

    /// Falha ao ler o corpo da resposta
    #[error("read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// Endpoint de token respondeu com status fora de 2xx
    #[error("oauth2: cannot fetch token: status {status}: {body}")]
    TokenRequestFailed { status: u16, body: String },

    #[error("oauth2: parse token from json: {0}")]
    MalformedTokenResponse(#[source] serde_json::Error),

    #[error("oauth2: server response missing access_token")]
    MissingAccessToken,

    /// Endpoint de recurso respondeu com status fora de 2xx
    #[error("amoCRM API error (status {status}): {body}")]
    ApiRequestFailed { status: u16, body: String },

    /// Falha ao decodificar o JSON de um recurso
    #[error("decode json response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl AmoCrmError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Indica erros de validação que falham antes de qualquer I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyState
                | Self::InvalidMode(_)
                | Self::InvalidDomain(_)
                | Self::InvalidToken
                | Self::UnknownRelation(_)
                | Self::EmptyCode
                | Self::EmptyRefreshToken
                | Self::MissingGrantParameter { .. }
        )
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, AmoCrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        assert_eq!(AmoCrmError::EmptyState.to_string(), "oauth2: state must not be empty");
        assert_eq!(AmoCrmError::DomainNotSet.to_string(), "account domain is not set");
        assert_eq!(AmoCrmError::InvalidToken.to_string(), "invalid token");

        let missing = AmoCrmError::MissingGrantParameter {
            grant: "refresh_token",
            parameter: "refresh_token",
        };
        assert_eq!(
            missing.to_string(),
            "oauth2: missing required refresh_token grant parameter refresh_token"
        );

        let failed = AmoCrmError::TokenRequestFailed {
            status: 400,
            body: r#"{"hint":"Authorization code has expired"}"#.to_string(),
        };
        assert!(failed.to_string().contains("status 400"));
        assert!(failed.to_string().contains("Authorization code has expired"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(AmoCrmError::UnknownRelation("x".into()).is_validation());
        assert!(AmoCrmError::InvalidMode("x".into()).is_validation());
        assert!(!AmoCrmError::DomainNotSet.is_validation());
        assert!(!AmoCrmError::MissingAccessToken.is_validation());
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err = AmoCrmError::Decode(err);
        assert!(err.to_string().starts_with("decode json response"));
    }

    #[test]
    fn test_config_error_constructor() {
        let error = AmoCrmError::config_error("AMOCRM_CLIENT_ID not set");
        assert_eq!(error.to_string(), "configuration error: AMOCRM_CLIENT_ID not set");
    }
}
