//! OAuth2 HTTP Client
//!
//! Monta a URL de consentimento e troca authorization code / refresh token
//! por tokens no endpoint `/oauth2/access_token` da conta.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::RngCore;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response};
use url::Url;

use super::{Credentials, Domain, Grant, Token, TokenResponse};
use crate::config::provider::{Provider, MAX_TOKEN_RESPONSE_BYTES};
use crate::error::{AmoCrmError, Result};
use crate::utils::mask_secret;

const TOKEN_PATH: &str = "/oauth2/access_token";

/// Campos do formulário que os parâmetros do grant nunca sobrescrevem
const RESERVED_FORM_FIELDS: [&str; 4] = ["client_id", "client_secret", "redirect_uri", "grant_type"];

/// Como a página de consentimento devolve o resultado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationMode {
    PostMessage,
    Popup,
}

impl AuthorizationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationMode::PostMessage => "post_message",
            AuthorizationMode::Popup => "popup",
        }
    }
}

impl FromStr for AuthorizationMode {
    type Err = AmoCrmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post_message" => Ok(AuthorizationMode::PostMessage),
            "popup" => Ok(AuthorizationMode::Popup),
            other => Err(AmoCrmError::InvalidMode(other.to_string())),
        }
    }
}

impl AsRef<str> for AuthorizationMode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AuthorizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gera um `state` aleatório de 32 caracteres hexadecimais
pub fn random_state() -> String {
    let mut key = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut key);
    hex::encode(key)
}

/// Cliente OAuth2 do amoCRM
///
/// Guarda as credenciais, a tabela do provedor e o domínio da conta; o
/// endpoint de token é sempre relativo ao domínio configurado.
#[derive(Debug, Clone)]
pub struct TokenExchanger {
    credentials: Credentials,
    provider: Provider,
    domain: Option<Domain>,
    http_client: Client,
}

impl TokenExchanger {
    /// Cria o cliente com o timeout da tabela do provedor
    pub fn new(credentials: Credentials, provider: Provider) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(provider.request_timeout)
            .build()
            .map_err(|e| AmoCrmError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_http_client(credentials, provider, http_client))
    }

    /// Usa um `reqwest::Client` já configurado (ex.: com `resolve` para testes)
    pub fn with_http_client(credentials: Credentials, provider: Provider, http_client: Client) -> Self {
        Self {
            credentials,
            provider,
            domain: None,
            http_client,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
    }

    pub fn set_domain(&mut self, domain: &str) -> Result<()> {
        self.domain = Some(Domain::parse_with(domain, &self.provider)?);
        Ok(())
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// URL absoluta na conta: `{scheme}://{domain}[:port]{path}`
    ///
    /// Host, porta e path são definidos campo a campo; um domínio cujo
    /// account contém delimitadores de URL (`#`, `?`, `@`, ...) falha com
    /// `InvalidDomain` em vez de apontar para outro host.
    pub(crate) fn account_url(&self, path: &str) -> Result<Url> {
        let domain = self.domain.as_ref().ok_or(AmoCrmError::DomainNotSet)?;
        let host = domain.to_string();
        let invalid = || AmoCrmError::InvalidDomain(host.clone());

        let mut url = Url::parse(&format!("{}://placeholder", self.provider.scheme))
            .map_err(|e| AmoCrmError::config_error(format!("invalid scheme {}: {}", self.provider.scheme, e)))?;

        url.set_host(Some(&host)).map_err(|_| invalid())?;
        url.set_port(self.provider.port).map_err(|_| invalid())?;
        url.set_path(path);

        let same_host = url.host_str().is_some_and(|h| h.eq_ignore_ascii_case(&host));
        if !same_host || !url.username().is_empty() || url.password().is_some() {
            return Err(invalid());
        }

        Ok(url)
    }

    /// URL da página de consentimento; não faz nenhuma requisição
    pub fn build_authorization_url(&self, state: &str, mode: impl AsRef<str>) -> Result<Url> {
        if state.is_empty() {
            return Err(AmoCrmError::EmptyState);
        }

        let mode: AuthorizationMode = mode.as_ref().parse()?;

        let mut url = Url::parse(&self.provider.authorize_url)
            .map_err(|e| AmoCrmError::config_error(format!("invalid authorize url: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("state", state)
            .append_pair("mode", mode.as_str());

        Ok(url)
    }

    /// Troca o authorization code recebido no redirect por um token
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        if self.domain.is_none() {
            return Err(AmoCrmError::DomainNotSet);
        }

        if code.is_empty() {
            return Err(AmoCrmError::EmptyCode);
        }

        self.exchange(Grant::AuthorizationCode, &[("code", code)]).await
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token> {
        if refresh_token.is_empty() {
            return Err(AmoCrmError::EmptyRefreshToken);
        }

        self.exchange(Grant::RefreshToken, &[("refresh_token", refresh_token)]).await
    }

    /// Handshake genérico com o endpoint de token
    pub async fn exchange(&self, grant: Grant, params: &[(&str, &str)]) -> Result<Token> {
        let token_url = self.account_url(TOKEN_PATH)?;

        for parameter in grant.required_parameters() {
            let present = params.iter().any(|(key, value)| key == parameter && !value.is_empty());
            if !present {
                return Err(AmoCrmError::MissingGrantParameter {
                    grant: grant.name(),
                    parameter: *parameter,
                });
            }
        }

        let mut form: Vec<(&str, &str)> = vec![
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("grant_type", grant.name()),
        ];
        for (key, value) in params {
            if !RESERVED_FORM_FIELDS.contains(key) {
                form.push((*key, *value));
            }
        }

        tracing::info!("🔐 [OAuth2] POST {} (grant_type: {})", token_url, grant.name());

        let response = self
            .http_client
            .post(token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(USER_AGENT, self.provider.user_agent.as_str())
            .timeout(self.provider.request_timeout)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = read_body_limited(response, MAX_TOKEN_RESPONSE_BYTES).await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::error!("❌ [OAuth2] Token exchange failed: {} - {}", status, body);
            return Err(AmoCrmError::TokenRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let response: TokenResponse =
            serde_json::from_slice(&body).map_err(AmoCrmError::MalformedTokenResponse)?;

        if response.access_token.is_empty() {
            return Err(AmoCrmError::MissingAccessToken);
        }

        let token = Token::from_response(response, Utc::now());

        tracing::info!(
            "✅ [OAuth2] Access token obtido: {} (expira em {:?})",
            mask_secret(token.access_token()),
            token.expires_at()
        );

        Ok(token)
    }
}

/// Erro ao ler o corpo; timeout conta como falha de transporte
pub(crate) fn body_error(error: reqwest::Error) -> AmoCrmError {
    if error.is_timeout() {
        AmoCrmError::Transport(error)
    } else {
        AmoCrmError::BodyRead(error)
    }
}

/// Lê o corpo até `limit` bytes; o excedente é descartado
pub(crate) async fn read_body_limited(mut response: Response, limit: usize) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    while let Some(chunk) = response.chunk().await.map_err(body_error)? {
        let remaining = limit - body.len();
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
