use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::Response;
use url::Url;

use crate::auth::{Credentials, Domain, Token, TokenExchanger};
use crate::config::Provider;
use crate::error::{AmoCrmError, Result};
use crate::resources::{Accounts, Leads};
use crate::utils::logging::log_api_request;
use crate::utils::mask_secret;

/// Cliente HTTP para interagir com a API do amoCRM
///
/// Uma sessão por instância: um domínio e um token, substituído no lugar
/// quando expira. Métodos que podem renovar o token recebem `&mut self`;
/// para uso concorrente, veja [`SharedClient`](crate::client::SharedClient).
#[derive(Debug, Clone)]
pub struct AmoCrmClient {
    exchanger: TokenExchanger,
    token: Option<Token>,
}

impl AmoCrmClient {
    /// Cria um cliente para o amoCRM em produção
    ///
    /// # Timeouts
    ///
    /// - Total: 20s por requisição
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_provider(credentials, Provider::amocrm())
    }

    pub fn with_provider(credentials: Credentials, provider: Provider) -> Result<Self> {
        Ok(Self {
            exchanger: TokenExchanger::new(credentials, provider)?,
            token: None,
        })
    }

    pub fn with_http_client(credentials: Credentials, provider: Provider, http_client: reqwest::Client) -> Self {
        Self {
            exchanger: TokenExchanger::with_http_client(credentials, provider, http_client),
            token: None,
        }
    }

    pub fn exchanger(&self) -> &TokenExchanger {
        &self.exchanger
    }

    /// Token atual; após uma renovação transparente é o token novo, que o
    /// chamador deve persistir
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.exchanger.domain()
    }

    /// Define o token da sessão; `None` é rejeitado
    pub fn set_token(&mut self, token: impl Into<Option<Token>>) -> Result<()> {
        let token = token.into().ok_or(AmoCrmError::InvalidToken)?;
        self.token = Some(token);
        Ok(())
    }

    pub fn set_domain(&mut self, domain: &str) -> Result<()> {
        self.exchanger.set_domain(domain)
    }

    pub fn build_authorization_url(&self, state: &str, mode: impl AsRef<str>) -> Result<Url> {
        self.exchanger.build_authorization_url(state, mode)
    }

    /// Troca o authorization code; o token retornado não é armazenado
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        self.exchanger.exchange_code(code).await
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token> {
        self.exchanger.refresh_token(refresh_token).await
    }

    pub fn accounts(&mut self) -> Accounts<'_> {
        Accounts::new(self)
    }

    pub fn leads(&mut self) -> Leads<'_> {
        Leads::new(self)
    }

    /// Executa um GET autenticado em `{scheme}://{domain}{path}?{query}`
    ///
    /// Renova o token antes da requisição se ele estiver expirado. Headers
    /// extras nunca sobrescrevem `Authorization` nem `User-Agent`. O corpo da
    /// resposta não é interpretado.
    pub async fn get(
        &mut self,
        path: &str,
        query: &[(&str, &str)],
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Response> {
        self.ensure_fresh_token().await?;

        let headers = self.headers(extra_headers)?;
        let url = self.url(path, query)?;

        log_api_request(path, query.len());

        let response = self
            .exchanger
            .http_client()
            .get(url)
            .headers(headers)
            .timeout(self.exchanger.provider().request_timeout)
            .send()
            .await?;

        Ok(response)
    }

    /// Renova o token armazenado quando expirado
    async fn ensure_fresh_token(&mut self) -> Result<()> {
        let token = self.token.as_ref().ok_or(AmoCrmError::TokenNotSet)?;

        if !token.is_expired() {
            return Ok(());
        }

        let refresh_token = token.refresh_token().to_string();
        if refresh_token.is_empty() {
            return Err(AmoCrmError::EmptyRefreshToken);
        }

        tracing::info!(
            "🔄 [AmoCRM] Token expirado, renovando com refresh token {}",
            mask_secret(&refresh_token)
        );

        let token = self.exchanger.refresh_token(&refresh_token).await?;
        self.token = Some(token);

        Ok(())
    }

    fn headers(&self, extra_headers: Option<&HeaderMap>) -> Result<HeaderMap> {
        let token = self.token.as_ref().ok_or(AmoCrmError::TokenNotSet)?;

        let user_agent = HeaderValue::from_str(&self.exchanger.provider().user_agent)
            .map_err(|e| AmoCrmError::config_error(format!("invalid user agent: {}", e)))?;
        let authorization =
            HeaderValue::from_str(&token.authorization_header_value()).map_err(|_| AmoCrmError::InvalidToken)?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        headers.insert(AUTHORIZATION, authorization);

        if let Some(extra) = extra_headers {
            for (name, value) in extra {
                if *name == USER_AGENT || *name == AUTHORIZATION {
                    continue;
                }
                headers.append(name.clone(), value.clone());
            }
        }

        Ok(headers)
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.exchanger.account_url(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}
