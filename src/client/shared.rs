//! Cliente compartilhável entre tasks
//!
//! Todas as requisições passam por um único `tokio::sync::Mutex`, mantido
//! durante a requisição inteira (renovação do token incluída). As chamadas
//! são serializadas e tasks concorrentes nunca renovam o mesmo token duas
//! vezes.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::Response;
use tokio::sync::{Mutex, MutexGuard};

use super::AmoCrmClient;
use crate::auth::Token;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct SharedClient {
    inner: Arc<Mutex<AmoCrmClient>>,
}

impl SharedClient {
    pub fn new(client: AmoCrmClient) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Acesso exclusivo ao cliente (ex.: para usar `accounts()` / `leads()`)
    pub async fn lock(&self) -> MutexGuard<'_, AmoCrmClient> {
        self.inner.lock().await
    }

    /// GET autenticado; segura o lock até a resposta chegar
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Response> {
        self.inner.lock().await.get(path, query, extra_headers).await
    }

    /// Cópia do token atual, para persistência pelo chamador
    pub async fn token(&self) -> Option<Token> {
        self.inner.lock().await.token().cloned()
    }

    pub async fn set_token(&self, token: impl Into<Option<Token>>) -> Result<()> {
        self.inner.lock().await.set_token(token)
    }

    pub async fn set_domain(&self, domain: &str) -> Result<()> {
        self.inner.lock().await.set_domain(domain)
    }
}

impl From<AmoCrmClient> for SharedClient {
    fn from(client: AmoCrmClient) -> Self {
        Self::new(client)
    }
}
