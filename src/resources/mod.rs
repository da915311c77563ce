//! Recursos da API v4
//!
//! Cada recurso valida as relações pedidas (`with`) contra a whitelist da
//! entidade antes de qualquer I/O e decodifica a resposta em DTOs tipados.

pub mod accounts;
pub mod leads;

pub use accounts::{Accounts, AccountsConfig};
pub use leads::{Leads, LeadsConfig};

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::client::body_error;
use crate::config::Provider;
use crate::error::{AmoCrmError, Result};
use crate::utils::logging::log_amocrm_api_error;

/// Endpoints conhecidos da API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Account,
    Leads,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Account => "account",
            Endpoint::Leads => "leads",
        }
    }

    /// Caminho versionado, ex.: `/api/v4/leads`
    pub fn path(&self, provider: &Provider) -> String {
        provider.api_path(self.as_str())
    }
}

/// Falha com `UnknownRelation` na primeira relação fora da whitelist
pub(crate) fn validate_relations(relations: &[String], allowed: &[&str]) -> Result<()> {
    match relations.iter().find(|r| !allowed.contains(&r.as_str())) {
        Some(relation) => Err(AmoCrmError::UnknownRelation(relation.clone())),
        None => Ok(()),
    }
}

/// Pares `with=...` na ordem em que as relações foram pedidas
pub(crate) fn relation_query(relations: &[String]) -> Vec<(&str, &str)> {
    relations.iter().map(|r| ("with", r.as_str())).collect()
}

/// Verifica o status e decodifica o corpo JSON
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let endpoint = response.url().path().to_string();
    let body = response.bytes().await.map_err(body_error)?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&body).into_owned();
        log_amocrm_api_error(&endpoint, &format!("status {} - {}", status, body));
        return Err(AmoCrmError::ApiRequestFailed {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_slice(&body).map_err(AmoCrmError::Decode)
}

/// Como `decode_json`, mas `204 No Content` vira `T::default()`
pub(crate) async fn decode_json_or_default<T: DeserializeOwned + Default>(response: Response) -> Result<T> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(T::default());
    }

    decode_json(response).await
}
