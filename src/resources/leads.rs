use crate::client::AmoCrmClient;
use crate::error::Result;
use crate::models::LeadsPage;

use super::{decode_json_or_default, relation_query, validate_relations, Endpoint};

pub const WITH_CATALOG_ELEMENTS: &str = "catalog_elements";
pub const WITH_IS_PRICE_MODIFIED_BY_ROBOT: &str = "is_price_modified_by_robot";
pub const WITH_LOSS_REASON: &str = "loss_reason";
pub const WITH_CONTACTS: &str = "contacts";
pub const WITH_ONLY_DELETED: &str = "only_deleted";
pub const WITH_SOURCE_ID: &str = "source_id";

/// Relações aceitas em `GET /api/v4/leads`
pub const LEAD_RELATIONS: [&str; 6] = [
    WITH_CATALOG_ELEMENTS,
    WITH_IS_PRICE_MODIFIED_BY_ROBOT,
    WITH_LOSS_REASON,
    WITH_CONTACTS,
    WITH_ONLY_DELETED,
    WITH_SOURCE_ID,
];

/// Limite máximo de itens por página aceito pela API
pub const MAX_LIMIT: u32 = 250;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadsConfig {
    pub relations: Vec<String>,
    /// Páginas começam em 1; `0` é enviado como `1`
    pub page: Option<u32>,
    /// Limitado a `1..=MAX_LIMIT`
    pub limit: Option<u32>,
}

impl LeadsConfig {
    pub fn with(mut self, relation: impl Into<String>) -> Self {
        self.relations.push(relation.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn pagination(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.max(1).to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.clamp(1, MAX_LIMIT).to_string()));
        }
        params
    }
}

/// Recurso `leads`
pub struct Leads<'a> {
    client: &'a mut AmoCrmClient,
}

impl<'a> Leads<'a> {
    pub fn new(client: &'a mut AmoCrmClient) -> Self {
        Self { client }
    }

    /// Lista uma página de leads; sem resultados, retorna página vazia
    pub async fn list(&mut self, config: &LeadsConfig) -> Result<LeadsPage> {
        validate_relations(&config.relations, &LEAD_RELATIONS)?;

        let path = Endpoint::Leads.path(self.client.exchanger().provider());
        let pagination = config.pagination();
        let mut query = relation_query(&config.relations);
        query.extend(pagination.iter().map(|(key, value)| (*key, value.as_str())));

        let response = self.client.get(&path, &query, None).await?;
        let page: LeadsPage = decode_json_or_default(response).await?;

        tracing::info!("📋 [AmoCRM] {} leads obtidos", page.leads().len());

        Ok(page)
    }
}
