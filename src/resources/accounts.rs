use crate::client::AmoCrmClient;
use crate::error::Result;
use crate::models::Account;

use super::{decode_json, relation_query, validate_relations, Endpoint};

pub const WITH_AMOJO_ID: &str = "amojo_id";
pub const WITH_UUID: &str = "uuid";
pub const WITH_AMOJO_RIGHTS: &str = "amojo_rights";
pub const WITH_USERS_GROUPS: &str = "users_groups";
pub const WITH_TASK_TYPES: &str = "task_types";
pub const WITH_VERSION: &str = "version";
pub const WITH_DATETIME_SETTINGS: &str = "datetime_settings";

/// Relações aceitas em `GET /api/v4/account`
pub const ACCOUNT_RELATIONS: [&str; 7] = [
    WITH_AMOJO_ID,
    WITH_UUID,
    WITH_AMOJO_RIGHTS,
    WITH_USERS_GROUPS,
    WITH_TASK_TYPES,
    WITH_VERSION,
    WITH_DATETIME_SETTINGS,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountsConfig {
    pub relations: Vec<String>,
}

impl AccountsConfig {
    pub fn with(mut self, relation: impl Into<String>) -> Self {
        self.relations.push(relation.into());
        self
    }
}

/// Recurso `account`
pub struct Accounts<'a> {
    client: &'a mut AmoCrmClient,
}

impl<'a> Accounts<'a> {
    pub fn new(client: &'a mut AmoCrmClient) -> Self {
        Self { client }
    }

    /// Dados da conta autenticada
    pub async fn current(&mut self, config: &AccountsConfig) -> Result<Account> {
        validate_relations(&config.relations, &ACCOUNT_RELATIONS)?;

        let path = Endpoint::Account.path(self.client.exchanger().provider());
        let query = relation_query(&config.relations);

        let response = self.client.get(&path, &query, None).await?;
        let account: Account = decode_json(response).await?;

        tracing::info!("✅ [AmoCRM] Conta obtida: {} (id: {})", account.name, account.id);

        Ok(account)
    }
}
