use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Links;

/// Conta do usuário autorizado (`GET /api/v4/account`)
///
/// Campos marcados como `Option` só vêm preenchidos quando a relação
/// correspondente é pedida em `with`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub subdomain: String,
    pub created_at: i64,
    pub created_by: i64,
    pub updated_at: i64,
    pub updated_by: i64,
    pub current_user_id: i64,
    pub country: String,
    pub currency: String,
    pub currency_symbol: Option<String>,
    pub customers_mode: String,
    pub is_unsorted_on: bool,
    pub mobile_feature_version: i64,
    pub is_loss_reason_enabled: bool,
    pub is_helpbot_enabled: bool,
    pub is_technical_account: bool,
    pub contact_name_display_order: i64,
    /// Relação `amojo_id`
    pub amojo_id: Option<String>,
    /// Relação `uuid`
    pub uuid: Option<String>,
    /// Relação `version`
    pub version: Option<i64>,
    #[serde(rename = "_links")]
    pub links: Links,
    #[serde(rename = "_embedded")]
    pub embedded: AccountEmbedded,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountEmbedded {
    pub amojo_rights: Option<AmojoRights>,
    pub users_groups: Vec<UsersGroup>,
    pub task_types: Vec<TaskType>,
    pub datetime_settings: Option<DatetimeSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmojoRights {
    pub can_direct: bool,
    pub can_create_groups: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersGroup {
    pub id: i64,
    pub name: String,
    pub uuid: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskType {
    pub id: i64,
    pub name: String,
    pub color: Value,
    pub icon_id: Value,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatetimeSettings {
    pub date_pattern: String,
    pub short_date_pattern: String,
    pub short_time_pattern: String,
    pub date_format: String,
    pub time_format: String,
    pub timezone: String,
    pub timezone_offset: String,
}
