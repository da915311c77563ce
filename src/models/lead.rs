use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Links;

/// Página de `GET /api/v4/leads`
///
/// O amoCRM responde `204 No Content` quando não há leads; nesse caso a
/// página fica vazia (`LeadsPage::default()`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadsPage {
    #[serde(rename = "_page")]
    pub page: Option<u32>,
    #[serde(rename = "_links")]
    pub links: Links,
    #[serde(rename = "_embedded")]
    pub embedded: LeadsEmbedded,
}

impl LeadsPage {
    pub fn leads(&self) -> &[Lead] {
        &self.embedded.leads
    }

    pub fn has_next(&self) -> bool {
        self.links.next.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadsEmbedded {
    pub leads: Vec<Lead>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub price: Option<i64>,
    pub responsible_user_id: i64,
    pub group_id: i64,
    pub status_id: i64,
    pub pipeline_id: i64,
    pub loss_reason_id: Option<i64>,
    /// Relação `source_id`
    pub source_id: Option<i64>,
    pub created_by: i64,
    pub updated_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub closed_at: Option<i64>,
    pub closest_task_at: Option<i64>,
    pub is_deleted: bool,
    /// Relação `is_price_modified_by_robot`
    pub is_price_modified_by_robot: Option<bool>,
    pub custom_fields_values: Option<Vec<CustomFieldValues>>,
    pub score: Option<i64>,
    pub account_id: i64,
    #[serde(rename = "_links")]
    pub links: Links,
    #[serde(rename = "_embedded")]
    pub embedded: LeadEmbedded,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFieldValues {
    pub field_id: i64,
    pub field_name: String,
    pub field_code: Option<String>,
    pub field_type: String,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadEmbedded {
    pub tags: Vec<Tag>,
    pub companies: Vec<EntityRef>,
    /// Relação `contacts`
    pub contacts: Vec<EntityRef>,
    /// Relação `loss_reason`
    pub loss_reason: Vec<LossReason>,
    /// Relação `catalog_elements`
    pub catalog_elements: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

/// Referência a outra entidade (contato, empresa)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRef {
    pub id: i64,
    pub is_main: Option<bool>,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossReason {
    pub id: i64,
    pub name: String,
}
