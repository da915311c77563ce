//! DTOs das entidades do amoCRM

pub mod account;
pub mod lead;

pub use account::Account;
pub use lead::{Lead, LeadsPage};

use serde::{Deserialize, Serialize};

/// Bloco `_links` presente em quase todas as respostas HAL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default)]
    pub self_link: Option<Href>,
    #[serde(default)]
    pub next: Option<Href>,
    #[serde(default)]
    pub prev: Option<Href>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Href {
    pub href: String,
}
