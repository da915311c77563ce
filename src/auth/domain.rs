//! Domínio da conta amoCRM (`{account}.amocrm.{zone}`)

use std::fmt;
use std::str::FromStr;

use crate::config::Provider;
use crate::error::{AmoCrmError, Result};

/// Tamanho máximo de um label DNS
const MAX_ACCOUNT_LEN: usize = 63;

/// Label reservado que nunca identifica uma conta
const RESERVED_ACCOUNT: &str = "www";

/// Domínio validado de uma conta
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain {
    account: String,
    provider: String,
    zone: String,
}

impl Domain {
    /// Valida o domínio contra a tabela padrão do amoCRM
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &Provider::amocrm())
    }

    pub fn parse_with(input: &str, provider: &Provider) -> Result<Self> {
        let invalid = || AmoCrmError::InvalidDomain(input.to_string());

        if input.is_empty() {
            return Err(invalid());
        }

        let labels: Vec<&str> = input.split('.').collect();
        let [account, name, zone] = labels.as_slice() else {
            return Err(invalid());
        };

        if account.is_empty()
            || *account == RESERVED_ACCOUNT
            || account.len() > MAX_ACCOUNT_LEN
            || *name != provider.name
            || !provider.has_zone(zone)
        {
            return Err(invalid());
        }

        Ok(Self {
            account: account.to_string(),
            provider: name.to_string(),
            zone: zone.to_string(),
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.account, self.provider, self.zone)
    }
}

impl FromStr for Domain {
    type Err = AmoCrmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
