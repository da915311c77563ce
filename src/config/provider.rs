//! Tabela de constantes do provedor
//!
//! Tudo o que é específico do amoCRM: zonas, URL de autorização, versão da
//! API, scheme e porta das URLs da conta.

use std::time::Duration;

/// Identificador enviado em `User-Agent` em todas as requisições
pub const USER_AGENT: &str = "amocrm-rs";

/// Timeout fixo por requisição
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Limite de leitura do corpo da resposta do endpoint de token (1 MiB)
pub const MAX_TOKEN_RESPONSE_BYTES: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Label do meio no domínio da conta (`{account}.amocrm.{zone}`)
    pub name: String,
    /// Zonas aceitas como último label
    pub zones: Vec<String>,
    /// Página de consentimento OAuth2
    pub authorize_url: String,
    pub api_version: u8,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub scheme: String,
    /// Porta explícita para as URLs da conta (apenas para servidores mock)
    pub port: Option<u16>,
}

impl Provider {
    /// Tabela do amoCRM em produção
    pub fn amocrm() -> Self {
        Self {
            name: "amocrm".to_string(),
            zones: vec!["ru".to_string(), "com".to_string()],
            authorize_url: "https://www.amocrm.ru/oauth".to_string(),
            api_version: 4,
            user_agent: USER_AGENT.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            scheme: "https".to_string(),
            port: None,
        }
    }

    pub fn has_zone(&self, zone: &str) -> bool {
        self.zones.iter().any(|z| z == zone)
    }

    /// Caminho versionado de um recurso, ex.: `/api/v4/leads`
    pub fn api_path(&self, resource: &str) -> String {
        format!("/api/v{}/{}", self.api_version, resource)
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::amocrm()
    }
}
