use serde::{Deserialize, Serialize};
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};

use crate::auth::Credentials;

/// Configuração do binário `amocrm`
///
/// Fontes, em ordem de precedência crescente: `config/default`,
/// `config/{RUN_MODE}` e variáveis `AMOCRM_*` (o `.env` é carregado antes
/// via dotenvy).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Domínio da conta, ex.: `example.amocrm.ru`
    #[serde(default)]
    pub domain: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("AMOCRM"));

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.client_id, &self.client_secret, &self.redirect_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_settings_from_toml() {
        let builder = Config::builder().add_source(File::from_str(
            r#"
                client_id = "id"
                client_secret = "secret"
                redirect_uri = "https://example.com/callback"
                domain = "example.amocrm.ru"
            "#,
            FileFormat::Toml,
        ));

        let settings = Settings::from_builder(builder).unwrap();
        assert_eq!(settings.domain.as_deref(), Some("example.amocrm.ru"));

        let credentials = settings.credentials();
        assert_eq!(credentials.client_id, "id");
        assert_eq!(credentials.redirect_uri, "https://example.com/callback");
    }

    #[test]
    fn test_settings_missing_secret() {
        let builder = Config::builder().add_source(File::from_str(
            r#"client_id = "id""#,
            FileFormat::Toml,
        ));

        assert!(Settings::from_builder(builder).is_err());
    }
}
