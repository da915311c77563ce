//! OAuth2 Configuration
//!
//! Credenciais da integração registradas no amoCRM

use serde::{Deserialize, Serialize};

/// Credenciais da integração; definidas uma vez na construção do cliente
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// ID da integração
    pub client_id: String,

    /// Chave secreta da integração
    pub client_secret: String,

    /// URL de redirecionamento registrada na integração
    pub redirect_uri: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}
