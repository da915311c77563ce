#![allow(dead_code)]

use std::time::Duration;

use amocrm::{AmoCrmClient, Credentials, Provider, TokenExchanger};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const DOMAIN: &str = "test.amocrm.ru";

pub fn credentials() -> Credentials {
    Credentials::new("client_id", "client_secret", "https://example.com/callback")
}

/// Tabela do provedor apontando para o servidor mock
pub fn provider(server: &MockServer) -> Provider {
    Provider {
        scheme: "http".to_string(),
        port: Some(server.address().port()),
        ..Provider::amocrm()
    }
}

/// `reqwest::Client` que resolve o domínio da conta para o servidor mock
pub fn http_client(server: &MockServer) -> reqwest::Client {
    reqwest::Client::builder()
        .resolve(DOMAIN, *server.address())
        .build()
        .unwrap()
}

pub fn exchanger(server: &MockServer) -> TokenExchanger {
    exchanger_with(server, provider(server))
}

pub fn exchanger_with(server: &MockServer, provider: Provider) -> TokenExchanger {
    let mut exchanger = TokenExchanger::with_http_client(credentials(), provider, http_client(server));
    exchanger.set_domain(DOMAIN).unwrap();
    exchanger
}

pub fn client(server: &MockServer) -> AmoCrmClient {
    client_with(server, provider(server))
}

pub fn client_with(server: &MockServer, provider: Provider) -> AmoCrmClient {
    let mut client = AmoCrmClient::with_http_client(credentials(), provider, http_client(server));
    client.set_domain(DOMAIN).unwrap();
    client
}

/// Tabela com timeout curto, para testar respostas lentas
pub fn slow_provider(server: &MockServer) -> Provider {
    Provider {
        request_timeout: Duration::from_millis(200),
        ..provider(server)
    }
}

pub fn token_body(access_token: &str, refresh_token: &str, expires_in: i64) -> Value {
    json!({
        "token_type": "Bearer",
        "expires_in": expires_in,
        "access_token": access_token,
        "refresh_token": refresh_token
    })
}

/// Campos do formulário `application/x-www-form-urlencoded`
pub fn form_fields(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body).into_owned().collect()
}
