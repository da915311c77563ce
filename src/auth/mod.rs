//! # amoCRM OAuth2 Authentication Module
//!
//! ## Responsabilidades:
//! - Validar o domínio da conta (`{account}.amocrm.{zone}`)
//! - Gerar a URL de consentimento
//! - Trocar authorization code e refresh token por tokens
//! - Representar tokens e detectar expiração
//!
//! ## Estrutura:
//! - `config.rs`: Credenciais da integração
//! - `domain.rs`: Validação do domínio da conta
//! - `grant.rs`: Grants suportados
//! - `token.rs`: Token OAuth2
//! - `client.rs`: Cliente HTTP OAuth2

pub mod client;
pub mod config;
pub mod domain;
pub mod grant;
pub mod token;

pub use client::{random_state, AuthorizationMode, TokenExchanger};
pub use config::Credentials;
pub use domain::Domain;
pub use grant::Grant;
pub use token::{Token, TokenResponse};
