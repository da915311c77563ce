// Cliente da API v4 do amoCRM
// OAuth2 (authorization code + refresh token) e pipeline de requisições autenticadas

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resources;
pub mod utils;

pub use auth::{random_state, AuthorizationMode, Credentials, Domain, Grant, Token, TokenExchanger};
pub use client::{AmoCrmClient, SharedClient};
pub use config::{Provider, Settings};
pub use error::{AmoCrmError, Result};
