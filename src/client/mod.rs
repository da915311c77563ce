//! Pipeline de requisições autenticadas

pub mod api;
pub mod shared;

pub use api::AmoCrmClient;
pub use shared::SharedClient;
