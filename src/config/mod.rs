pub mod provider;
pub mod settings;

pub use provider::Provider;
pub use settings::Settings;
