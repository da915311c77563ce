pub mod logging;
pub mod string_utils;

pub use string_utils::{mask_secret, truncate_safe};
