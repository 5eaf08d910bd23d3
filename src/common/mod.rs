//! 共通の設定とユーティリティ

pub mod config;
pub mod utils;

pub use config::NegotiatorConfig;
pub use utils::{eq_fold, is_header_value_valid, validate_header_value};
