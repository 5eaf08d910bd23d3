//! ネゴシエーターの設定（入力サイズの上限）

use serde::{Deserialize, Serialize};
use crate::error::Error;
use super::utils::env_usize;

/// Acceptヘッダーの最大長（バイト）の既定値
pub const DEFAULT_MAX_ACCEPT_LENGTH: usize = 8 * 1024; // 8KB

/// Acceptヘッダーの最大エントリ数の既定値
pub const DEFAULT_MAX_ENTRIES: usize = 64;

/// 最大長を指定する環境変数
pub const ENV_MAX_ACCEPT_LENGTH: &str = "NEGOTIATOR_MAX_ACCEPT_LENGTH";

/// 最大エントリ数を指定する環境変数
pub const ENV_MAX_ENTRIES: &str = "NEGOTIATOR_MAX_ENTRIES";

/// 入力サイズの上限設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiatorConfig {
    /// Acceptヘッダーの最大長（バイト）
    pub max_accept_length: usize,
    /// Acceptヘッダーの最大エントリ数
    pub max_entries: usize,
}

impl Default for NegotiatorConfig {
    fn default() -> Self {
        Self {
            max_accept_length: DEFAULT_MAX_ACCEPT_LENGTH,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl NegotiatorConfig {
    /// 既定値で作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数から読み込む
    /// 優先順位: 環境変数 `NEGOTIATOR_MAX_ACCEPT_LENGTH` / `NEGOTIATOR_MAX_ENTRIES` -> 既定値
    pub fn from_env() -> Self {
        Self {
            max_accept_length: env_usize(ENV_MAX_ACCEPT_LENGTH, DEFAULT_MAX_ACCEPT_LENGTH),
            max_entries: env_usize(ENV_MAX_ENTRIES, DEFAULT_MAX_ENTRIES),
        }
    }

    /// JSON文字列から読み込む（省略したフィールドは既定値）
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::ConfigurationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 最大長を設定
    pub fn with_max_accept_length(mut self, max_accept_length: usize) -> Self {
        self.max_accept_length = max_accept_length;
        self
    }

    /// 最大エントリ数を設定
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// 設定値を検証
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_accept_length == 0 {
            return Err(Error::ConfigurationError("max_accept_length must be greater than 0".into()));
        }
        if self.max_entries == 0 {
            return Err(Error::ConfigurationError("max_entries must be greater than 0".into()));
        }
        Ok(())
    }
}
