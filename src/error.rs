//! エラー型の定義
//!
//! ネゴシエーションのコア処理は失敗しない（不正な入力は黙って捨てる）ため、
//! ここで定義するエラーは外側のAPI（厳密なパース、入力サイズ制限、設定）でのみ使われる。

use thiserror::Error;

/// アプリケーションのエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// メディアタイプとして解釈できない文字列
    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    /// 制御文字などを含む不正なヘッダー値
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// ヘッダー値が長すぎる
    #[error("Accept header too large: {length} bytes (limit {limit})")]
    HeaderTooLarge { length: usize, limit: usize },

    /// ヘッダーのエントリ数が多すぎる
    #[error("Too many Accept entries: {count} (limit {limit})")]
    TooManyEntries { count: usize, limit: usize },

    /// 受け入れ可能な候補が一つもない
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 結果のシリアライズエラー
    #[error("Failed to serialize output: {0}")]
    SerializationError(String),
}

impl Error {
    /// エラーからHTTPステータスコードを取得
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidMediaType(_) => 400,
            Error::InvalidHeader(_) => 400,
            Error::HeaderTooLarge { .. } => 431,
            Error::TooManyEntries { .. } => 400,
            Error::NotAcceptable(_) => 406,
            Error::ConfigurationError(_) => 500,
            Error::SerializationError(_) => 500,
        }
    }
}
