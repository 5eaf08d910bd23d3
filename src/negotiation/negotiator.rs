//! 入力サイズの上限を適用するネゴシエーター
//!
//! コア処理は入力サイズに比例して計算量が増えるため、リクエストごとに呼び出す場合は
//! こちらを経由して異常に長いヘッダーを事前に拒否する。

use http::header::ACCEPT;
use http::HeaderMap;
use log::debug;
use crate::common::config::NegotiatorConfig;
use crate::common::utils::validate_header_value;
use crate::error::Error;
use super::media_type::MediaTypeSpec;
use super::preference::{parse_segments, resolve, ACCEPT_ANY};
use super::segment::segment;

/// 上限付きのコンテンツネゴシエーター
#[derive(Debug, Clone, Default)]
pub struct Negotiator {
    config: NegotiatorConfig,
}

impl Negotiator {
    /// 設定を指定して作成
    ///
    /// # Errors
    ///
    /// 設定値が不正（上限が0）の場合は `ConfigurationError` を返す。
    pub fn new(config: NegotiatorConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 環境変数の設定で作成（不正な値は既定値に置き換えられるため常に有効）
    pub fn from_env() -> Self {
        Self {
            config: NegotiatorConfig::from_env(),
        }
    }

    /// 現在の設定を取得
    pub fn config(&self) -> &NegotiatorConfig {
        &self.config
    }

    /// 上限を検査したうえで優先順のメディアタイプを返す
    ///
    /// # Errors
    ///
    /// ヘッダーが長すぎる場合は `HeaderTooLarge`、制御文字を含む場合は `InvalidHeader`、
    /// エントリ数が多すぎる場合は `TooManyEntries` を返す。
    pub fn negotiate<S: AsRef<str>>(&self, accept: &str, candidates: &[S]) -> Result<Vec<String>, Error> {
        let specs = self.parse_accept(accept)?;
        Ok(resolve(specs, candidates))
    }

    /// 上限を検査したうえでAcceptヘッダーをメディアタイプ指定の一覧にパースする
    ///
    /// # Errors
    ///
    /// `negotiate` と同じ。
    pub fn parse_accept(&self, accept: &str) -> Result<Vec<MediaTypeSpec>, Error> {
        if accept.len() > self.config.max_accept_length {
            debug!(
                "Rejecting Accept header of {} bytes (limit {})",
                accept.len(),
                self.config.max_accept_length
            );
            return Err(Error::HeaderTooLarge {
                length: accept.len(),
                limit: self.config.max_accept_length,
            });
        }
        validate_header_value(accept)?;

        let accept = if accept.is_empty() { ACCEPT_ANY } else { accept };
        let segments = segment(accept);
        if segments.len() > self.config.max_entries {
            debug!(
                "Rejecting Accept header with {} entries (limit {})",
                segments.len(),
                self.config.max_entries
            );
            return Err(Error::TooManyEntries {
                count: segments.len(),
                limit: self.config.max_entries,
            });
        }

        Ok(parse_segments(&segments))
    }

    /// 最も優先される候補を1つ返す
    ///
    /// # Errors
    ///
    /// `negotiate` のエラーに加え、受け入れ可能な候補がない場合は `NotAcceptable` を返す。
    pub fn select<S: AsRef<str>>(&self, accept: &str, candidates: &[S]) -> Result<String, Error> {
        self.negotiate(accept, candidates)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotAcceptable(format!("no candidate matches {:?}", accept)))
    }

    /// パース済みのヘッダーマップからAcceptヘッダーを取り出してネゴシエーションする
    ///
    /// 複数のAcceptフィールドは `", "` で連結して1つのリストとして扱う。
    /// Acceptフィールドがない場合は空（`*/*`）として扱う。
    ///
    /// # Errors
    ///
    /// 可視ASCII以外を含む値は `InvalidHeader`。その他は `negotiate` と同じ。
    pub fn negotiate_headers<S: AsRef<str>>(&self, headers: &HeaderMap, candidates: &[S]) -> Result<Vec<String>, Error> {
        let values = headers
            .get_all(ACCEPT)
            .iter()
            .map(|value| {
                value
                    .to_str()
                    .map_err(|e| Error::InvalidHeader(format!("Accept header is not visible ASCII: {}", e)))
            })
            .collect::<Result<Vec<&str>, Error>>()?;

        self.negotiate(&values.join(", "), candidates)
    }
}
