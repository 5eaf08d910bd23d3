//! メディアタイプ指定（Acceptヘッダーの1エントリ）の型とパーサー

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use log::debug;
use serde::Serialize;
use crate::common::utils::eq_fold;
use crate::error::Error;

/// ワイルドカードトークン
pub const WILDCARD: &str = "*";

/// 品質値のパラメータ名
const QUALITY_KEY: &str = "q";

/// 品質値の既定値
pub const DEFAULT_QUALITY: f64 = 1.0;

/// Acceptヘッダーの1エントリ、または候補のメディアタイプ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaTypeSpec {
    /// タイプ（`*` の場合あり）
    #[serde(rename = "type")]
    pub media_type: String,
    /// サブタイプ（`*` の場合あり）
    pub subtype: String,
    /// `q` 以外のパラメータ
    pub parameters: BTreeMap<String, String>,
    /// 品質値。0以下はクライアントによる明示的な拒否
    pub quality: f64,
    /// 元の並び順（同点時の順序付けにのみ使用）
    pub source_index: usize,
    /// マッチング時に計算される具体性スコア
    pub specificity: u8,
}

impl MediaTypeSpec {
    /// `type/subtype` から新しい指定を作成
    pub fn new(media_type: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            subtype: subtype.into(),
            parameters: BTreeMap::new(),
            quality: DEFAULT_QUALITY,
            source_index: 0,
            specificity: 0,
        }
    }

    /// パラメータを追加
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// 品質値を設定
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    /// `type/subtype` 形式の文字列を取得
    pub fn full_type(&self) -> String {
        format!("{}/{}", self.media_type, self.subtype)
    }

    /// パラメータ値を大文字小文字を区別せずに取得
    pub fn param(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| eq_fold(k, key))
            .map(|(_, v)| v.as_str())
    }

    /// クライアントに拒否されているか（q <= 0、またはNaN）
    pub fn is_rejected(&self) -> bool {
        !(self.quality > 0.0)
    }

    /// タイプがワイルドカードか
    pub fn is_wildcard_type(&self) -> bool {
        self.media_type == WILDCARD
    }

    /// サブタイプがワイルドカードか
    pub fn is_wildcard_subtype(&self) -> bool {
        self.subtype == WILDCARD
    }
}

impl fmt::Display for MediaTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.media_type, self.subtype)?;
        for (key, value) in &self.parameters {
            write!(f, ";{}={}", key, value)?;
        }
        if self.quality != DEFAULT_QUALITY {
            write!(f, ";q={}", self.quality)?;
        }
        Ok(())
    }
}

impl FromStr for MediaTypeSpec {
    type Err = Error;

    /// 厳密なパース。`/` がない、またはタイプ・サブタイプが空ならエラー
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = parse_spec(s.trim(), 0)
            .ok_or_else(|| Error::InvalidMediaType(format!("missing '/' in {:?}", s)))?;
        if spec.media_type.is_empty() || spec.subtype.is_empty() {
            return Err(Error::InvalidMediaType(format!("empty type or subtype in {:?}", s)));
        }
        Ok(spec)
    }
}

/// セグメントを1つのメディアタイプ指定にパースする
///
/// `type/subtype` の区切りがない場合は `None` を返す（呼び出し側で破棄する）。
/// `q` の値が数値として読めない場合は既定の品質値のまま扱う。
pub fn parse_spec(segment: &str, index: usize) -> Option<MediaTypeSpec> {
    let mut parts = segment.split(';');
    let base = parts.next().unwrap_or("");

    let (media_type, subtype) = base.split_once('/')?;
    let mut spec = MediaTypeSpec::new(media_type.trim(), subtype.trim());
    spec.source_index = index;

    for part in parts {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key == QUALITY_KEY {
            match value.parse::<f64>() {
                Ok(q) => spec.quality = q,
                Err(_) => debug!("Ignoring unparseable quality value {:?} in {:?}", value, segment),
            }
        } else {
            spec.parameters.insert(key.to_string(), value.to_string());
        }
    }

    Some(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec_empty() {
        assert!(parse_spec("", 0).is_none());
        assert!(parse_spec("texthtml", 0).is_none());
    }

    #[test]
    fn test_parse_spec_basic() {
        let spec = parse_spec("text/html", 3).unwrap();
        assert_eq!(spec.media_type, "text");
        assert_eq!(spec.subtype, "html");
        assert_eq!(spec.quality, 1.0);
        assert_eq!(spec.source_index, 3);
        assert!(spec.parameters.is_empty());
    }

    #[test]
    fn test_parse_spec_quality_and_params() {
        let spec = parse_spec("text/html ; level = 1; q=0.8", 0).unwrap();
        assert_eq!(spec.quality, 0.8);
        assert_eq!(spec.parameters.len(), 1);
        assert_eq!(spec.param("level"), Some("1"));
        assert_eq!(spec.param("LEVEL"), Some("1"));
    }

    #[test]
    fn test_parse_spec_bad_quality_keeps_default() {
        let spec = parse_spec("text/html;q=abc", 0).unwrap();
        assert_eq!(spec.quality, 1.0);
    }

    #[test]
    fn test_parse_spec_quality_not_clamped() {
        assert_eq!(parse_spec("a/b;q=2.5", 0).unwrap().quality, 2.5);
        assert_eq!(parse_spec("a/b;q=-1", 0).unwrap().quality, -1.0);
    }

    #[test]
    fn test_parse_spec_uppercase_q_is_a_parameter() {
        let spec = parse_spec("text/html;Q=0.5", 0).unwrap();
        assert_eq!(spec.quality, 1.0);
        assert_eq!(spec.parameters.get("Q"), Some(&"0.5".to_string()));
    }

    #[test]
    fn test_parse_spec_tokens_without_equals_are_ignored() {
        let spec = parse_spec("text/html;charset;q=0.3", 0).unwrap();
        assert!(spec.parameters.is_empty());
        assert_eq!(spec.quality, 0.3);
    }

    #[test]
    fn test_parse_spec_splits_on_first_slash_and_equals() {
        let spec = parse_spec("application/vnd.a/b;x=y=z", 0).unwrap();
        assert_eq!(spec.subtype, "vnd.a/b");
        assert_eq!(spec.param("x"), Some("y=z"));
    }

    #[test]
    fn test_is_rejected() {
        assert!(MediaTypeSpec::new("a", "b").with_quality(0.0).is_rejected());
        assert!(MediaTypeSpec::new("a", "b").with_quality(-0.5).is_rejected());
        assert!(MediaTypeSpec::new("a", "b").with_quality(f64::NAN).is_rejected());
        assert!(!MediaTypeSpec::new("a", "b").with_quality(0.001).is_rejected());
    }

    #[test]
    fn test_display() {
        let spec = MediaTypeSpec::new("text", "html")
            .with_param("level", "1")
            .with_param("charset", "utf-8")
            .with_quality(0.5);
        assert_eq!(spec.to_string(), "text/html;charset=utf-8;level=1;q=0.5");
        assert_eq!(MediaTypeSpec::new("*", "*").to_string(), "*/*");
    }

    #[test]
    fn test_from_str() {
        let spec: MediaTypeSpec = " application/json; charset=utf-8 ".parse().unwrap();
        assert_eq!(spec.full_type(), "application/json");
        assert_eq!(spec.param("charset"), Some("utf-8"));

        assert!(matches!("json".parse::<MediaTypeSpec>(), Err(Error::InvalidMediaType(_))));
        assert!(matches!("/json".parse::<MediaTypeSpec>(), Err(Error::InvalidMediaType(_))));
        assert!(matches!("text/".parse::<MediaTypeSpec>(), Err(Error::InvalidMediaType(_))));
    }

    #[test]
    fn test_serialize() {
        let spec = parse_spec("text/html;level=1;q=0.5", 2).unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["subtype"], "html");
        assert_eq!(json["parameters"]["level"], "1");
        assert_eq!(json["quality"], 0.5);
        assert_eq!(json["source_index"], 2);
    }
}
