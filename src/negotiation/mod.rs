//! Acceptヘッダーによるコンテンツネゴシエーション（RFC 9110 §12.5.1）
//!
//! 生のヘッダー値 → セグメント → メディアタイプ指定 → 候補とのマッチ → 優先順の結果、
//! という一方向のパイプラインで処理する。呼び出し間で状態は持たない。

pub mod media_type;
pub mod negotiator;
pub mod preference;
pub mod segment;
pub mod specificity;

pub use media_type::{parse_spec, MediaTypeSpec, DEFAULT_QUALITY, WILDCARD};
pub use negotiator::Negotiator;
pub use preference::{
    accepted_media_types, parse_accept, preferred_media_type, preferred_media_types, sort_by_preference,
};
pub use segment::segment;
pub use specificity::{best_match, specify, PARAMS_MATCH, SUBTYPE_MATCH, TYPE_MATCH};
