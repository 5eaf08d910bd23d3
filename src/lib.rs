//! mediatype-negotiator: Acceptヘッダーによるコンテンツネゴシエーション
//!
//! クライアントが送る重み付きのメディアタイプ一覧（Acceptヘッダー値）と、
//! サーバーが返せる表現の一覧から、返すべき表現をクライアントの優先順に決定する。
//!
//! コア処理は状態を持たない純粋関数で、不正な入力は失敗させずに捨てる。
//! 入力サイズの上限が必要な場合は [`Negotiator`] を使う。
//!
//! ```
//! use negotiator::{preferred_media_types, Negotiator};
//!
//! let accept = "text/html, application/*;q=0.2, image/jpeg;q=0.8";
//! let types = preferred_media_types(accept, &["text/html", "text/plain", "application/json"]);
//! assert_eq!(types, vec!["text/html", "application/json"]);
//!
//! let negotiator = Negotiator::default();
//! assert_eq!(negotiator.select(accept, &["application/json"]).unwrap(), "application/json");
//! ```

pub mod common;
pub mod error;
pub mod negotiation;

pub use common::NegotiatorConfig;
pub use error::Error;
pub use negotiation::{
    accepted_media_types, parse_accept, preferred_media_type, preferred_media_types, MediaTypeSpec, Negotiator,
};
