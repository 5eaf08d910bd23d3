//! 共通ユーティリティ関数群（文字列比較、ヘッダー値の検証、環境変数の読み込み 等）

use std::env;
use log::warn;
use crate::error::Error;

/// 大文字小文字を区別せずに文字列を比較する（Unicodeの小文字化で比較）
pub fn eq_fold(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// ヘッダー値に使用可能な文字かを判定（CRLF・制御文字を拒否）
pub fn is_header_value_valid(value: &str) -> bool {
    // RFC的にはobs-text等もありうるが、ここでは保守的に制御文字(0x00-0x1F, 0x7F)を拒否する
    // タブはフィールド値の空白として許容
    value.chars().all(|c| {
        let code = c as u32;
        c == '\t' || (code >= 0x20 && code != 0x7F)
    })
}

/// ヘルパー: 無効なヘッダー値ならErrorを返す
pub fn validate_header_value(value: &str) -> Result<(), Error> {
    if is_header_value_valid(value) {
        Ok(())
    } else {
        Err(Error::InvalidHeader("header value contains control/CRLF characters".into()))
    }
}

/// 環境変数から正の整数を読み込む
///
/// 未設定なら既定値、数値として読めない・0の場合は警告を出して既定値を返す。
pub fn env_usize(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(v) if v > 0 => v,
            _ => {
                warn!("Ignoring invalid value {:?} for {}, using default {}", raw, key, default);
                default
            }
        },
        Err(_) => default,
    }
}
