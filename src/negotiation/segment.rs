//! Acceptヘッダーのセグメント分割

/// Acceptヘッダー値をカンマ区切りのエントリに分割する
///
/// ダブルクォートで囲まれたパラメータ値の中のカンマは区切りとして扱わない。
/// クォートが閉じられないまま入力が終わった場合も、残りを最後のセグメントとして返す。
/// 各セグメントは前後の空白を除去し、空のセグメントは返さない。
pub fn segment(header: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, c) in header.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                push_trimmed(&mut parts, &header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    // クォートの対応に関わらず残りは最後のセグメント
    push_trimmed(&mut parts, &header[start..]);
    parts
}

fn push_trimmed(parts: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}
