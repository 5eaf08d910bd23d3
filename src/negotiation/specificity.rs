//! 候補とAccept指定のマッチングと具体性スコアの計算

use crate::common::utils::eq_fold;
use super::media_type::{parse_spec, MediaTypeSpec, WILDCARD};

/// タイプが完全一致
pub const TYPE_MATCH: u8 = 0b100;
/// サブタイプが完全一致
pub const SUBTYPE_MATCH: u8 = 0b010;
/// 宣言されたパラメータがすべて一致
pub const PARAMS_MATCH: u8 = 0b001;

/// 候補のメディアタイプが指定にマッチするか判定し、具体性スコアを付けたコピーを返す
///
/// 返り値の `source_index` は候補側の位置 `candidate_index` になる。
/// ワイルドカードより完全一致、修飾が少ないものより多いものが高いスコアになる。
pub fn specify(candidate: &str, spec: &MediaTypeSpec, candidate_index: usize) -> Option<MediaTypeSpec> {
    let parsed = parse_spec(candidate, 0)?;
    let mut score = 0;

    if eq_fold(&spec.media_type, &parsed.media_type) {
        score |= TYPE_MATCH;
    } else if !spec.is_wildcard_type() {
        return None;
    }

    if eq_fold(&spec.subtype, &parsed.subtype) {
        score |= SUBTYPE_MATCH;
    } else if !spec.is_wildcard_subtype() {
        return None;
    }

    for (key, value) in &spec.parameters {
        // 候補にないキーは空文字列の値として比較する
        let matched = value == WILDCARD || eq_fold(value, parsed.param(key).unwrap_or(""));
        if !matched {
            return None;
        }
        score |= PARAMS_MATCH;
    }

    Some(MediaTypeSpec {
        source_index: candidate_index,
        specificity: score,
        ..spec.clone()
    })
}

/// 全指定の中から候補に最もよくマッチするものを選ぶ
///
/// 具体性スコアが高いものを優先し、同点なら品質値が高いもの、それも同じなら先に現れたもの。
pub fn best_match(candidate: &str, specs: &[MediaTypeSpec], candidate_index: usize) -> Option<MediaTypeSpec> {
    let mut best: Option<MediaTypeSpec> = None;

    for spec in specs {
        let Some(matched) = specify(candidate, spec, candidate_index) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some(current) => {
                matched.specificity > current.specificity
                    || (matched.specificity == current.specificity && matched.quality > current.quality)
            }
        };
        if better {
            best = Some(matched);
        }
    }

    best
}
