//! クライアントの優先順位に従った並べ替えと結果の生成

use std::cmp::Ordering;
use log::debug;
use super::media_type::{parse_spec, MediaTypeSpec};
use super::segment::segment;
use super::specificity::best_match;

/// Acceptヘッダーが空のときに使う値
pub(crate) const ACCEPT_ANY: &str = "*/*";

/// 優先順位に従って受け入れ可能なメディアタイプを返す
///
/// `candidates` が空の場合は、Acceptヘッダーに含まれる（拒否されていない）
/// メディアタイプをすべて `type/subtype` 形式で返す。
/// 候補が与えられた場合は、クライアントが受け入れる候補のみを優先順に返す。
/// 品質値が同じなら具体性の高いもの、それも同じなら元の並び順を維持する。
///
/// # Examples
///
/// ```
/// use negotiator::preferred_media_types;
///
/// let types = preferred_media_types("text/html, application/json", &["application/json", "text/html"]);
/// assert_eq!(types, vec!["application/json", "text/html"]);
///
/// let types = preferred_media_types("text/html;q=0.2, application/json;q=0.8", &["text/html", "application/json"]);
/// assert_eq!(types, vec!["application/json", "text/html"]);
///
/// let types = preferred_media_types("application/json;q=0", &["application/json"]);
/// assert!(types.is_empty());
/// ```
pub fn preferred_media_types<S: AsRef<str>>(accept: &str, candidates: &[S]) -> Vec<String> {
    resolve(parse_accept(accept), candidates)
}

/// 候補なしでAcceptヘッダーのメディアタイプを優先順に返す
///
/// ```
/// use negotiator::accepted_media_types;
///
/// let types = accepted_media_types("text/html, application/*;q=0.2, image/jpeg;q=0.8");
/// assert_eq!(types, vec!["text/html", "image/jpeg", "application/*"]);
/// ```
pub fn accepted_media_types(accept: &str) -> Vec<String> {
    preferred_media_types::<&str>(accept, &[])
}

/// 最も優先される候補を1つだけ返す
pub fn preferred_media_type<S: AsRef<str>>(accept: &str, candidates: &[S]) -> Option<String> {
    preferred_media_types(accept, candidates).into_iter().next()
}

/// Acceptヘッダーをパースしてメディアタイプ指定の一覧を返す
///
/// 空のヘッダーは `*/*` として扱う。パースできないエントリは捨てる。
/// 空白だけのヘッダーは空ではなく、有効なエントリのない値として扱う。
pub fn parse_accept(accept: &str) -> Vec<MediaTypeSpec> {
    let accept = if accept.is_empty() { ACCEPT_ANY } else { accept };
    parse_segments(&segment(accept))
}

/// 分割済みのセグメントをメディアタイプ指定に変換する
pub(crate) fn parse_segments(segments: &[String]) -> Vec<MediaTypeSpec> {
    segments
        .iter()
        .enumerate()
        .filter_map(|(i, s)| {
            let spec = parse_spec(s, i);
            if spec.is_none() {
                debug!("Dropping malformed Accept entry {:?}", s);
            }
            spec
        })
        .collect()
}

/// パース済みの指定と候補から結果を生成する
pub(crate) fn resolve<S: AsRef<str>>(mut specs: Vec<MediaTypeSpec>, candidates: &[S]) -> Vec<String> {
    if candidates.is_empty() {
        sort_by_preference(&mut specs);
        return specs
            .iter()
            .filter(|spec| !spec.is_rejected())
            .map(MediaTypeSpec::full_type)
            .collect();
    }

    let mut matches: Vec<MediaTypeSpec> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, candidate)| best_match(candidate.as_ref(), &specs, i))
        .collect();
    sort_by_preference(&mut matches);

    matches
        .iter()
        .filter(|matched| !matched.is_rejected())
        .map(|matched| candidates[matched.source_index].as_ref().to_string())
        .collect()
}

/// 品質値の降順、具体性の降順、元の位置の昇順で安定ソートする
pub fn sort_by_preference(specs: &mut [MediaTypeSpec]) {
    specs.sort_by(compare_preference);
}

fn compare_preference(a: &MediaTypeSpec, b: &MediaTypeSpec) -> Ordering {
    b.quality
        .total_cmp(&a.quality)
        .then_with(|| b.specificity.cmp(&a.specificity))
        .then_with(|| a.source_index.cmp(&b.source_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accept_empty_is_wildcard() {
        let specs = parse_accept("");
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].full_type(), "*/*");

    }

    #[test]
    fn test_parse_accept_whitespace_only_has_no_specs() {
        assert!(parse_accept("   ").is_empty());
        assert!(preferred_media_types("   ", &["application/json"]).is_empty());
        assert!(accepted_media_types(" \t ").is_empty());
    }

    #[test]
    fn test_parse_accept_drops_malformed() {
        let specs = parse_accept("text/html, garbage, application/json");
        assert_eq!(specs.len(), 2);
        // 元の位置は捨てたエントリも含めて数える
        assert_eq!(specs[0].source_index, 0);
        assert_eq!(specs[1].source_index, 2);
    }

    #[test]
    fn test_sort_by_preference() {
        let mut specs = parse_accept("a/a;q=0.5, b/b, c/c;q=0.5, d/d");
        specs[2].specificity = 3;
        sort_by_preference(&mut specs);
        let order: Vec<String> = specs.iter().map(MediaTypeSpec::full_type).collect();
        assert_eq!(order, vec!["b/b", "d/d", "c/c", "a/a"]);
    }

    #[test]
    fn test_resolve_excludes_rejected_without_candidates() {
        let types = resolve::<&str>(parse_accept("text/html, application/json;q=0, */*;q=0.1"), &[]);
        assert_eq!(types, vec!["text/html", "*/*"]);
    }

    #[test]
    fn test_resolve_rejection_wins_over_wildcard() {
        // 最も具体的な指定がq=0なら、ワイルドカードで許可されていても除外
        let types = resolve(parse_accept("application/json;q=0, */*"), &["application/json", "text/html"]);
        assert_eq!(types, vec!["text/html"]);
    }

    #[test]
    fn test_preferred_media_type() {
        assert_eq!(
            preferred_media_type("text/html;q=0.5, application/json", &["text/html", "application/json"]),
            Some("application/json".to_string())
        );
        assert_eq!(preferred_media_type("image/png", &["text/html"]), None);
    }
}
