use once_cell::sync::Lazy;
use regex::Regex;

use crate::generator::Style;

pub const RESPONSE_COUNT: usize = 3;

const MIN_RESPONSE_CHARS: usize = 5;
const MIN_LINE_CHARS: usize = 10;
const MIN_SENTENCE_CHARS: usize = 15;

static NUMBERING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+[\.\)：:\s]").expect("valid numbering regex"));
static LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[回应答案ABC]+[\s：:]").expect("valid label regex"));
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\-\*\+]\s").expect("valid bullet regex"));
static UNDEFINED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)undefined").expect("valid sentinel regex"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

fn char_count(text: &str) -> usize {
    text.chars().count()
}

pub fn placeholder_response(style: Style, index: usize) -> String {
    format!("{}回应{}：请重新生成", style.label(), index + 1)
}

// Turns a raw completion into exactly RESPONSE_COUNT clean strings, no
// matter what the model sent back. Cascade: newline split, then sentence
// split, then the whole blob, then cosmetic padding.
pub fn parse_comebacks(raw: &str, style: Style) -> Vec<String> {
    let clean_content = raw.trim();

    let mut responses: Vec<String> = clean_content
        .split('\n')
        .map(str::trim)
        .filter(|line| char_count(line) > MIN_RESPONSE_CHARS)
        .filter(|line| !NUMBERING_RE.is_match(line))
        .filter(|line| !LABEL_RE.is_match(line))
        .filter(|line| !BULLET_RE.is_match(line))
        .filter(|line| char_count(line) > MIN_LINE_CHARS)
        .take(RESPONSE_COUNT)
        .map(str::to_string)
        .collect();

    if responses.len() < 2 {
        responses = clean_content
            .split(['。', '！', '？'])
            .map(str::trim)
            .filter(|sentence| char_count(sentence) > MIN_SENTENCE_CHARS)
            .filter(|sentence| !NUMBERING_RE.is_match(sentence))
            .filter(|sentence| !LABEL_RE.is_match(sentence))
            .map(|sentence| {
                if sentence.ends_with(['。', '！', '？']) {
                    sentence.to_string()
                } else {
                    format!("{sentence}。")
                }
            })
            .take(RESPONSE_COUNT)
            .collect();
    }

    if responses.is_empty() && !clean_content.is_empty() {
        responses.push(clean_content.to_string());
    }

    if responses.is_empty() {
        for index in 0..RESPONSE_COUNT {
            responses.push(placeholder_response(style, index));
        }
    }

    while responses.len() < RESPONSE_COUNT {
        let base = responses[responses.len() - 1].clone();
        let variant = match responses.len() {
            1 => base
                .strip_suffix('。')
                .map(|stem| format!("{stem}！"))
                .unwrap_or_else(|| base.clone()),
            2 => base.replacen('你', "您", 1),
            _ => format!("{base}（换个说法）"),
        };
        responses.push(variant);
    }

    responses.truncate(RESPONSE_COUNT);
    sanitize_responses(responses, style)
}

// Final pass. Idempotent on already-clean input: a second run changes
// nothing.
pub fn sanitize_responses(candidates: Vec<String>, style: Style) -> Vec<String> {
    let mut cleaned: Vec<String> = candidates
        .into_iter()
        .take(RESPONSE_COUNT)
        .enumerate()
        .map(|(index, candidate)| sanitize_one(&candidate, style, index))
        .collect();

    while cleaned.len() < RESPONSE_COUNT {
        let index = cleaned.len();
        cleaned.push(placeholder_response(style, index));
    }

    cleaned
}

fn sanitize_one(candidate: &str, style: Style, index: usize) -> String {
    let without_sentinel = UNDEFINED_RE.replace_all(candidate, "");
    let collapsed = WHITESPACE_RE.replace_all(without_sentinel.trim(), " ");
    let without_label = LABEL_RE.replace(&collapsed, "");
    let without_numbering = NUMBERING_RE.replace(&without_label, "");
    let value = without_numbering.trim();

    if char_count(value) < MIN_RESPONSE_CHARS {
        placeholder_response(style, index)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contract(responses: &[String]) {
        assert_eq!(responses.len(), RESPONSE_COUNT);
        for response in responses {
            assert!(char_count(response) >= MIN_RESPONSE_CHARS);
            assert!(!response.to_lowercase().contains("undefined"));
        }
    }

    #[test]
    fn takes_three_clean_lines() {
        let raw = "你这话说得真有水平，可惜全是错的。\n建议你回去多读两本书再来。\n我听完只想给你鼓掌，鼓到你脸上。\n第四条不该出现。";
        let responses = parse_comebacks(raw, Style::Sarcastic);
        assert_contract(&responses);
        assert_eq!(responses[0], "你这话说得真有水平，可惜全是错的。");
        assert_eq!(responses[2], "我听完只想给你鼓掌，鼓到你脸上。");
    }

    #[test]
    fn strips_numbered_and_labeled_lines() {
        let raw = "1. 带编号的行会被整行丢弃掉的呀\n回应A：带标签的行也一样被丢弃掉\n- 列表标记的行同样会被过滤掉啊\n这一条是真正干净的回应，应该保留下来。\n这一条也是干净的回应，同样应该保留。\n第三条干净回应，凑满三条正好用上。";
        let responses = parse_comebacks(raw, Style::Lawyer);
        assert_contract(&responses);
        assert_eq!(responses[0], "这一条是真正干净的回应，应该保留下来。");
        assert_eq!(responses.len(), 3);
    }

    #[test]
    fn falls_back_to_sentence_split() {
        let raw = "你的观点就像漏风的窗户根本挡不住事实！我建议你先把逻辑补一补再来跟我谈！这种水平的发言实在让人提不起兴趣！";
        let responses = parse_comebacks(raw, Style::Literary);
        assert_contract(&responses);
        assert!(responses[0].ends_with('。'));
        assert!(responses
            .iter()
            .all(|response| !response.contains('！') || response.ends_with('！')));
    }

    #[test]
    fn pads_with_variants_when_output_is_sparse() {
        let raw = "你说的这些完全站不住脚，回去想清楚再说。";
        let responses = parse_comebacks(raw, Style::Boss);
        assert_contract(&responses);
        // second slot swaps the terminal 。 for ！, third swaps 你 for 您
        assert_eq!(responses[1], "你说的这些完全站不住脚，回去想清楚再说！");
        assert!(responses[2].contains('您'));
    }

    #[test]
    fn garbage_input_yields_placeholders() {
        let responses = parse_comebacks("   \n  \n ", Style::Perfunctory);
        assert_eq!(
            responses,
            vec![
                "敷衍风回应1：请重新生成".to_string(),
                "敷衍风回应2：请重新生成".to_string(),
                "敷衍风回应3：请重新生成".to_string(),
            ]
        );
    }

    #[test]
    fn scrubs_the_undefined_sentinel() {
        let raw = "undefined你这话UNDEFINED真是令人无语Undefined，服了。\n这一行完全没有问题，可以放心保留。\nundefined";
        let responses = parse_comebacks(raw, Style::Sarcastic);
        assert_contract(&responses);
        assert_eq!(responses[0], "你这话真是令人无语，服了。");
    }

    #[test]
    fn sanitize_is_idempotent_on_clean_input() {
        let clean = vec![
            "你这话说得真有水平，可惜全是错的。".to_string(),
            "建议你回去多读两本书再来。".to_string(),
            "我听完只想给你鼓掌，鼓到你脸上。".to_string(),
        ];
        let once = sanitize_responses(clean, Style::Sarcastic);
        let twice = sanitize_responses(once.clone(), Style::Sarcastic);
        assert_eq!(once, twice);
    }

    #[test]
    fn sanitize_replaces_short_candidates() {
        let candidates = vec!["好。".to_string(), "undefined".to_string()];
        let cleaned = sanitize_responses(candidates, Style::Literary);
        assert_eq!(cleaned[0], "文艺风回应1：请重新生成");
        assert_eq!(cleaned[1], "文艺风回应2：请重新生成");
        assert_eq!(cleaned[2], "文艺风回应3：请重新生成");
    }
}
