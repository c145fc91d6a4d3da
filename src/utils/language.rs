use whatlang::{detect, Lang, Script};

use crate::generator::Language;

const MIN_ALPHA_CHARS: usize = 2;
const LATIN_CONFIDENCE_THRESHOLD: f64 = 0.5;

// 自动识别 resolves against the opponent's text; everything that is not
// confidently English renders as 中文, the product's home language.
pub fn resolve_language(language: Language, sample: &str) -> &'static str {
    match language {
        Language::Chinese => Language::Chinese.label(),
        Language::English => Language::English.label(),
        Language::Auto => detect_language_label(sample),
    }
}

fn detect_language_label(sample: &str) -> &'static str {
    if sample.chars().any(is_han) {
        return Language::Chinese.label();
    }

    if alphabetic_char_count(sample) < MIN_ALPHA_CHARS {
        return Language::Chinese.label();
    }

    match detect(sample) {
        Some(info) if info.lang() == Lang::Eng => {
            if info.is_reliable()
                || (info.script() == Script::Latin
                    && info.confidence() >= LATIN_CONFIDENCE_THRESHOLD)
            {
                Language::English.label()
            } else {
                Language::Chinese.label()
            }
        }
        _ => Language::Chinese.label(),
    }
}

fn alphabetic_char_count(text: &str) -> usize {
    text.chars().filter(|ch| ch.is_alphabetic()).count()
}

fn is_han(ch: char) -> bool {
    matches!(ch, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_choice_passes_through() {
        assert_eq!(resolve_language(Language::Chinese, "whatever"), "中文");
        assert_eq!(resolve_language(Language::English, "随便"), "英文");
    }

    #[test]
    fn auto_detects_chinese_from_han_characters() {
        assert_eq!(resolve_language(Language::Auto, "你是不是傻"), "中文");
    }

    #[test]
    fn auto_detects_english_sentences() {
        assert_eq!(
            resolve_language(
                Language::Auto,
                "You have got to be kidding me with this nonsense right now."
            ),
            "英文"
        );
    }

    #[test]
    fn auto_falls_back_to_chinese_without_signal() {
        assert_eq!(resolve_language(Language::Auto, "👍👍"), "中文");
        assert_eq!(resolve_language(Language::Auto, "12345"), "中文");
    }
}
