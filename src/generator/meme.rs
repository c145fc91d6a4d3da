use crate::config::MEME_PROMPT_TEMPLATE;
use crate::generator::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeStyleSpec {
    pub description: String,
    pub visual: String,
    pub expression: String,
    pub special: String,
}

struct KeywordRule {
    keywords: &'static [&'static str],
    description: &'static str,
    visual: &'static str,
    expression: &'static str,
    special: &'static str,
}

// Evaluated top to bottom; a matching rule overwrites the whole spec, so
// the last matching category wins.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["狗", "猪", "驴", "牛", "羊", "鸡", "鸭"],
        description: "涉及动物比喻的讽刺",
        visual: "panda head with animal-related background elements",
        expression: "disgusted and superior look, as if looking down on animals",
        special: "Add subtle animal silhouettes in background",
    },
    KeywordRule {
        keywords: &["呵呵", "哦", "是吗", "真的吗", "厉害", "牛逼"],
        description: "强烈讽刺和嘲笑",
        visual: "panda head with exaggerated features",
        expression: "eye-rolling with obvious sarcasm, raised eyebrow",
        special: "Emphasize the sarcastic expression with dramatic eye-roll",
    },
    KeywordRule {
        keywords: &["滚", "死", "蠢", "傻", "笨", "垃圾"],
        description: "愤怒和攻击性内容",
        visual: "panda head with angry red background",
        expression: "furious and aggressive look with furrowed brows",
        special: "Add angry visual effects like steam or red background",
    },
    KeywordRule {
        keywords: &["随便", "无所谓", "算了", "懒得", "不想"],
        description: "不屑和敷衍的态度",
        visual: "panda head with bored/tired appearance",
        expression: "completely uninterested and dismissive, half-closed eyes",
        special: "Show extreme boredom and disinterest",
    },
    KeywordRule {
        keywords: &["我", "老子", "爷", "本人", "在下"],
        description: "展现优越感和自信",
        visual: "panda head with confident posture",
        expression: "extremely confident and superior, chin up",
        special: "Add confident body language like crossed arms or pointing",
    },
    KeywordRule {
        keywords: &["？", "吗", "呢", "啊", "吧"],
        description: "疑问式讽刺",
        visual: "panda head with questioning gesture",
        expression: "fake confused look with obvious sarcasm",
        special: "Add question marks or confused gesture while maintaining sarcastic undertone",
    },
];

pub fn analyze_meme_style(text: &str, style: Style) -> MemeStyleSpec {
    let mut spec = MemeStyleSpec {
        description: "一般讽刺内容".to_string(),
        visual: "standard panda head with neutral background".to_string(),
        expression: "smug and dismissive look".to_string(),
        special: "Standard meme layout with text at bottom".to_string(),
    };

    for rule in KEYWORD_RULES {
        if rule.keywords.iter().any(|keyword| text.contains(keyword)) {
            spec.description = rule.description.to_string();
            spec.visual = rule.visual.to_string();
            spec.expression = rule.expression.to_string();
            spec.special = rule.special.to_string();
        }
    }

    match style {
        Style::Northeastern => {
            spec.expression.push_str(", with northeastern Chinese attitude");
            spec.special.push_str(" Add northeastern Chinese cultural elements");
        }
        Style::Literary => {
            spec.visual = "elegant panda head with artistic background".to_string();
            spec.expression = "sophisticated and cultured disdain".to_string();
        }
        Style::Lawyer => {
            spec.visual = "professional panda head with formal appearance".to_string();
            spec.expression = "serious and authoritative look".to_string();
            spec.special.push_str(" Add professional/legal elements");
        }
        Style::Philosopher => {
            spec.visual = "thoughtful panda head with philosophical background".to_string();
            spec.expression = "deep thinking with subtle superiority".to_string();
        }
        _ => {}
    }

    spec
}

pub fn build_meme_prompt(response_text: &str, style: Style) -> String {
    let spec = analyze_meme_style(response_text, style);
    MEME_PROMPT_TEMPLATE
        .replace("{response_text}", response_text)
        .replace("{description}", &spec.description)
        .replace("{visual}", &spec.visual)
        .replace("{expression}", &spec.expression)
        .replace("{special}", &spec.special)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_when_no_keyword_matches() {
        let spec = analyze_meme_style("平静的句子", Style::Sarcastic);
        assert_eq!(spec.description, "一般讽刺内容");
        assert_eq!(spec.visual, "standard panda head with neutral background");
    }

    #[test]
    fn later_category_overrides_earlier_match() {
        // matches both the animal category and the interrogative one; the
        // interrogative rule sits later and must win outright
        let spec = analyze_meme_style("你是狗吗", Style::Sarcastic);
        assert_eq!(spec.description, "疑问式讽刺");
        assert_eq!(spec.visual, "panda head with questioning gesture");
    }

    #[test]
    fn anger_keywords_select_the_anger_spec() {
        let spec = analyze_meme_style("滚远点垃圾", Style::Sarcastic);
        assert_eq!(spec.description, "愤怒和攻击性内容");
        assert_eq!(spec.visual, "panda head with angry red background");
    }

    #[test]
    fn northeastern_style_appends_cultural_hints() {
        let spec = analyze_meme_style("平静的句子", Style::Northeastern);
        assert!(spec.expression.ends_with("with northeastern Chinese attitude"));
        assert!(spec.special.ends_with("Add northeastern Chinese cultural elements"));
    }

    #[test]
    fn literary_style_replaces_visual_but_keeps_description() {
        let spec = analyze_meme_style("滚远点垃圾", Style::Literary);
        assert_eq!(spec.description, "愤怒和攻击性内容");
        assert_eq!(spec.visual, "elegant panda head with artistic background");
        assert_eq!(spec.expression, "sophisticated and cultured disdain");
    }

    #[test]
    fn meme_prompt_embeds_text_and_spec() {
        let prompt = build_meme_prompt("你说得都对吧", Style::Lawyer);
        assert!(prompt.contains("你说得都对吧"));
        assert!(prompt.contains("疑问式讽刺"));
        assert!(prompt.contains("professional panda head with formal appearance"));
        assert!(!prompt.contains("{response_text}"));
        assert!(!prompt.contains("{special}"));
    }
}
