use crate::generator::parser::RESPONSE_COUNT;
use crate::generator::Style;

// Canned responses used whenever the live completion call fails. Intensity
// is deliberately ignored here; the bank trades nuance for availability.
pub fn fallback_responses(original_text: &str, style: Style) -> Vec<String> {
    templates_for(style)
        .iter()
        .map(|template| template.replace("{original}", original_text))
        .collect()
}

fn templates_for(style: Style) -> [&'static str; RESPONSE_COUNT] {
    match style {
        Style::Literary => [
            r#"我能理解你的困惑，如同冬日雪花落在温水中的短暂存在。然而，"{original}"这种观点，就像是在岁月的画布上用蜡笔作画，终将被时间的雨水冲刷。"#,
            r#"若将你的言论比作一首诗，那便是缺乏韵律与意境的无病呻吟。"{original}"？不过是浮云掠过天空，未留痕迹。"#,
            r#"听着你说"{original}"，我仿佛看见一位画家执着于用单色描绘彩虹的徒劳。思想的丰富性不该被如此简单的框架所束缚。"#,
        ],
        Style::Lawyer => [
            r#"根据现有事实和逻辑推理，"{original}"的论点存在明显漏洞。首先，缺乏具体证据支持；其次，违反基本因果关系；最后，与已建立的先例相矛盾。"#,
            r#"就您提出的"{original}"，本人不得不指出，该主张在法理上站不住脚。如继续坚持此类毫无依据的言论，将面临逻辑与理性的双重审判。"#,
            r#"对方所述"{original}"，属于未经证实的主观臆断。我方保留要求对方提供确凿证据的权利，同时强调，在缺乏事实支持的情况下，任何结论都是站不住脚的。"#,
        ],
        Style::Northeastern => [
            r#"嘿！你搁这儿跟我整"{original}"这套啊？咋地，你寻思我缺心眼啊？别搁这儿跟我抖机灵，你那点小九九，我老远就瞅见了！"#,
            r#"哎呀我去！"{original}"？您这不是扯犊子吗！我给您讲，这玩意儿就跟东北的鸡架子似的，光剩骨头没肉了！"#,
            r#"得嘞，你接着搁这儿"{original}"吧！我站这儿等着，等你整明白了，咱再唠！你这理由跟二月份的冰棍似的，不够硬啊老铁！"#,
        ],
        Style::Philosopher => [
            r#""{original}"，此言论犹如尼采所言的"上帝已死"般具有冲击力，却缺乏深度。若以海德格尔的存在主义审视，我们会发现，这不过是一种对本真性存在的逃避。"#,
            r#"从笛卡尔的二元论出发，"{original}"这一观点实际上暴露了思维与存在之间的深刻矛盾。若康德在世，恐怕会将此视为典型的先验错觉。"#,
            r#"以维特根斯坦的语言游戏理论观之，"{original}"这一表述陷入了语言的迷宫。它并非事实陈述，而是情感宣泄，因此不具备真假判断的条件。"#,
        ],
        Style::Sarcastic => [
            r#"噢，"{original}"？真是个绝妙的发现呢！我真该把这个写进日记，标题就叫《今天又听到了一个天才的想法》。"#,
            r#"哇，说出"{original}"时，你脸上那认真的表情真是太珍贵了！简直应该被录下来，放在"自信与事实背道而驰"的教科书里作为经典案例。"#,
            r#"当你说"{original}"的时候，我差点就信了，直到我想起来你的观点一贯如此... 独特。不过没关系，每个人都有权拥有自己的幻想世界。"#,
        ],
        Style::Boss => [
            r#"关于"{original}"这个问题，我认为你需要跳出思维局限，从更高维度思考。建议你回去再深入分析，下周一给我一份详细报告。"#,
            r#"我们公司不提倡"{original}"这种思维方式。要知道，市场是瞬息万变的，我们需要的是积极创新的解决方案，而不是一味地固守陈规。"#,
            r#"说实话，听到你说"{original}"，我有些失望。作为一个有潜力的人才，我期待看到更有深度、更具战略眼光的分析。记住，我们要的是结果，不是借口。"#,
        ],
        Style::Perfunctory => [
            r#"嗯...关于"{original}"啊，确实，你说得有道理...不过吧，这个嘛，也要看情况的，对吧？"#,
            r#""{original}"？哦，这个啊...行吧，随你怎么说。反正我这会儿正忙着呢，咱改天再聊？"#,
            r#"你说"{original}"是吧？挺有意思的观点...嗯，对，可能是这样吧。你继续，我听着呢。"#,
        ],
    }
}
