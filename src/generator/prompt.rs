use crate::config::{COMEBACK_SYSTEM_PROMPT, COMEBACK_USER_PROMPT};
use crate::generator::GenerationRequest;
use crate::utils::language::resolve_language;

pub fn intensity_description(level: u8) -> &'static str {
    if level <= 2 {
        "温和礼貌，点到为止"
    } else if level <= 4 {
        "稍有不满，但保持克制"
    } else if level <= 6 {
        "明显不悦，语气较重"
    } else if level <= 8 {
        "相当愤怒，言辞犀利"
    } else {
        "极度愤怒，火力全开，毫不留情"
    }
}

pub fn build_system_prompt(request: &GenerationRequest) -> String {
    COMEBACK_SYSTEM_PROMPT
        .replace("{intensity}", &request.intensity.to_string())
        .replace("{intensity_desc}", intensity_description(request.intensity))
        .replace(
            "{language}",
            resolve_language(request.language, &request.original_text),
        )
}

pub fn build_user_prompt(request: &GenerationRequest) -> String {
    COMEBACK_USER_PROMPT
        .replace("{original_text}", &request.original_text)
        .replace("{style}", request.style.label())
        .replace("{intensity}", &request.intensity.to_string())
        .replace("{intensity_desc}", intensity_description(request.intensity))
}
