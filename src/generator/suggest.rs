use crate::generator::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSuggestion {
    pub style: Style,
    pub intensity: u8,
}

// Quick heuristic over the opponent's message, used to pre-fill the
// generator controls.
pub fn suggest_style(text: &str) -> StyleSuggestion {
    let length = text.chars().count();

    if text.contains('?') || text.contains('？') {
        StyleSuggestion {
            style: Style::Lawyer,
            intensity: 7,
        }
    } else if text.contains('!') || text.contains('！') {
        StyleSuggestion {
            style: Style::Northeastern,
            intensity: 8,
        }
    } else if length > 100 {
        StyleSuggestion {
            style: Style::Philosopher,
            intensity: 6,
        }
    } else if length < 20 {
        StyleSuggestion {
            style: Style::Sarcastic,
            intensity: 9,
        }
    } else {
        StyleSuggestion {
            style: Style::Literary,
            intensity: 5,
        }
    }
}
