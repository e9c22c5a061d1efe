use crate::models::{ImagePayload, PromptEntry, RequestPart, StyleKind};
use crate::prompt::{BACKGROUND_CLAUSE, SETTING_CLAUSE};

pub const COMPOSE_INTO_BACKGROUND: &str = "Place the product and/or model in the environment of \
the provided background image, matching the lighting and style.";

/// Parts for one remote call, borrowing the shared upload payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest<'a> {
    pub index: usize,
    pub style: StyleKind,
    /// Prompt text actually sent, after any background rewrite.
    pub prompt: String,
    pub parts: Vec<RequestPart<'a>>,
}

impl GenerationRequest<'_> {
    pub fn has_background(&self) -> bool {
        self.parts
            .iter()
            .filter(|part| matches!(part, RequestPart::InlineData { .. }))
            .count()
            > 1
    }
}

/// Product image first, then the background image for lifestyle and model
/// shots when one is supplied, then the prompt text.
pub fn assemble<'a>(
    entry: &PromptEntry,
    product: &'a ImagePayload,
    background: Option<&'a ImagePayload>,
) -> GenerationRequest<'a> {
    let mut parts = Vec::with_capacity(3);
    parts.push(RequestPart::InlineData {
        inline_data: product,
    });

    let prompt = match background {
        Some(background) if entry.style.uses_background() => {
            parts.push(RequestPart::InlineData {
                inline_data: background,
            });
            replace_setting_clause(&entry.text)
        }
        _ => entry.text.clone(),
    };

    parts.push(RequestPart::Text {
        text: prompt.clone(),
    });

    GenerationRequest {
        index: entry.index,
        style: entry.style,
        prompt,
        parts,
    }
}

/// Swaps the trailing setting/background clause for the composition
/// instruction. Prompts without such a clause are returned unchanged.
pub fn replace_setting_clause(prompt: &str) -> String {
    let cut = [SETTING_CLAUSE, BACKGROUND_CLAUSE]
        .iter()
        .filter_map(|clause| prompt.find(clause))
        .min();

    match cut {
        Some(at) => format!("{}{}", &prompt[..at], COMPOSE_INTO_BACKGROUND),
        None => prompt.to_string(),
    }
}
