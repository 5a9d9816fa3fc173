//! Markdown formatting actions applied to the editor selection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Bold,
    Italic,
    Underline,
    Heading1,
    Heading2,
    Clear,
}

impl FormatAction {
    /// Replacement text for `selected`
    pub fn apply(self, selected: &str) -> String {
        match self {
            Self::Bold => format!("**{}**", selected),
            Self::Italic => format!("*{}*", selected),
            Self::Underline => format!("_{}_", selected),
            Self::Heading1 => format!("# {}", selected),
            Self::Heading2 => format!("## {}", selected),
            Self::Clear => clear_formatting(selected),
        }
    }

    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "underline" => Some(Self::Underline),
            "h1" => Some(Self::Heading1),
            "h2" => Some(Self::Heading2),
            "clear" | "normal" => Some(Self::Clear),
            _ => None,
        }
    }
}

/// Drops one heading marker at the very start and every `*`/`_` run
pub fn clear_formatting(text: &str) -> String {
    let hashes = text.chars().take_while(|&c| c == '#').count();
    let body = if hashes > 0 && text[hashes..].starts_with(' ') {
        &text[hashes + 1..]
    } else {
        text
    };
    body.chars().filter(|c| !matches!(c, '*' | '_')).collect()
}
