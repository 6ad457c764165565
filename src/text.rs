// src/text.rs
use log::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Wide enough that html2text never wraps; the Paragraph widget does that.
const UNWRAPPED_WIDTH: usize = 1000;

/// Renders catalog markup as plain text. Text without tags is returned trimmed.
pub fn strip_markup(description: &str) -> String {
    if !(description.contains('<') && description.contains('>')) && !description.contains('&') {
        return description.trim().to_string();
    }

    match html2text::from_read(description.as_bytes(), UNWRAPPED_WIDTH) {
        Ok(text_content) => text_content
            .lines()
            .map(|line| line.trim_end())
            .collect::<Vec<&str>>()
            .join("\n")
            .trim()
            .to_string(),
        Err(e) => {
            warn!("Failed to convert description markup: {}", e);
            description.trim().to_string()
        }
    }
}

/// Cuts `text` to at most `max_width` display columns, ending in '…' when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
