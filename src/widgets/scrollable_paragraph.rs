use unicode_width::UnicodeWidthChar;

/// Scroll position for a wrapped block of text. The viewport size is refreshed
/// from the layout before every draw so scrolling can be clamped.
#[derive(Debug, Default, Clone)]
pub struct ScrollableParagraphState {
    pub content: String,
    pub scroll_offset_vertical: u16,
    viewport_width: u16,
    viewport_height: u16,
}

impl ScrollableParagraphState {
    pub fn new(content: String) -> Self {
        Self { content, ..Self::default() }
    }

    pub fn set_dimensions(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.scroll_offset_vertical = self.scroll_offset_vertical.min(self.max_scroll());
    }

    /// Line count once word-wrapped to the viewport width, as `Wrap { trim: true }` draws it.
    pub fn wrapped_line_count(&self) -> usize {
        let width = usize::from(self.viewport_width.max(1));
        self.content.lines().map(|line| wrapped_rows(line, width)).sum()
    }

    pub fn max_scroll(&self) -> u16 {
        let overflow = self.wrapped_line_count().saturating_sub(usize::from(self.viewport_height));
        u16::try_from(overflow).unwrap_or(u16::MAX)
    }

    pub fn page_size(&self) -> u16 {
        self.viewport_height.saturating_sub(1).max(1)
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset_vertical = self.scroll_offset_vertical.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset_vertical =
            self.scroll_offset_vertical.saturating_add(amount).min(self.max_scroll());
    }
}

/// Greedy word wrap: a word moves to the next row when it does not fit after the
/// preceding gap, and words wider than a row are broken across rows.
fn wrapped_rows(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut column = 0;
    let mut gap = 0;
    let mut word = 0;

    for ch in line.chars().chain(std::iter::once(' ')) {
        let ch_width = ch.width().unwrap_or(0);
        if !ch.is_whitespace() {
            word += ch_width;
            continue;
        }
        if word > 0 {
            if column > 0 && column + gap + word <= width {
                column += gap + word;
            } else {
                // Leading whitespace of a wrapped row is trimmed.
                if column > 0 {
                    rows += 1;
                }
                let mut rest = word;
                while rest > width {
                    rows += 1;
                    rest -= width;
                }
                column = rest;
            }
            gap = 0;
            word = 0;
        }
        gap += ch_width;
    }
    rows
}
