// src/test_support.rs
use crate::podcast::{Podcast, PodcastId};
use ratatui::buffer::Buffer;

pub fn podcast(id: &str, title: &str, publisher: &str) -> Podcast {
    Podcast::new(
        PodcastId::new(id),
        title.to_string(),
        publisher.to_string(),
        format!("https://example.com/{}.jpg", id),
        format!("<p>About <b>{}</b></p>", title),
    )
}

/// One string per buffer row, trailing blanks trimmed.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer.get(x, y).symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}
