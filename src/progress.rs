use std::time::Duration;

use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders},
    Frame,
};

use crate::gauge::SeekGauge;
use crate::seek::{ProgressState, Track};
use crate::theme::Theme;

pub fn format_duration(ms: f64) -> String {
    let secs = Duration::try_from_secs_f64(ms.max(0.0) / 1000.0)
        .unwrap_or(Duration::MAX)
        .as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Track geometry of the cells inside the progress block.
pub fn track_of(inner: Rect) -> Option<Track> {
    if inner.width < 2 || inner.height == 0 {
        return None;
    }
    Some(Track {
        x: f64::from(inner.x),
        width: f64::from(inner.width - 1),
    })
}

/// Draws the seek bar and returns the area of its track cells.
pub fn draw_progress(
    frame: &mut Frame,
    area: Rect,
    progress: ProgressState,
    dragging: bool,
    theme: &Theme,
) -> Rect {
    let progress_label = format!(
        "{} / {}",
        format_duration(progress.current),
        format_duration(progress.max)
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Progress ")
        .title(Line::from(format!(" {progress_label} ")).alignment(Alignment::Right));
    let inner = block.inner(area);

    let gauge = SeekGauge::new(progress.ratio(), theme.accent)
        .dimmed_color(theme.dimmed)
        .active(dragging)
        .block(block);
    frame.render_widget(gauge, area);
    inner
}
