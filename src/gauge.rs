use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier},
    widgets::{Block, Widget},
};

pub const HANDLE: char = '●';

/// Rounded progress track with a draggable handle.
pub struct SeekGauge<'a> {
    ratio: f64,
    filled_color: Color,
    dimmed_color: Color,
    active: bool,
    block: Option<Block<'a>>,
}

impl<'a> SeekGauge<'a> {
    pub fn new(ratio: f64, filled_color: Color) -> Self {
        SeekGauge {
            ratio: ratio.clamp(0.0, 1.0),
            filled_color,
            dimmed_color: Color::DarkGray,
            active: false,
            block: None,
        }
    }

    pub fn dimmed_color(mut self, color: Color) -> Self {
        self.dimmed_color = color;
        self
    }

    /// Highlights the handle while a drag is in progress.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

/// Column of the handle within a track of `width` cells.
pub fn handle_column(ratio: f64, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    (ratio.clamp(0.0, 1.0) * (width - 1) as f64).round() as usize
}

impl Widget for SeekGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width < 2 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let handle = handle_column(self.ratio, width);
        let y = inner.y;

        for col in 0..width {
            let x = inner.x + col as u16;
            let (ch, fg) = if col == handle {
                (HANDLE, self.filled_color)
            } else if col < handle {
                if col == 0 {
                    ('╺', self.filled_color)
                } else {
                    ('━', self.filled_color)
                }
            } else if col == width - 1 {
                ('╴', self.dimmed_color)
            } else {
                ('─', self.dimmed_color)
            };

            buf[(x, y)].set_char(ch).set_fg(fg).set_bg(Color::Reset);
        }

        if self.active {
            let x = inner.x + handle as u16;
            let cell = &mut buf[(x, y)];
            cell.modifier.insert(Modifier::BOLD | Modifier::REVERSED);
        }
    }
}
