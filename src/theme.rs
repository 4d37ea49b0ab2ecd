use ratatui::style::Color;

pub struct Theme {
    pub name: &'static str,
    pub accent: Color,
    pub secondary: Color,
    pub text: Color,
    pub dimmed: Color,
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: "Default",
        accent: Color::Cyan,
        secondary: Color::Yellow,
        text: Color::White,
        dimmed: Color::DarkGray,
    },
    Theme {
        name: "Dracula",
        accent: Color::Rgb(189, 147, 249),
        secondary: Color::Rgb(255, 121, 198),
        text: Color::White,
        dimmed: Color::DarkGray,
    },
    Theme {
        name: "Nord",
        accent: Color::Rgb(136, 192, 208),
        secondary: Color::Rgb(235, 203, 139),
        text: Color::White,
        dimmed: Color::DarkGray,
    },
    Theme {
        name: "Gruvbox",
        accent: Color::Rgb(214, 153, 62),
        secondary: Color::Rgb(250, 189, 47),
        text: Color::White,
        dimmed: Color::DarkGray,
    },
    Theme {
        name: "Catppuccin",
        accent: Color::Rgb(203, 166, 247),
        secondary: Color::Rgb(249, 226, 175),
        text: Color::White,
        dimmed: Color::DarkGray,
    },
    Theme {
        name: "Tokyo Night",
        accent: Color::Rgb(122, 162, 247),
        secondary: Color::Rgb(224, 175, 104),
        text: Color::White,
        dimmed: Color::DarkGray,
    },
];

/// Out-of-range indices (e.g. from an old config) fall back to the default.
pub fn theme(index: usize) -> &'static Theme {
    THEMES.get(index).unwrap_or(&THEMES[0])
}

pub fn next_theme(index: usize) -> usize {
    (index + 1) % THEMES.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_wraps_and_bad_indices_fall_back() {
        assert_eq!(next_theme(THEMES.len() - 1), 0);
        assert_eq!(theme(THEMES.len() + 5).name, "Default");
    }
}
