use std::path::{Path, PathBuf};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use tui_tree_widget::{Tree, TreeItem, TreeState};

use crate::theme::Theme;

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "aac", "m4a"];

pub const PLAYLIST_WIDTH: u16 = 36;

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Folders first, then files, both case-insensitively; empty folders are left out.
pub fn scan_directory(root: &Path) -> Vec<TreeItem<'static, PathBuf>> {
    let mut entries: Vec<std::fs::DirEntry> = match std::fs::read_dir(root) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(e) => {
            log::warn!("cannot read library {}: {e}", root.display());
            return Vec::new();
        }
    };
    entries.sort_by(|a, b| {
        let a_dir = a.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let b_dir = b.file_type().map(|t| t.is_dir()).unwrap_or(false);
        b_dir.cmp(&a_dir).then_with(|| {
            a.file_name()
                .to_ascii_lowercase()
                .cmp(&b.file_name().to_ascii_lowercase())
        })
    });

    let mut items = Vec::new();
    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if path.is_dir() {
            let children = scan_directory(&path);
            if !children.is_empty() {
                if let Ok(item) = TreeItem::new(path, name, children) {
                    items.push(item);
                }
            }
        } else if is_audio_file(&path) {
            items.push(TreeItem::new_leaf(path, name));
        }
    }
    items
}

/// The playlist panel: library tree plus its selection.
pub struct Playlist {
    items: Vec<TreeItem<'static, PathBuf>>,
    state: TreeState<PathBuf>,
}

impl Playlist {
    pub fn new(items: Vec<TreeItem<'static, PathBuf>>) -> Self {
        let mut state = TreeState::default();
        if let Some(first) = items.first() {
            state.select(vec![first.identifier().clone()]);
        }
        Playlist { items, state }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn up(&mut self) {
        self.state.key_up();
    }

    pub fn down(&mut self) {
        self.state.key_down();
    }

    pub fn fold(&mut self) {
        self.state.key_left();
    }

    pub fn unfold(&mut self) {
        self.state.key_right();
    }

    pub fn selected_file(&self) -> Option<PathBuf> {
        let path = self.state.selected().last()?;
        if path.is_file() && is_audio_file(path) {
            Some(path.clone())
        } else {
            None
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Playlist ")
            .title_bottom(" Enter: Play ");

        if self.items.is_empty() {
            frame.render_widget(
                Paragraph::new(" No tracks").style(Style::default().fg(theme.dimmed)).block(block),
                area,
            );
            return;
        }

        let Ok(tree) = Tree::new(&self.items) else {
            log::warn!("playlist has duplicate entries");
            return;
        };
        let tree = tree
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        frame.render_stateful_widget(tree, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn scan_keeps_audio_and_sorts_folders_first() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("b.MP3"), b"").unwrap();
        fs::write(root.path().join("a.flac"), b"").unwrap();
        fs::write(root.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(root.path().join("empty")).unwrap();
        fs::create_dir(root.path().join("zz")).unwrap();
        fs::write(root.path().join("zz").join("c.ogg"), b"").unwrap();

        let items = scan_directory(root.path());
        let ids: Vec<PathBuf> = items.iter().map(|i| i.identifier().clone()).collect();
        assert_eq!(
            ids,
            vec![
                root.path().join("zz"),
                root.path().join("a.flac"),
                root.path().join("b.MP3"),
            ]
        );
    }

    #[test]
    fn first_entry_is_selected() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("a.wav"), b"").unwrap();
        let playlist = Playlist::new(scan_directory(root.path()));
        assert_eq!(playlist.selected_file(), Some(root.path().join("a.wav")));
    }

    #[test]
    fn missing_library_is_empty() {
        let root = tempfile::tempdir().unwrap();
        assert!(scan_directory(&root.path().join("nope")).is_empty());
    }
}
