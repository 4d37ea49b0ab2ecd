use std::path::PathBuf;

use clap::Parser;

/// Terminal player page for a dashboard server, with drag-to-seek.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Local audio file to play; without it seeks are only logged
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Server id shown in the page header
    #[arg(short = 's', long = "server", value_name = "ID", default_value = "local")]
    pub server: String,

    /// Directory listed in the playlist panel (defaults to FILE's folder)
    #[arg(short = 'L', long = "library", value_name = "DIR")]
    pub library: Option<PathBuf>,

    /// Override the config directory
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log file (defaults to deck-player.log in the config directory)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Verbosity: -v info, -vv debug, -vvv trace
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    pub fn library(&self) -> Option<PathBuf> {
        self.library.clone().or_else(|| {
            self.file
                .as_ref()
                .and_then(|f| f.parent())
                .map(|p| if p.as_os_str().is_empty() { PathBuf::from(".") } else { p.to_path_buf() })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_defaults_to_the_file_folder() {
        let args = Args::parse_from(["deck-player", "music/a.mp3", "-vv"]);
        assert_eq!(args.library(), Some(PathBuf::from("music")));
        assert_eq!(args.verbosity, 2);
        assert_eq!(args.server, "local");

        let bare = Args::parse_from(["deck-player", "a.mp3"]);
        assert_eq!(bare.library(), Some(PathBuf::from(".")));

        let explicit = Args::parse_from(["deck-player", "--library", "/srv/tracks", "--server", "77"]);
        assert_eq!(explicit.library(), Some(PathBuf::from("/srv/tracks")));
        assert_eq!(explicit.file, None);
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
