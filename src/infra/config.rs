//! User settings (`stickerboard.yaml`) and command-line overrides.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use sb_base::config::{DEFAULT_THEME, PALETTE, PaletteConfig, PaletteEntry};

use super::constants::{DEFAULT_LOG_FILE, SETTINGS_FILE};
use super::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory the palette's image files are read from
    pub asset_dir: PathBuf,
    /// Directory `canvas.png` is written to
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub theme: String,
    /// Replaces the embedded palette when set
    pub palette: Option<Vec<PaletteEntry>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("."),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            theme: DEFAULT_THEME.to_string(),
            palette: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| AppError::Config { path: path.to_path_buf(), source })
    }

    /// The palette in effect: the settings override or the embedded one.
    pub fn palette(&self) -> PaletteConfig {
        match &self.palette {
            Some(stickers) if !stickers.is_empty() => PaletteConfig { stickers: stickers.clone() },
            _ => PALETTE.clone(),
        }
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub config: PathBuf,
    pub out: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive terminal board
    Interactive,
    /// Headless: place and move stickers, then export
    Render(Vec<Placement>),
}

/// `<source>@<x>,<y>` from the render subcommand
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub source: String,
    pub x: f64,
    pub y: f64,
}

pub const USAGE: &str = "Usage: stickerboard [--config <file>] [--out <dir>] [render <source>@<x>,<y> ...]";

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut config = PathBuf::from(SETTINGS_FILE);
    let mut out = None;
    let mut render = false;
    let mut placements = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                config = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--out" if i + 1 < args.len() => {
                out = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "render" if !render => {
                render = true;
                i += 1;
            }
            arg if render => {
                placements.push(parse_placement(arg)?);
                i += 1;
            }
            other => {
                return Err(AppError::Usage(format!("Unknown argument: {}\n{}", other, USAGE)));
            }
        }
    }

    let command = if render { Command::Render(placements) } else { Command::Interactive };
    Ok(CliArgs { config, out, command })
}

fn parse_placement(arg: &str) -> Result<Placement> {
    let invalid = || AppError::Usage(format!("Invalid placement '{}', expected <source>@<x>,<y>", arg));
    let (source, coords) = arg.split_once('@').ok_or_else(invalid)?;
    let (x, y) = coords.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if source.is_empty() || !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Placement { source: source.to_string(), x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_settings_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_settings_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stickerboard.yaml");
        fs::write(&path, "output_dir: exports\ntheme: night\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("exports"));
        assert_eq!(settings.theme, "night");
        assert_eq!(settings.asset_dir, PathBuf::from("assets"));
        assert_eq!(settings.palette().stickers.len(), PALETTE.stickers.len());
    }

    #[test]
    fn palette_override() {
        let yaml = "palette:\n  - id: cat\n    name: Cat\n    file: cat.png\n    glyph: \"C\"\n    color: [1, 2, 3]\n";
        let settings = Settings::parse(Path::new("x.yaml"), yaml).unwrap();
        let palette = settings.palette();
        assert_eq!(palette.stickers.len(), 1);
        assert_eq!(palette.stickers[0].id, "cat");
    }

    #[test]
    fn malformed_settings_report_path() {
        let err = Settings::parse(Path::new("bad.yaml"), "asset_dir: [unclosed").unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn parse_interactive_defaults() {
        let cli = parse_args(&[]).unwrap();
        assert_eq!(cli.command, Command::Interactive);
        assert_eq!(cli.config, PathBuf::from(SETTINGS_FILE));
        assert_eq!(cli.out, None);
    }

    #[test]
    fn parse_render_placements() {
        let cli = parse_args(&args(&["--out", "/tmp/x", "render", "sticker1@83,95", "sticker2@-10.5,0"])).unwrap();
        assert_eq!(cli.out, Some(PathBuf::from("/tmp/x")));
        assert_eq!(
            cli.command,
            Command::Render(vec![
                Placement { source: "sticker1".into(), x: 83.0, y: 95.0 },
                Placement { source: "sticker2".into(), x: -10.5, y: 0.0 },
            ])
        );
    }

    #[test]
    fn parse_rejects_bad_placement() {
        assert!(parse_args(&args(&["render", "sticker1@83"])).is_err());
        assert!(parse_args(&args(&["render", "@1,2"])).is_err());
        assert!(parse_args(&args(&["render", "s@a,b"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }
}
