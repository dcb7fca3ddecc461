use std::path::{Path, PathBuf};

pub const DEFAULT_GAME_NAME: &str = "Daily Lives of My Countryside";

/// Where everything lives on disk, and which game release is being localized.
///
/// Relative directories are resolved against [`Config::root`]. The game version has no default, as it changes with every
/// release.
///
/// # Example
/// ```
/// use dlomc_localization::config::Config;
/// use std::path::Path;
///
/// let config = Config::new("/work").game_version("0.3.3.0");
/// assert_eq!(
///     config.game_root(),
///     Path::new("/work/resource/01-original/Daily Lives of My Countryside v0.3.3.0")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub original: PathBuf,
    pub convert: PathBuf,
    pub download: PathBuf,
    pub result: PathBuf,
    pub special: PathBuf,
    pub tmp: PathBuf,
    pub game_name: String,
    pub game_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            original: PathBuf::from("resource/01-original"),
            convert: PathBuf::from("resource/02-paratranz/convert"),
            download: PathBuf::from("resource/02-paratranz/download"),
            result: PathBuf::from("resource/03-result"),
            special: PathBuf::from("resource/04-special-file"),
            tmp: PathBuf::from("data/tmp"),
            game_name: DEFAULT_GAME_NAME.to_owned(),
            game_version: String::new(),
        }
    }
}

impl Config {
    /// Default layout under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn original(mut self, path: impl Into<PathBuf>) -> Self {
        self.original = path.into();
        self
    }

    #[must_use]
    pub fn convert(mut self, path: impl Into<PathBuf>) -> Self {
        self.convert = path.into();
        self
    }

    #[must_use]
    pub fn download(mut self, path: impl Into<PathBuf>) -> Self {
        self.download = path.into();
        self
    }

    #[must_use]
    pub fn result(mut self, path: impl Into<PathBuf>) -> Self {
        self.result = path.into();
        self
    }

    #[must_use]
    pub fn special(mut self, path: impl Into<PathBuf>) -> Self {
        self.special = path.into();
        self
    }

    #[must_use]
    pub fn tmp(mut self, path: impl Into<PathBuf>) -> Self {
        self.tmp = path.into();
        self
    }

    #[must_use]
    pub fn game_name(mut self, name: impl Into<String>) -> Self {
        self.game_name = name.into();
        self
    }

    #[must_use]
    pub fn game_version(mut self, version: impl Into<String>) -> Self {
        self.game_version = version.into();
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        // `join` keeps absolute paths as they are.
        self.root.join(path)
    }

    /// Directory of the unpacked game release: `{original}/{game_name} v{game_version}`.
    #[must_use]
    pub fn game_root(&self) -> PathBuf {
        self.resolve(&self.original)
            .join(format!("{} v{}", self.game_name, self.game_version))
    }

    #[must_use]
    pub fn convert_dir(&self) -> PathBuf {
        self.resolve(&self.convert)
    }

    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        self.resolve(&self.download)
    }

    #[must_use]
    pub fn result_dir(&self) -> PathBuf {
        self.resolve(&self.result)
    }

    #[must_use]
    pub fn special_dir(&self) -> PathBuf {
        self.resolve(&self.special)
    }

    #[must_use]
    pub fn tmp_dir(&self) -> PathBuf {
        self.resolve(&self.tmp)
    }
}
