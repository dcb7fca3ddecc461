//! Where translation units exported from the translation platform come from.

use crate::{
    constants::localization::UNKNOWN_FILE_TYPE_MSG,
    functions::{
        game_relative_path, parse_units, read_to_string_without_bom,
        unit_file_path, walk_files,
    },
    types::{Error, TranslationUnit},
};
use log::debug;
use std::path::{Path, PathBuf};

/// Approved translations of one game file.
pub struct ApprovedFile {
    /// Game-relative path of the original file, e.g. `www/data/Map001.json`.
    pub relative_path: PathBuf,
    /// The file's units, or the error that prevented reading them.
    pub units: Result<Vec<TranslationUnit>, Error>,
}

/// Supplies translation units previously exported from the translation platform.
pub trait TranslationSource {
    /// Units known for the game file at `relative_path`. `Ok(None)` means there are none, which is a normal state.
    fn known_translations(
        &self,
        relative_path: &Path,
    ) -> Result<Option<Vec<TranslationUnit>>, Error>;

    /// Every game file with approved translations.
    fn approved_translations(&self) -> Result<Vec<ApprovedFile>, Error>;
}

/// A directory that mirrors the game tree, holding one `<name>.json` unit file per game file.
pub struct DownloadDir {
    root: PathBuf,
}

impl DownloadDir {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_units(path: &Path) -> Result<Vec<TranslationUnit>, Error> {
        let content = read_to_string_without_bom(path)
            .map_err(|err| Error::Io(path.to_path_buf(), err))?;
        parse_units(&content, path)
    }
}

impl TranslationSource for DownloadDir {
    fn known_translations(
        &self,
        relative_path: &Path,
    ) -> Result<Option<Vec<TranslationUnit>>, Error> {
        let path = self.root.join(unit_file_path(relative_path));

        if !path.is_file() {
            return Ok(None);
        }

        Self::read_units(&path).map(Some)
    }

    fn approved_translations(&self) -> Result<Vec<ApprovedFile>, Error> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut approved: Vec<ApprovedFile> = Vec::new();

        for path in walk_files(&self.root)? {
            let Ok(relative) = path.strip_prefix(&self.root) else {
                continue;
            };

            let Some(relative_path) = game_relative_path(relative) else {
                debug!("{}: {UNKNOWN_FILE_TYPE_MSG}", relative.display());
                continue;
            };

            approved.push(ApprovedFile {
                relative_path,
                units: Self::read_units(&path),
            });
        }

        Ok(approved)
    }
}
