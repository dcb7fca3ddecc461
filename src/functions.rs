use crate::{
    constants::UNIT_FILE_EXTENSION,
    types::{Error, FileType, TranslationUnit},
};
use std::{
    ffi::OsString,
    fs::{create_dir_all, read, write},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

#[inline]
/// This function is exactly similar to `std::fs::read_to_string`, but it doesn't include Byte Order Mark, if there's any.
pub fn read_to_string_without_bom<P: AsRef<Path>>(
    file_path: P,
) -> std::io::Result<String> {
    let bytes: Vec<u8> = read(file_path.as_ref())?;
    let (content, malformed) =
        encoding_rs::UTF_8.decode_with_bom_removal(&bytes);

    if malformed {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        ));
    }

    Ok(content.into_owned())
}

/// Classifies a file by its name, ignoring the directory and the last extension.
#[must_use]
pub fn classify(path: &Path) -> Option<FileType> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(FileType::from_stem)
}

/// Appends the unit file extension to a game-relative path: `www/data/Map001.json` -> `www/data/Map001.json.json`.
#[must_use]
pub fn unit_file_path(relative_path: &Path) -> PathBuf {
    let mut name: OsString = relative_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(UNIT_FILE_EXTENSION);

    relative_path.with_file_name(name)
}

/// Inverse of [`unit_file_path`]. Returns [`None`] if the path doesn't end with the unit file extension.
#[must_use]
pub fn game_relative_path(unit_path: &Path) -> Option<PathBuf> {
    if unit_path.extension()? != UNIT_FILE_EXTENSION {
        return None;
    }

    Some(unit_path.with_extension(""))
}

/// Parses a translation unit file.
pub fn parse_units(
    content: &str,
    path: &Path,
) -> Result<Vec<TranslationUnit>, Error> {
    serde_json::from_str(content)
        .map_err(|err| Error::JsonParse(path.to_path_buf(), err))
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).map_err(|err| Error::CreateDirFailed {
            path: parent.to_path_buf(),
            err,
        })?;
    }

    write(path, content).map_err(|err| Error::Io(path.to_path_buf(), err))
}

/// Writes units as indented JSON that keeps non-ASCII text readable.
pub fn write_units(
    path: &Path,
    units: &[TranslationUnit],
) -> Result<(), Error> {
    let content = serde_json::to_string_pretty(units)?;
    write_file(path, content)
}

/// Lists every file under `root`, recursively and sorted by path. Symlinks aren't followed.
pub fn walk_files(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            Error::Io(path, err.into())
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
