use crate::{
    config::Config,
    constants::{localization::*, SOURCE_DIRS},
    extract::Extractor,
    functions::{
        classify, unit_file_path, walk_files, write_file, write_units,
    },
    restore::Restorer,
    source::{ApprovedFile, TranslationSource},
    types::{Error, FileFlags, FileType, Mode, Summary},
};
use log::{debug, error, info, warn};
use std::{
    fs::{copy, create_dir_all, read_dir, remove_dir_all},
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Runs the convert and restore phases over a whole game release.
///
/// Per-file failures are logged and counted as skipped. Only fatal errors (see [`Error::is_fatal`]) stop a phase.
///
/// # Example
///
/// ```no_run
/// use dlomc_localization::{
///     config::Config, processors::Processor, source::DownloadDir,
///     types::FileFlags,
/// };
///
/// let config = Config::new("/work").game_version("0.3.3.0");
/// let source = DownloadDir::new(config.download_dir());
///
/// let mut processor = Processor::new(config, &source);
/// processor.set_files(FileFlags::Map | FileFlags::CommonEvents);
/// let summary = processor.convert().unwrap();
/// ```
pub struct Processor<'a> {
    config: Config,
    source: &'a dyn TranslationSource,
    file_flags: FileFlags,
}

impl<'a> Processor<'a> {
    /// Creates a processor that handles every file type.
    #[must_use]
    pub fn new(config: Config, source: &'a dyn TranslationSource) -> Self {
        Self {
            config,
            source,
            file_flags: FileFlags::default(),
        }
    }

    /// Sets the file flags to determine which game files are processed. See [`FileFlags`] for more info.
    pub fn set_files(&mut self, flags: FileFlags) {
        self.file_flags = flags;
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Removes and recreates each directory. Missing directories aren't an error.
    pub fn clean<P: AsRef<Path>>(paths: &[P]) -> Result<(), Error> {
        for path in paths {
            let path = path.as_ref();

            match remove_dir_all(path) {
                Err(err) if err.kind() != ErrorKind::NotFound => {
                    return Err(Error::Io(path.to_path_buf(), err));
                }
                _ => {}
            }

            create_dir_all(path).map_err(|err| Error::CreateDirFailed {
                path: path.to_path_buf(),
                err,
            })?;

            debug!("{}: {CLEANED_DIR_MSG}", path.display());
        }

        Ok(())
    }

    /// Cleans the output root of `mode`.
    pub fn clean_output(&self, mode: Mode) -> Result<(), Error> {
        let output = match mode {
            Mode::Convert => self.config.convert_dir(),
            Mode::Restore => self.config.result_dir(),
        };

        Self::clean(&[output])
    }

    fn skip_or_abort(
        path: &Path,
        message: &str,
        err: Error,
        summary: &mut Summary,
    ) -> Result<(), Error> {
        if err.is_fatal() {
            return Err(err);
        }

        warn!("{}: {message}: {err}", path.display());
        summary.skipped += 1;
        Ok(())
    }

    /// Converts every file in the game's data and quest directories into unit files under the convert root.
    ///
    /// # Errors
    ///
    /// - [`Error::GameNotFound`] if the game root doesn't exist.
    /// - [`Error::Io`] if a source directory can't be listed.
    pub fn convert(&self) -> Result<Summary, Error> {
        info!("{CONVERT_START_MSG}");

        let game_root = self.config.game_root();

        if !game_root.is_dir() {
            return Err(Error::GameNotFound(game_root));
        }

        let mut files: Vec<PathBuf> = Vec::new();

        for dir in SOURCE_DIRS {
            let path = game_root.join(dir);

            if !path.is_dir() {
                warn!("{}: {MISSING_DIR_MSG}", path.display());
                continue;
            }

            let entries =
                read_dir(&path).map_err(|err| Error::Io(path.clone(), err))?;

            for entry in entries {
                let entry =
                    entry.map_err(|err| Error::Io(path.clone(), err))?;

                if entry.path().is_file() {
                    files.push(Path::new(dir).join(entry.file_name()));
                }
            }
        }

        files.sort();
        self.convert_files(files)
    }

    /// Converts the given game-relative files. Order doesn't affect the written files.
    pub fn convert_files<I, P>(&self, files: I) -> Result<Summary, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut summary = Summary::default();

        for relative_path in files {
            let relative_path = relative_path.as_ref();

            match self.convert_file(relative_path) {
                Ok(true) => summary.written += 1,
                Ok(false) => summary.skipped += 1,
                Err(err) => Self::skip_or_abort(
                    relative_path,
                    CONVERT_FAILED_MSG,
                    err,
                    &mut summary,
                )?,
            }
        }

        info!(
            "Converted {} files, skipped {}.",
            summary.written, summary.skipped
        );
        Ok(summary)
    }

    fn accepts(&self, relative_path: &Path) -> Option<FileType> {
        let Some(file_type) = classify(relative_path) else {
            error!("{}: {UNKNOWN_FILE_TYPE_MSG}", relative_path.display());
            return None;
        };

        debug!("{}: Type: {file_type}", relative_path.display());

        let Some(flag) = file_type.flag() else {
            warn!("{}: {UNHANDLED_FILE_TYPE_MSG}", relative_path.display());
            return None;
        };

        if !self.file_flags.contains(flag) {
            debug!("{}: {SKIPPED_BY_FLAGS_MSG}", relative_path.display());
            return None;
        }

        Some(file_type)
    }

    /// Converts one game-relative file. Returns whether a unit file was written.
    pub fn convert_file(&self, relative_path: &Path) -> Result<bool, Error> {
        let Some(file_type) = self.accepts(relative_path) else {
            return Ok(false);
        };

        debug!("{}: {CONVERTING_FILE_MSG}", relative_path.display());

        let known = self.source.known_translations(relative_path)?;

        if known.is_some() {
            debug!("{}: {TRANSLATION_EXISTS_MSG}", relative_path.display());
        }

        let units = Extractor::new()
            .known_translations(known.as_deref())
            .extract_file(
                file_type,
                &self.config.game_root().join(relative_path),
            )?;

        if units.is_empty() {
            warn!("{}: {CONVERT_BLANK_MSG}", relative_path.display());
            return Ok(false);
        }

        write_units(
            &self.config.convert_dir().join(unit_file_path(relative_path)),
            &units,
        )?;

        debug!("{}: {CONVERTED_FILE_MSG}", relative_path.display());
        Ok(true)
    }

    /// Restores every file with approved translations into the result root, then overlays the special files.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSystemKey`] if a `System.json` record can't be placed.
    /// - [`Error::Io`] if the download directory can't be listed or the special files can't be copied.
    pub fn restore(&self) -> Result<Summary, Error> {
        info!("{RESTORE_START_MSG}");

        let summary =
            self.restore_files(self.source.approved_translations()?)?;
        self.restore_special()?;

        Ok(summary)
    }

    /// Restores the given files. Order doesn't affect the written files.
    pub fn restore_files<I>(&self, files: I) -> Result<Summary, Error>
    where
        I: IntoIterator<Item = ApprovedFile>,
    {
        let mut summary = Summary::default();

        for file in files {
            match self.restore_file(&file) {
                Ok(true) => summary.written += 1,
                Ok(false) => summary.skipped += 1,
                Err(err) => Self::skip_or_abort(
                    &file.relative_path,
                    RESTORE_FAILED_MSG,
                    err,
                    &mut summary,
                )?,
            }
        }

        info!(
            "Restored {} files, skipped {}.",
            summary.written, summary.skipped
        );
        Ok(summary)
    }

    /// Restores one file. Returns whether a result file was written.
    pub fn restore_file(&self, file: &ApprovedFile) -> Result<bool, Error> {
        let relative_path = file.relative_path.as_path();

        let Some(file_type) = self.accepts(relative_path) else {
            return Ok(false);
        };

        debug!("{}: {RESTORING_FILE_MSG}", relative_path.display());

        let records = match &file.units {
            Ok(units) => units,
            Err(err) => {
                warn!(
                    "{}: {RESTORE_FAILED_MSG}: {err}",
                    relative_path.display()
                );
                return Ok(false);
            }
        };

        let document = Restorer::new().restore_file(
            file_type,
            &self.config.game_root().join(relative_path),
            records,
        )?;

        write_file(
            &self.config.result_dir().join(relative_path),
            document.to_output()?,
        )?;

        debug!("{}: {RESTORED_FILE_MSG}", relative_path.display());
        Ok(true)
    }

    /// Copies the special files directory over the result root, overwriting what's there.
    pub fn restore_special(&self) -> Result<(), Error> {
        let special = self.config.special_dir();

        if !special.is_dir() {
            warn!("{}: {NO_SPECIAL_DIR_MSG}", special.display());
            return Ok(());
        }

        copy_dir(&special, &self.config.result_dir())?;
        debug!("{}: {RESTORED_SPECIAL_MSG}", special.display());
        Ok(())
    }
}

fn copy_dir(from: &Path, to: &Path) -> Result<(), Error> {
    for source in walk_files(from)? {
        let Ok(relative) = source.strip_prefix(from) else {
            continue;
        };

        let target = to.join(relative);

        if let Some(parent) = target.parent() {
            create_dir_all(parent).map_err(|err| Error::CreateDirFailed {
                path: parent.to_path_buf(),
                err,
            })?;
        }

        copy(&source, &target).map_err(|err| Error::Io(source.clone(), err))?;
    }

    Ok(())
}
