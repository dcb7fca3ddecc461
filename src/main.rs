use clap::{Parser, Subcommand};
use dlomc_localization::{
    config::{Config, DEFAULT_GAME_NAME},
    processors::Processor,
    source::DownloadDir,
    types::{Error, FileFlags, Mode, Summary},
};
use env_logger::{Builder, Env};
use log::{error, info};
use std::{path::PathBuf, process::ExitCode};

/// Converts game text into translation unit files, and restores approved translations back into game files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Project root, every other directory is resolved against it
    #[arg(long, env = "PATH_ROOT", default_value = ".", global = true)]
    root: PathBuf,
    /// Directory holding unpacked game releases
    #[arg(long, env = "PATH_ORIGINAL", global = true)]
    original: Option<PathBuf>,
    /// Output directory of the convert phase
    #[arg(long, env = "PATH_CONVERT", global = true)]
    convert: Option<PathBuf>,
    /// Directory with translation unit files downloaded from the platform
    #[arg(long, env = "PATH_DOWNLOAD", global = true)]
    download: Option<PathBuf>,
    /// Output directory of the restore phase
    #[arg(long, env = "PATH_RESULT", global = true)]
    result: Option<PathBuf>,
    /// Hand-maintained files copied over the restore output
    #[arg(long, env = "PATH_SPECIAL", global = true)]
    special: Option<PathBuf>,
    /// Scratch directory, cleaned before every convert
    #[arg(long, env = "PATH_TMP", global = true)]
    tmp: Option<PathBuf>,
    #[arg(
        long,
        env = "GAME_NAME",
        default_value = DEFAULT_GAME_NAME,
        global = true
    )]
    game_name: String,
    #[arg(long, env = "GAME_VERSION", default_value = "", global = true)]
    game_version: String,
    /// Process only these file types: map, commonevents, system, items, skills, mapinfos, quests
    #[arg(long, value_delimiter = ',', global = true)]
    only: Vec<FileFlags>,
    /// Clean the phase's output directory first
    #[arg(long, global = true)]
    clean: bool,
    /// Log filter in `RUST_LOG` syntax, e.g. `debug`. Overrides `RUST_LOG`
    #[arg(long, env = "PROJECT_LOG_LEVEL", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Extract translation units from the game files
    Convert,
    /// Write approved translations into copies of the game files
    Restore,
}

impl From<Command> for Mode {
    fn from(command: Command) -> Self {
        match command {
            Command::Convert => Self::Convert,
            Command::Restore => Self::Restore,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new(&self.root)
            .game_name(&self.game_name)
            .game_version(&self.game_version);

        if let Some(path) = &self.original {
            config = config.original(path);
        }
        if let Some(path) = &self.convert {
            config = config.convert(path);
        }
        if let Some(path) = &self.download {
            config = config.download(path);
        }
        if let Some(path) = &self.result {
            config = config.result(path);
        }
        if let Some(path) = &self.special {
            config = config.special(path);
        }
        if let Some(path) = &self.tmp {
            config = config.tmp(path);
        }

        config
    }

    fn file_flags(&self) -> FileFlags {
        if self.only.is_empty() {
            return FileFlags::default();
        }

        self.only
            .iter()
            .fold(FileFlags::empty(), |flags, flag| flags | *flag)
    }
}

fn run(cli: &Cli) -> Result<Summary, Error> {
    let mode: Mode = cli.command.map(Mode::from).unwrap_or_default();
    let config = cli.config();
    let source = DownloadDir::new(config.download_dir());

    let mut processor = Processor::new(config, &source);
    processor.set_files(cli.file_flags());

    if cli.clean {
        processor.clean_output(mode)?;
    }

    match mode {
        Mode::Convert => {
            Processor::clean(&[processor.config().tmp_dir()])?;
            processor.convert()
        }
        Mode::Restore => processor.restore(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder =
        Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(filters) = &cli.log_level {
        builder.parse_filters(filters);
    }
    builder.init();

    match run(&cli) {
        Ok(summary) => {
            info!(
                "Done: {} written, {} skipped.",
                summary.written, summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
