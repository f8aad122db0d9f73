//! Sprinkle entrypoint.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use core_canvas::Canvas;
use core_sprites::ArtParser;

/// Sprinkle ASCII art into the blank space of a text stream read on stdin.
#[derive(Parser, Debug)]
#[command(name = "sprinkle", version, about = "Sprinkle ASCII art into whitespace")]
struct Args {
    /// Path to a file containing sprite definitions.
    #[arg(value_name = "ASCII_ART_FILE")]
    art_file: PathBuf,

    /// Expected width of the text. Art is sprinkled from column 1 up to
    /// this column; lines longer than it are never truncated.
    #[arg(long, default_value_t = 80)]
    soft_max_width: usize,

    /// Seed the random generator, to always produce the same output.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let _log_guard = configure_logging();
    install_panic_hook();

    let args = Args::parse();
    info!(target: "runtime", art_file = %args.art_file.display(), "startup");

    let arts = match load_arts(&args.art_file) {
        Ok(arts) => arts,
        Err(LoadError::Io(err)) => {
            eprintln!("Cannot read file '{}': {err}", args.art_file.display());
            error!(target: "runtime", %err, "cannot open art file");
            return ExitCode::FAILURE;
        }
        Err(LoadError::Parse(err)) => {
            eprintln!(
                "Syntax error in {} line {}: {}",
                args.art_file.display(),
                err.lineno,
                err.message
            );
            if let Some(line) = &err.line {
                eprintln!("{line}");
            }
            error!(target: "runtime", lineno = err.lineno, "sprite parse error");
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout());
    let result = sprinkle_bin::run(
        stdin.lock(),
        &mut stdout,
        &arts,
        args.soft_max_width,
        &mut rng,
    )
    .context("writing sprinkled output");

    if let Err(err) = result {
        eprintln!("{err:#}");
        error!(target: "runtime", %err, "stream error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

enum LoadError {
    Io(io::Error),
    Parse(core_sprites::ParseError),
}

fn load_arts(path: &Path) -> Result<Vec<Canvas>, LoadError> {
    let file = File::open(path).map_err(LoadError::Io)?;
    ArtParser::parse(BufReader::new(file)).map_err(LoadError::Parse)
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("sprinkle.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "sprinkle.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}
