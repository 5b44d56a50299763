use std::collections::HashMap;
use std::error::Error;
use std::io::{self, Write};

use log::{LevelFilter, Log, Metadata, Record};

use scrip::cli::{self, CliArgs, ConfigFile};
use scrip::{Config, DiskFs, LoadEvent, PathMode, ScanMode, Tokenizer};

// ── Logging ───────────────────────────────────────────────────────────────────

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("scrip: {}: {}", record.level().as_str().to_lowercase(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("scrip: {e}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if args.debug { LevelFilter::Debug } else { LevelFilter::Warn });
    }

    if let Err(e) = run(args) {
        eprintln!("scrip: {e}");
        std::process::exit(1);
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

fn load_config(args: &CliArgs) -> Config {
    let path = match &args.config {
        ConfigFile::Skip => None,
        ConfigFile::Explicit(p) => Some(p.clone()),
        ConfigFile::Search => cli::find_user_config(),
    };
    let mut config = match path {
        None => Config::default(),
        Some(p) => match Config::load_file(&p) {
            Ok((config, errors)) => {
                for e in errors {
                    log::warn!("{}: {e}", p.display());
                }
                config
            }
            Err(e) => {
                log::warn!("can't read {}: {e}", p.display());
                Config::default()
            }
        },
    };
    config.base_dir = cli::resolve_base_dir(args.basedir.as_deref(), config.base_dir.as_deref());
    config
}

// ── Tokenizing ────────────────────────────────────────────────────────────────

/// Prints each loaded file indented under the file that included it.
fn dependency_printer() -> Box<dyn FnMut(&LoadEvent)> {
    let mut depths: HashMap<String, usize> = HashMap::new();
    Box::new(move |ev: &LoadEvent| {
        let depth = ev
            .parent
            .as_ref()
            .and_then(|p| depths.get(&p.origin))
            .map_or(0, |d| d + 1);
        let path = ev.path.display().to_string();
        println!("{}{path}", "  ".repeat(depth));
        depths.insert(path, depth);
    })
}

fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args);
    let mut tz = Tokenizer::with_config(DiskFs, config);
    if args.deps {
        tz.set_load_callback(Some(dependency_printer()));
    }
    let mode = if args.expr { ScanMode::Expr } else { ScanMode::Words };

    for script in &args.scripts {
        tz.begin_file(script, PathMode::Verbatim)?;
        print_tokens(&mut tz, mode, &args)?;
    }
    if let Some(text) = &args.command {
        tz.begin_memory(text.as_bytes());
        print_tokens(&mut tz, mode, &args)?;
    }
    Ok(())
}

/// Tokens are written as raw bytes, one per line.
fn print_tokens(tz: &mut Tokenizer, mode: ScanMode, args: &CliArgs) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout().lock();
    for tok in tz.tokens(mode) {
        let tok = tok?;
        if args.deps {
            continue;
        }
        if args.locations {
            write!(out, "{}:", tok.position)?;
        }
        out.write_all(&tok.bytes)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
