//! Command-line argument parsing.
//!
//! Usage:
//!   scrip [-L<dir>] [-f[<file>]] [-c<text>] [-edlD] [<script>...]

use std::path::{Path, PathBuf};

// ── Public types ──────────────────────────────────────────────────────────────

pub const USAGE: &str = "Usage: scrip [-L<dir>] [-f[<file>]] [-c<text>] [-edlD] [<script>...]";

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Base directory for relative includes (`-L<dir>`).
    pub basedir: Option<PathBuf>,
    /// Config-file specification.
    pub config: ConfigFile,
    /// Script text to tokenize as a memory buffer (`-c<text>`).
    pub command: Option<String>,
    /// Expression-mode tokens (`-e`).
    pub expr: bool,
    /// Debug logging (`-d`).
    pub debug: bool,
    /// Prefix each token with `origin:line:` (`-l`).
    pub locations: bool,
    /// Print the include tree instead of tokens (`-D`).
    pub deps: bool,
    /// Script files, tokenized in order.
    pub scripts: Vec<PathBuf>,
}

/// How to choose the settings file.
#[derive(Debug, Default)]
pub enum ConfigFile {
    /// Search `~/.scriprc`, `./.scriprc` in order (default).
    #[default]
    Search,
    /// `-f` with no file argument: no settings file.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        if arg == "--" {
            args.scripts.extend(argv[i + 1..].iter().map(PathBuf::from));
            break;
        }

        if !arg.starts_with('-') || arg == "-" {
            args.scripts.push(PathBuf::from(arg));
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'd' => args.debug = true,
                'e' => args.expr = true,
                'l' => args.locations = true,
                'D' => args.deps = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        let file: String = chars[j + 1..].iter().collect();
                        args.config = ConfigFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else {
                        args.config = ConfigFile::Skip;
                    }
                }

                // -c<text>
                'c' => {
                    let text = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err("-c requires a script argument".to_owned());
                    };
                    args.command = Some(text);
                }

                // -L<dir>
                'L' => {
                    let dir = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err("-L requires a directory argument".to_owned());
                    };
                    args.basedir = Some(PathBuf::from(dir));
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    if args.scripts.is_empty() && args.command.is_none() {
        return Err("no script given".to_owned());
    }
    Ok(args)
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Search for the settings file in the standard locations.
/// Returns the first path that exists, or `None`.
pub fn find_user_config() -> Option<PathBuf> {
    let home = std::env::var("HOME").unwrap_or_default();
    [format!("{home}/.scriprc"), "./.scriprc".to_owned()]
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Determine the include base directory.
///
/// Priority: `-L<dir>` flag → `SCRIP_BASEDIR` env var → `basedir` from the
/// settings file → none.
pub fn resolve_base_dir(cli_override: Option<&Path>, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(d) = cli_override {
        return Some(d.to_path_buf());
    }
    if let Some(d) = std::env::var_os("SCRIP_BASEDIR").filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(d));
    }
    configured.map(Path::to_path_buf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
