//! Script tokenizer with `$include`, macro and variable preprocessing.
//!
//! A [`Tokenizer`] is one tokenizing session.  It owns the expansion stack,
//! the macro and variable tables and the file-system collaborator, and hands
//! out one token per call:
//!
//! ```rust
//! use scrip::{MemoryFs, PathMode, Tokenizer};
//!
//! let fs = MemoryFs::new()
//!     .with_file("main.txt", "$definevariable size 64\n$include part.txt\nend")
//!     .with_file("part.txt", "width $size$ // comment\n");
//! let mut t = Tokenizer::new(fs);
//! t.begin_file("main.txt", PathMode::Verbatim).unwrap();
//!
//! let mut tokens = Vec::new();
//! while let Some(tok) = t.next_token(true).unwrap() {
//!     tokens.push(tok.to_vec());
//! }
//! assert_eq!(tokens, [&b"width"[..], b"64", b"end"]);
//! ```
//!
//! ## Scanning
//!
//! Whitespace mode ([`Tokenizer::next_token`]) splits on bytes ≤ 32 and `;`.
//! `"…"` spans are returned verbatim without the quotes.  Unquoted spans
//! splice `$name$` references as they are scanned: a bound macro parameter
//! when the current frame is a macro expansion with parameters, a
//! `$definevariable` value otherwise.
//!
//! Expression mode ([`Tokenizer::next_expr_token`]) splits like C: identifier
//! runs, number runs (`0-9` and `.`), and single-character operators.  Only
//! `$include` is recognised there; nothing is spliced.
//!
//! Both modes skip `;`, `#` and `//` line comments and `/* … */` blocks.
//!
//! Tokens are raw bytes.  Nothing is decoded, so scripts in any 8-bit
//! encoding come out exactly as written.
//!
//! ## Directives
//!
//! Unquoted tokens `$include`, `$definemacro` and `$definevariable` are
//! consumed together with their arguments, and so is `$name` for a defined
//! macro.  The call then carries on to the next real token.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::config::Config;
use crate::cursor::Cursor;
use crate::directive::Directive;
use crate::error::{Position, Result, ScriptError};
use crate::frame::{Frame, FrameSource};
use crate::fs::{DiskFs, ScriptFs};
use crate::macros::{capture_body, MacroDef, MacroTable};
use crate::stack::ExpansionStack;
use crate::var::VarTable;

// ── Public types ──────────────────────────────────────────────────────────────

/// How a script path is turned into a file-system path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Relative paths are joined onto [`Config::base_dir`] when one is set.
    #[default]
    Resolve,
    /// Use the path exactly as given.
    Verbatim,
}

/// Token-splitting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Whitespace-delimited tokens with directives and splicing.
    Words,
    /// C-like expression tokens.
    Expr,
}

/// Passed to the load callback for every script file pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEvent {
    pub path: PathBuf,
    /// Origin and line of the frame that included the file; `None` for the
    /// entry script.
    pub parent: Option<Position>,
}

pub type LoadCallback = Box<dyn FnMut(&LoadEvent)>;

/// An owned token with the position it was produced at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub bytes: Vec<u8>,
    pub position: Position,
}

impl Token {
    /// The token as UTF-8, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

// ── Tokenizer ─────────────────────────────────────────────────────────────────

pub struct Tokenizer<F: ScriptFs = DiskFs> {
    fs: F,
    config: Config,
    stack: ExpansionStack,
    macros: MacroTable,
    vars: VarTable,
    /// Bytes of the token being scanned or last returned.
    token: Vec<u8>,
    token_at: Option<Position>,
    /// Set by `unget_token`: the next get returns `token` again.
    token_ready: bool,
    has_token: bool,
    ended: bool,
    on_load: Option<LoadCallback>,
}

impl<F: ScriptFs> std::fmt::Debug for Tokenizer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("depth", &self.stack.depth())
            .field("status", &self.status())
            .field("macros", &self.macros.len())
            .field("variables", &self.vars.len())
            .finish()
    }
}

impl<F: ScriptFs> Tokenizer<F> {
    pub fn new(fs: F) -> Self {
        Self::with_config(fs, Config::default())
    }

    pub fn with_config(fs: F, config: Config) -> Self {
        Self {
            fs,
            stack: ExpansionStack::new(config.max_depth),
            config,
            macros: MacroTable::new(),
            vars: VarTable::new(),
            token: Vec::new(),
            token_at: None,
            token_ready: false,
            has_token: false,
            ended: false,
            on_load: None,
        }
    }

    // ── Session setup ─────────────────────────────────────────────────────────

    /// Start tokenizing the file at `path`.  Macro and variable definitions
    /// from earlier scripts stay in effect.
    pub fn begin_file(&mut self, path: impl AsRef<Path>, mode: PathMode) -> Result<()> {
        self.reset();
        self.push_file(path.as_ref(), mode)
    }

    /// Start tokenizing an in-memory buffer.  Its frame is labelled
    /// `"memory buffer"` and is never popped.
    pub fn begin_memory(&mut self, bytes: impl Into<Vec<u8>>) {
        self.reset();
        debug!("entering memory buffer");
        if self.stack.push(Frame::memory(bytes.into())).is_err() {
            unreachable!("an empty stack holds at least one frame");
        }
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.token.clear();
        self.token_at = None;
        self.token_ready = false;
        self.has_token = false;
        self.ended = false;
    }

    /// Install the hook called for every script file loaded.  Returns the
    /// previous hook.
    pub fn set_load_callback(&mut self, cb: Option<LoadCallback>) -> Option<LoadCallback> {
        std::mem::replace(&mut self.on_load, cb)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    pub fn variables(&self) -> &VarTable {
        &self.vars
    }

    /// Frames on the expansion stack.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// `true` once end-of-script has been reported.
    pub fn at_end(&self) -> bool {
        self.ended
    }

    /// The most recently returned token.  Empty before the first token and
    /// at end of script.
    pub fn token(&self) -> &[u8] {
        if self.has_token {
            self.token.as_slice()
        } else {
            &[]
        }
    }

    /// Where the most recently returned token was produced.
    pub fn token_position(&self) -> Option<&Position> {
        self.token_at.as_ref()
    }

    /// Origin and line of the current frame; `None` before a script has been
    /// begun and after it has ended.
    pub fn status(&self) -> Option<Position> {
        if self.ended {
            return None;
        }
        self.stack.current().map(Frame::position)
    }

    // ── Pull API ──────────────────────────────────────────────────────────────

    /// Next whitespace-delimited token, or `None` at end of script.
    ///
    /// With `crossline == false` the token must start on the current line:
    /// reaching a newline, a comment or the end of input first is
    /// [`ScriptError::LineIncomplete`].
    pub fn next_token(&mut self, crossline: bool) -> Result<Option<&[u8]>> {
        self.next_in_mode(crossline, ScanMode::Words)
    }

    /// Next expression-mode token, or `None` at end of script.
    pub fn next_expr_token(&mut self, crossline: bool) -> Result<Option<&[u8]>> {
        self.next_in_mode(crossline, ScanMode::Expr)
    }

    /// Give the last token back: the next get returns it again without
    /// scanning.  Only one token of lookahead exists.
    pub fn unget_token(&mut self) -> Result<()> {
        if !self.has_token || self.token_ready {
            return Err(ScriptError::InvalidUnget);
        }
        self.token_ready = true;
        Ok(())
    }

    /// `true` if another token starts before the next newline of the current
    /// frame.
    pub fn token_available(&self) -> bool {
        if self.token_ready {
            return true;
        }
        if self.ended {
            return false;
        }
        let Some(frame) = self.stack.current() else {
            return false;
        };
        let rest = frame.cursor.rest();
        let Some(i) = rest.iter().position(|&b| b == b'\n' || b > b' ') else {
            return false;
        };
        !(rest[i] == b'\n' || rest[i] == b';' || rest[i] == b'#' || rest[i..].starts_with(b"//"))
    }

    /// Iterate over the remaining tokens with `crossline = true`.  Iteration
    /// stops after the first error.
    pub fn tokens(&mut self, mode: ScanMode) -> Tokens<'_, F> {
        Tokens { tz: self, mode, failed: false }
    }

    fn next_in_mode(&mut self, crossline: bool, mode: ScanMode) -> Result<Option<&[u8]>> {
        if self.token_ready {
            self.token_ready = false;
            return Ok(Some(self.token.as_slice()));
        }
        if self.ended {
            self.has_token = false;
            return Ok(None);
        }
        if self.stack.is_empty() {
            return Err(ScriptError::NotStarted);
        }

        loop {
            let Some(quoted) = self.scan(crossline, mode)? else {
                self.has_token = false;
                debug!("end of script");
                return Ok(None);
            };
            if !quoted && self.dispatch(mode)? {
                continue;
            }
            self.token_at = Some(self.here());
            self.has_token = true;
            trace!("{}: {:?}", self.here(), String::from_utf8_lossy(&self.token));
            return Ok(Some(self.token.as_slice()));
        }
    }

    // ── Stack operations ──────────────────────────────────────────────────────

    /// Load `path` and make it the current frame.
    pub fn push_file(&mut self, path: &Path, mode: PathMode) -> Result<()> {
        let resolved = self.resolve(path, mode);
        if self.stack.is_full() {
            return Err(self.too_deep());
        }
        let bytes = match self.fs.load(&resolved) {
            Ok(b) => b,
            Err(source) if self.stack.is_empty() => {
                return Err(ScriptError::Load { path: resolved, source });
            }
            Err(source) => {
                return Err(ScriptError::Include { path: resolved, at: self.here(), source });
            }
        };
        if let Some(cb) = self.on_load.as_mut() {
            cb(&LoadEvent {
                path: resolved.clone(),
                parent: self.stack.current().map(Frame::position),
            });
        }
        let frame = Frame::file(resolved.display().to_string(), bytes);
        self.stack.push(frame).map_err(|_| self.too_deep())
    }

    /// Invoke macro `name` if one is defined: read one actual parameter per
    /// formal parameter from the current frame, then push a frame over a copy
    /// of the body.  Returns `false` when no such macro exists.
    pub fn push_macro(&mut self, name: &[u8]) -> Result<bool> {
        let Some(def) = self.macros.get(name) else {
            return Ok(false);
        };
        let origin = String::from_utf8_lossy(&def.name).into_owned();
        let (arity, formals, body, line) = (def.arity(), def.params.clone(), def.body.clone(), def.line);
        if self.stack.is_full() {
            return Err(self.too_deep());
        }

        let mut bound = Vec::with_capacity(arity);
        let mut used = 0;
        for formal in formals {
            let value = self.raw_token()?;
            used += value.len() + 1;
            if used >= self.config.macro_buffer_len {
                return Err(ScriptError::MacroBufferOverflow { name: origin, at: self.here() });
            }
            bound.push((formal, value));
        }

        debug!("expanding macro {origin} with {} arguments", bound.len());
        let frame = Frame::expansion(origin, body, line, bound);
        self.stack.push(frame).map_err(|_| self.too_deep())?;
        Ok(true)
    }

    /// Leave the current frame.  Returns `true` if a parent frame resumed and
    /// `false` if the script is over.  The in-memory entry frame is never
    /// popped.
    pub fn pop(&mut self) -> bool {
        match self.stack.current() {
            Some(frame) if frame.source != FrameSource::Memory => {
                self.stack.pop();
                if self.stack.is_empty() {
                    self.ended = true;
                    false
                } else {
                    true
                }
            }
            _ => {
                self.ended = true;
                false
            }
        }
    }

    fn resolve(&self, path: &Path, mode: PathMode) -> PathBuf {
        match (&self.config.base_dir, mode) {
            (Some(base), PathMode::Resolve) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    // ── Scanning ──────────────────────────────────────────────────────────────

    fn here(&self) -> Position {
        self.stack
            .current()
            .map(Frame::position)
            .unwrap_or_else(|| Position::new("<no script>", 0))
    }

    fn too_deep(&self) -> ScriptError {
        ScriptError::TooManyIncludes { limit: self.stack.capacity(), at: self.here() }
    }

    fn cursor(&mut self) -> Result<&mut Cursor> {
        self.stack
            .current_mut()
            .map(|f| &mut f.cursor)
            .ok_or(ScriptError::NotStarted)
    }

    fn line_incomplete(&self) -> ScriptError {
        ScriptError::LineIncomplete { at: self.here() }
    }

    /// End of the current buffer: pop, or report end of script.
    fn end_of_buffer(&mut self, crossline: bool) -> Result<bool> {
        if !crossline {
            return Err(self.line_incomplete());
        }
        Ok(self.pop())
    }

    /// Scan one token into `self.token`.  Returns whether it was quoted, or
    /// `None` at end of script.
    fn scan(&mut self, crossline: bool, mode: ScanMode) -> Result<Option<bool>> {
        if !self.skip_to_token(crossline)? {
            return Ok(None);
        }
        self.token.clear();
        if self.cursor()?.peek() == Some(b'"') {
            self.scan_quoted()?;
            return Ok(Some(true));
        }
        match mode {
            ScanMode::Words => self.scan_word()?,
            ScanMode::Expr => self.scan_expr()?,
        }
        Ok(Some(false))
    }

    /// Skip whitespace and comments, popping exhausted frames.  Returns
    /// `false` at end of script.
    fn skip_to_token(&mut self, crossline: bool) -> Result<bool> {
        loop {
            let c = self.cursor()?;
            match (c.peek(), c.peek_at(1)) {
                (None, _) => {
                    if !self.end_of_buffer(crossline)? {
                        return Ok(false);
                    }
                }
                (Some(b'\n'), _) => {
                    if !crossline {
                        return Err(self.line_incomplete());
                    }
                    let c = self.cursor()?;
                    c.bump();
                    c.newline();
                }
                (Some(b), _) if b <= b' ' => {
                    c.bump();
                }
                (Some(b';' | b'#'), _) | (Some(b'/'), Some(b'/')) => {
                    if !crossline {
                        return Err(self.line_incomplete());
                    }
                    if !self.skip_line_comment()? {
                        return Ok(false);
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    if !crossline {
                        return Err(self.line_incomplete());
                    }
                    self.skip_block_comment()?;
                }
                (Some(_), _) => return Ok(true),
            }
        }
    }

    /// Consume through the end of the line.  Returns `false` if that ended
    /// the script.
    fn skip_line_comment(&mut self) -> Result<bool> {
        loop {
            let c = self.cursor()?;
            match c.bump() {
                Some(b'\n') => {
                    c.newline();
                    return Ok(true);
                }
                Some(_) => {}
                None => return self.end_of_buffer(true),
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        let start = self.here();
        let c = self.cursor()?;
        c.seek(c.pos() + 2);
        loop {
            if c.starts_with(b"*/") {
                c.seek(c.pos() + 2);
                return Ok(());
            }
            match c.bump() {
                Some(b'\n') => c.newline(),
                Some(_) => {}
                None => return Err(ScriptError::UnterminatedComment { at: start }),
            }
        }
    }

    fn push_byte(&mut self, b: u8) -> Result<()> {
        self.token.push(b);
        self.check_token_len()
    }

    fn check_token_len(&self) -> Result<()> {
        if self.token.len() > self.config.max_token_len {
            return Err(ScriptError::TokenTooLarge {
                limit: self.config.max_token_len,
                at: self.here(),
            });
        }
        Ok(())
    }

    /// `"…"`: everything up to the closing quote or the end of the buffer.
    fn scan_quoted(&mut self) -> Result<()> {
        self.cursor()?.bump();
        loop {
            let c = self.cursor()?;
            match c.bump() {
                None | Some(b'"') => return Ok(()),
                Some(b) => {
                    if b == b'\n' {
                        c.newline();
                    }
                    self.push_byte(b)?;
                }
            }
        }
    }

    fn scan_word(&mut self) -> Result<()> {
        loop {
            match self.cursor()?.peek() {
                None => return Ok(()),
                Some(b) if b <= b' ' || b == b';' => return Ok(()),
                Some(b'$') if self.splice()? => {}
                Some(b) => {
                    self.cursor()?.bump();
                    self.push_byte(b)?;
                }
            }
        }
    }

    fn scan_expr(&mut self) -> Result<()> {
        let Some(first) = self.cursor()?.peek() else {
            return Ok(());
        };
        let keep: fn(u8) -> bool = if first.is_ascii_alphabetic() || first == b'_' {
            is_ident_byte
        } else if first.is_ascii_digit() || first == b'.' {
            |b| b.is_ascii_digit() || b == b'.'
        } else {
            self.cursor()?.bump();
            return self.push_byte(first);
        };
        while let Some(b) = self.cursor()?.peek().filter(|&b| keep(b)) {
            self.cursor()?.bump();
            self.push_byte(b)?;
        }
        Ok(())
    }

    /// At a `$`: replace a `$name$` reference with its value.  Returns
    /// `false`, consuming nothing, when there is no closing `$` before a
    /// control character or the end of the buffer.
    fn splice(&mut self) -> Result<bool> {
        let Some(frame) = self.stack.current() else {
            return Err(ScriptError::NotStarted);
        };
        let rest = frame.cursor.rest();
        let Some(len) = rest[1..].iter().position(|&b| b <= b' ' || b == b'$') else {
            return Ok(false);
        };
        if rest[1 + len] != b'$' {
            return Ok(false);
        }
        let name = &rest[1..1 + len];

        let value = if frame.is_expansion() {
            match frame.param(name) {
                Some(v) => v.to_vec(),
                None => {
                    let name = String::from_utf8_lossy(name).into_owned();
                    return Err(ScriptError::UnknownMacroParameter { name, at: self.here() });
                }
            }
        } else {
            match self.vars.lookup(name, self.config.variable_match) {
                Some(v) => v.to_vec(),
                None => {
                    let name = String::from_utf8_lossy(name).into_owned();
                    return Err(ScriptError::UnknownVariable { name, at: self.here() });
                }
            }
        };

        // The closing `$` lies inside `rest`, so this never passes the end.
        let resume = frame.cursor.pos() + len + 2;
        debug_assert!(resume <= frame.cursor.end());
        self.cursor()?.seek(resume);
        self.token.extend_from_slice(&value);
        self.check_token_len()?;
        Ok(true)
    }

    /// Next token on the current line, with splicing but no directive
    /// dispatch.  Used for directive arguments and macro parameters.
    fn raw_token(&mut self) -> Result<Vec<u8>> {
        match self.scan(false, ScanMode::Words)? {
            Some(_) => Ok(self.token.clone()),
            None => Err(self.line_incomplete()),
        }
    }

    // ── Directives ────────────────────────────────────────────────────────────

    /// Handle the unquoted token just scanned if it is a directive or macro
    /// invocation.  Returns `true` if it was consumed.
    fn dispatch(&mut self, mode: ScanMode) -> Result<bool> {
        if mode == ScanMode::Expr {
            return self.expr_include();
        }
        match Directive::from_token(&self.token) {
            Some(Directive::Include) => {
                let path = self.raw_token()?;
                self.push_file(&bytes_to_path(&path), PathMode::Resolve)?;
                Ok(true)
            }
            Some(Directive::DefineMacro) => {
                let name = self.raw_token()?;
                self.define_macro(name)?;
                Ok(true)
            }
            Some(Directive::DefineVariable) => {
                let name = self.raw_token()?;
                let value = self.raw_token()?;
                debug!(
                    "{}: variable {} = {:?}",
                    self.here(),
                    String::from_utf8_lossy(&name),
                    String::from_utf8_lossy(&value)
                );
                self.vars.define(name, value);
                Ok(true)
            }
            None => match self.token.strip_prefix(b"$") {
                Some(name) if !name.is_empty() => {
                    let name = name.to_vec();
                    self.push_macro(&name)
                }
                _ => Ok(false),
            },
        }
    }

    /// `$` followed directly by `include` in expression mode.
    fn expr_include(&mut self) -> Result<bool> {
        const KEYWORD: &[u8] = b"include";
        if self.token != b"$" {
            return Ok(false);
        }
        let c = self.cursor()?;
        let rest = c.rest();
        let is_keyword = rest.len() >= KEYWORD.len()
            && rest[..KEYWORD.len()].eq_ignore_ascii_case(KEYWORD)
            && !rest.get(KEYWORD.len()).is_some_and(|&b| is_ident_byte(b));
        if !is_keyword {
            return Ok(false);
        }
        c.seek(c.pos() + KEYWORD.len());
        let path = self.raw_token()?;
        self.push_file(&bytes_to_path(&path), PathMode::Resolve)?;
        Ok(true)
    }

    /// Read formal parameters up to a `\\` token or the end of the line, then
    /// capture the body.
    fn define_macro(&mut self, name: Vec<u8>) -> Result<()> {
        let line = self.here().line;
        let label = String::from_utf8_lossy(&name).into_owned();
        let mut params: Vec<Vec<u8>> = Vec::new();
        let mut used = 0;
        let mut mark = self.cursor()?.pos();

        while self.token_available() {
            let param = self.raw_token()?;
            if param.starts_with(b"\\\\") {
                break;
            }
            mark = self.cursor()?.pos();
            if params.len() >= self.config.max_macro_params {
                return Err(ScriptError::TooManyParameters {
                    name: label,
                    limit: self.config.max_macro_params,
                    at: self.here(),
                });
            }
            if params.iter().any(|p| p.eq_ignore_ascii_case(&param)) {
                let param = String::from_utf8_lossy(&param).into_owned();
                return Err(ScriptError::DuplicateParameter { name: label, param, at: self.here() });
            }
            used += param.len() + 1;
            if used >= self.config.macro_buffer_len {
                return Err(ScriptError::MacroBufferOverflow { name: label, at: self.here() });
            }
            params.push(param);
        }

        let c = self.cursor()?;
        c.seek(mark);
        let (body, consumed) = capture_body(c.rest());
        let newlines = body.iter().filter(|&&b| b == b'\n').count() as u32;
        c.seek(mark + consumed);
        c.add_lines(newlines);

        debug!("{}: macro {label} ({} params, {} body bytes)", self.here(), params.len(), body.len());
        self.macros.define(MacroDef::new(name, params, body, line));
        Ok(())
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A script path names the file by its raw bytes.
#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

// ── Tokens ────────────────────────────────────────────────────────────────────

/// Iterator returned by [`Tokenizer::tokens`].
pub struct Tokens<'a, F: ScriptFs> {
    tz: &'a mut Tokenizer<F>,
    mode: ScanMode,
    failed: bool,
}

impl<F: ScriptFs> Iterator for Tokens<'_, F> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.tz.next_in_mode(true, self.mode) {
            Ok(Some(bytes)) => {
                let bytes = bytes.to_vec();
                let position = self.tz.token_at.clone().unwrap_or_else(|| self.tz.here());
                Some(Ok(Token { bytes, position }))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
