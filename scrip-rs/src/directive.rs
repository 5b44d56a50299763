//! Directive keywords recognised by the tokenizer.

/// A `$`-prefixed keyword consumed by the tokenizer instead of being returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `$include <path>`
    Include,
    /// `$definemacro <name> [params…] \\` followed by the body.
    DefineMacro,
    /// `$definevariable <name> <value>`
    DefineVariable,
}

impl Directive {
    const ALL: &'static [Directive] =
        &[Directive::Include, Directive::DefineMacro, Directive::DefineVariable];

    /// The keyword as written in scripts.
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Include => "$include",
            Directive::DefineMacro => "$definemacro",
            Directive::DefineVariable => "$definevariable",
        }
    }

    /// Resolve a fully scanned token (case-insensitive).
    pub fn from_token(token: &[u8]) -> Option<Self> {
        if token.first() != Some(&b'$') {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|d| token.eq_ignore_ascii_case(d.keyword().as_bytes()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
