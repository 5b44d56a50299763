//! Variable table for `$definevariable`.
//!
//! `$definevariable name value` records a literal replacement; `$name$` in a
//! later unquoted token splices `value` in place.  Definitions are never
//! removed, and redefinitions do not replace earlier entries: lookup walks the
//! table in definition order and takes the first match.

/// How a `$name$` reference is compared against defined variable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableMatch {
    /// Whole-name, case-insensitive comparison.
    #[default]
    Exact,
    /// Legacy comparison: only the first `len - 2` bytes of the reference are
    /// compared, case-insensitively, against the start of the defined name.
    /// References shorter than two bytes are compared whole.
    Prefix,
}

impl VariableMatch {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Some(VariableMatch::Exact),
            "prefix" => Some(VariableMatch::Prefix),
            _ => None,
        }
    }

    fn matches(self, defined: &[u8], reference: &[u8]) -> bool {
        match self {
            VariableMatch::Exact => defined.eq_ignore_ascii_case(reference),
            VariableMatch::Prefix => {
                let Some(n) = reference.len().checked_sub(2) else {
                    return defined.eq_ignore_ascii_case(reference);
                };
                prefix_eq_ignore_case(defined, reference, n)
            }
        }
    }
}

/// `strnicmp(a, b, n) == 0`: compare at most `n` bytes, stopping early when
/// both strings end together.
fn prefix_eq_ignore_case(a: &[u8], b: &[u8], n: usize) -> bool {
    for i in 0..n {
        let (ca, cb) = (a.get(i), b.get(i));
        match (ca, cb) {
            (None, None) => return true,
            (Some(x), Some(y)) if x.eq_ignore_ascii_case(y) => {}
            _ => return false,
        }
    }
    true
}

/// Ordered `name → value` table.  Names and values are raw script bytes.
#[derive(Debug, Default)]
pub struct VarTable {
    vars: Vec<(Vec<u8>, Vec<u8>)>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition.
    pub fn define(&mut self, name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.vars.push((name.into(), value.into()));
    }

    /// Value of the first variable matching `name` under `mode`.
    pub fn lookup(&self, name: &[u8], mode: VariableMatch) -> Option<&[u8]> {
        self.vars
            .iter()
            .find(|(defined, _)| mode.matches(defined, name))
            .map(|(_, value)| value.as_slice())
    }

    /// Exact, case-insensitive lookup.
    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<&[u8]> {
        self.lookup(name.as_ref(), VariableMatch::Exact)
    }

    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.vars.iter().map(|(n, v)| (n.as_slice(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
