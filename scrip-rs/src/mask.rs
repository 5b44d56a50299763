//! File-name masks.
//!
//! A mask is the last path component handed to [`crate::files::find_files`],
//! e.g. `*.qc` or `model_??.[sq]md`.  Masks are compiled once into a
//! case-insensitive, fully anchored [`regex`]:
//!
//! | Mask     | Matches                                   |
//! |----------|-------------------------------------------|
//! | `*`      | any run of characters, including none     |
//! | `?`      | exactly one character                     |
//! | `[abc]`  | one of the listed characters (ranges ok)  |
//! | `[!abc]` | any character not listed (`[^abc]` too)   |
//! | other    | itself, compared case-insensitively       |

use regex::{Regex, RegexBuilder};

/// Error returned when a mask cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    #[error("regex error: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("mask error: {0}")]
    InvalidMask(String),
}

/// A compiled file-name mask.
#[derive(Debug, Clone)]
pub struct FileMask {
    re: Regex,
}

impl FileMask {
    pub fn new(src: &str) -> Result<Self, MaskError> {
        let re = RegexBuilder::new(&mask_to_regex(src)?)
            .case_insensitive(true)
            .build()?;
        Ok(Self { re })
    }

    /// `true` if the whole of `name` matches.
    pub fn matches(&self, name: &str) -> bool {
        self.re.is_match(name)
    }
}

fn mask_to_regex(mask: &str) -> Result<String, MaskError> {
    let mut out = String::with_capacity(mask.len() * 2 + 2);
    out.push('^');
    let mut chars = mask.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                let mut class = String::new();
                let mut closed = false;
                for (i, cc) in chars.by_ref().enumerate() {
                    match cc {
                        ']' if i > 0 => {
                            closed = true;
                            break;
                        }
                        '!' | '^' if i == 0 => class.push('^'),
                        '\\' | '[' | '&' | '~' => {
                            class.push('\\');
                            class.push(cc);
                        }
                        _ => class.push(cc),
                    }
                }
                if !closed {
                    return Err(MaskError::InvalidMask(format!("unterminated `[` in {mask:?}")));
                }
                out.push('[');
                out.push_str(&class);
                out.push(']');
            }
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn m(src: &str) -> FileMask {
        FileMask::new(src).unwrap()
    }

    #[test]
    fn star_and_question() {
        assert!(m("*.qc").matches("player.qc"));
        assert!(m("*.qc").matches(".qc"));
        assert!(!m("*.qc").matches("player.qcx"));
        assert!(m("mdl_??.txt").matches("mdl_01.txt"));
        assert!(!m("mdl_??.txt").matches("mdl_1.txt"));
    }

    #[test]
    fn case_insensitive() {
        assert!(m("*.TXT").matches("readme.txt"));
        assert!(m("Readme").matches("README"));
    }

    #[test]
    fn classes() {
        assert!(m("[sq]md").matches("smd"));
        assert!(m("[sq]md").matches("qmd"));
        assert!(!m("[sq]md").matches("xmd"));
        assert!(m("[!sq]md").matches("xmd"));
        assert!(!m("[^sq]md").matches("smd"));
        assert!(m("v[0-9]").matches("v7"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(m("a+b(1).txt").matches("a+b(1).txt"));
        assert!(!m("a.b").matches("axb"));
    }

    #[test]
    fn unterminated_class_is_error() {
        assert!(matches!(FileMask::new("[abc"), Err(MaskError::InvalidMask(_))));
    }
}
