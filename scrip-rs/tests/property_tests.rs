use proptest::prelude::*;
use scrip::{MemoryFs, PathMode, ScanMode, Tokenizer};

fn words(src: &str) -> Vec<String> {
    let mut t = Tokenizer::new(MemoryFs::new());
    t.begin_memory(src);
    t.tokens(ScanMode::Words)
        .map(|r| r.unwrap_or_else(|e| panic!("{e}")).to_string_lossy().into_owned())
        .collect()
}

fn raw_words(src: &[u8]) -> Vec<Vec<u8>> {
    let mut t = Tokenizer::new(MemoryFs::new());
    t.begin_memory(src);
    t.tokens(ScanMode::Words)
        .map(|r| r.unwrap_or_else(|e| panic!("{e}")).bytes)
        .collect()
}

/// A plain word: no whitespace, quotes, comment starters or `$`.
fn word() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.,:+=-]{1,12}"
}

/// Any bytes that cannot start a comment, quote or directive, UTF-8 or not.
fn byte_word() -> impl Strategy<Value = Vec<u8>> {
    let byte = any::<u8>().prop_filter("word byte", |&b| b > b' ' && !b";#/\"$".contains(&b));
    prop::collection::vec(byte, 1..12)
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("\t"), Just("\n"), Just("  \r\n ")]
}

proptest! {
    /// Without directives the tokens are exactly the whitespace-separated words.
    #[test]
    fn plain_words_split_on_whitespace(
        parts in prop::collection::vec((word(), separator()), 0..40)
    ) {
        let src: String = parts.iter().map(|(w, s)| format!("{w}{s}")).collect();
        let expected: Vec<String> = parts.into_iter().map(|(w, _)| w).collect();
        prop_assert_eq!(words(&src), expected);
    }

    /// Word bytes come back exactly as written, whatever their encoding.
    #[test]
    fn word_bytes_pass_through_unchanged(
        parts in prop::collection::vec(byte_word(), 0..20)
    ) {
        let src = parts.join(&b' ');
        prop_assert_eq!(raw_words(&src), parts);
    }

    /// Quoted spans come back whole and without their quotes.
    #[test]
    fn quoted_spans_are_single_tokens(
        inner in "[A-Za-z0-9 ;#/$]{0,30}",
        before in word(),
    ) {
        let src = format!("{before} \"{inner}\" end");
        prop_assert_eq!(words(&src), vec![before, inner, "end".to_owned()]);
    }

    /// Tokenizing already expanded output again changes nothing.
    #[test]
    fn expansion_output_is_a_fixed_point(
        a in word(),
        b in word(),
        tail in prop::collection::vec(word(), 0..8),
    ) {
        let src = format!(
            "$definevariable va {a}\n$definemacro m x y \\\\\n$x$/$y$\n$m {a} {b} $va$\n{}",
            tail.join(" ")
        );
        let once = words(&src);
        let again = words(&once.join("\n"));
        prop_assert_eq!(&again, &once);
        prop_assert_eq!(&once[..2], &[format!("{a}/{b}"), a.clone()][..]);
    }

    /// An unget replays the same token without moving the line counter.
    #[test]
    fn unget_replays_without_advancing(
        parts in prop::collection::vec((word(), separator()), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let src: String = parts.iter().map(|(w, s)| format!("{w}{s}")).collect();
        let n = pick.index(parts.len());
        let mut t = Tokenizer::new(MemoryFs::new());
        t.begin_memory(src);
        for _ in 0..n {
            t.next_token(true).unwrap();
        }
        let tok = t.next_token(true).unwrap().map(<[u8]>::to_vec);
        let line = t.status().map(|p| p.line);
        t.unget_token().unwrap();
        prop_assert_eq!(t.status().map(|p| p.line), line);
        prop_assert_eq!(t.next_token(true).unwrap().map(<[u8]>::to_vec), tok);
        prop_assert_eq!(t.status().map(|p| p.line), line);
    }

    /// A comment line yields no tokens and costs exactly one line.
    #[test]
    fn comment_lines_cost_one_line(
        marker in prop_oneof![Just("#"), Just(";"), Just("//")],
        text in "[ A-Za-z0-9$\"]{0,20}",
        comments in 1usize..6,
    ) {
        let mut src = String::from("first\n");
        for _ in 0..comments {
            src.push_str(&format!("{marker}{text}\n"));
        }
        src.push_str("last");
        let mut t = Tokenizer::new(MemoryFs::new());
        t.begin_memory(src);
        prop_assert_eq!(t.next_token(true).unwrap(), Some(&b"first"[..]));
        prop_assert_eq!(t.next_token(true).unwrap(), Some(&b"last"[..]));
        prop_assert_eq!(t.status().unwrap().line, comments as u32 + 2);
    }

    /// Lines after an include keep their own numbering.
    #[test]
    fn include_does_not_shift_parent_lines(
        child_lines in 0usize..10,
        after in 1usize..5,
    ) {
        let child = "x\n".repeat(child_lines);
        let main = format!("$include c.txt{}last", "\n".repeat(after));
        let fs = MemoryFs::new().with_file("main.txt", main).with_file("c.txt", child);
        let mut t = Tokenizer::new(fs);
        t.begin_file("main.txt", PathMode::Verbatim).unwrap();
        let toks: Vec<_> = t.tokens(ScanMode::Words).map(|r| r.unwrap()).collect();
        prop_assert_eq!(toks.len(), child_lines + 1);
        let last = &toks[child_lines];
        prop_assert_eq!(last.as_str(), Some("last"));
        prop_assert_eq!(last.position.origin.as_str(), "main.txt");
        prop_assert_eq!(last.position.line as usize, after + 1);
    }

    /// Arbitrary input never panics; it tokenizes or fails with an error.
    #[test]
    fn arbitrary_bytes_do_not_panic(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        let mut t = Tokenizer::new(MemoryFs::new());
        t.begin_memory(bytes);
        for r in t.tokens(ScanMode::Words).take(500) {
            if r.is_err() {
                break;
            }
        }
    }
}
