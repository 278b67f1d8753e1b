/* ------------------------------------------------------------------ */
/* Tokenizer: words plus standalone punctuation                      */
/* ------------------------------------------------------------------ */
//
// Pipeline per line:
//   1. drop every char outside the allow-list
//   2. lower-case
//   3. surround each PUNCTUATION char with spaces
//   4. split on whitespace
//
// Apostrophes and hyphens are allowed but not split, so "don't" and
// "well-known" stay single tokens.
//
// Lines are independent, so large corpora are tokenized in parallel with
// rayon; `collect` preserves token order.

use rayon::prelude::*;

/// Chars that become tokens of their own.
pub const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '"', '“', '”', '—',
];

/// Chars kept inside words.
const WORD_MARKS: &[char] = &['\'', '’', '‘', '-'];

fn allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || PUNCTUATION.contains(&c)
        || WORD_MARKS.contains(&c)
}

/// Strip disallowed chars and pad punctuation with spaces.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars().filter(|&c| allowed(c)) {
        if PUNCTUATION.contains(&c) {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

fn tokenize_line(line: &str) -> Vec<String> {
    normalize(line).split_whitespace().map(str::to_string).collect()
}

/// Split raw text into the token stream.
pub fn tokenize(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 64 {
        return lines.iter().flat_map(|line| tokenize_line(line)).collect();
    }
    lines.par_iter().flat_map_iter(|line| tokenize_line(line)).collect()
}
