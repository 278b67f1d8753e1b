/* ------------------------------------------------------------------ */
/* Vectorizer: text ⇄ one-hot vectors                                */
/* ------------------------------------------------------------------ */
//
//   fit(text)                               → Vocabulary
//   transform(&vocab, text)                 → Vec<OneHot>
//   inverse_transform(&vocab, probs, t, rng) → String
//
// A one-hot vector is stored as (index, dim). A corpus of ~30K tokens over
// a ~3K vocabulary would be ~90M dense floats, so rows are only expanded
// when a batch or a single window is handed to the model.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::rng::Rng;
use crate::tokenizer::tokenize;
use crate::vocab::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OneHot {
    pub index: usize,
    pub dim:   usize,
}

impl OneHot {
    pub fn new(index: usize, dim: usize) -> Self {
        debug_assert!(index < dim);
        Self { index, dim }
    }

    pub fn to_dense(&self) -> Vec<f32> {
        let mut v = vec![0.0; self.dim];
        v[self.index] = 1.0;
        v
    }

    /// Write this vector into a zeroed row of length `dim`.
    pub fn write_into(&self, row: &mut [f32]) {
        row[self.index] = 1.0;
    }
}

// ── fit / transform ───────────────────────────────────────────────────────

pub fn fit(text: &str) -> Vocabulary {
    let vocab = Vocabulary::from_tokens(tokenize(text));
    debug!(vocab_size = vocab.len(), "fitted vocabulary");
    vocab
}

pub fn transform(vocab: &Vocabulary, text: &str) -> Result<Vec<OneHot>> {
    let tokens = tokenize(text);
    if vocab.is_empty() && !tokens.is_empty() {
        return Err(Error::EmptyVocabulary);
    }
    let dim = vocab.len();
    tokens
        .par_iter()
        .map(|tok| {
            vocab
                .id(tok)
                .map(|i| OneHot::new(i, dim))
                .ok_or_else(|| Error::UnknownToken(tok.clone()))
        })
        .collect()
}

// ── Sampling ──────────────────────────────────────────────────────────────
//
// p'_i = exp(ln(p_i) / t), renormalized, then one categorical draw.
// Shifting by the max log before exp keeps it finite; the draw only needs
// relative weights so the shift is the renormalization. p_i == 0 maps to
// ln = -inf and keeps zero mass. t == 0 is the arg-max limit.

pub fn sample_index(probs: &[f32], temperature: f64, rng: &mut Rng) -> Result<usize> {
    if temperature.is_nan() || temperature < 0.0 {
        return Err(Error::InvalidTemperature(temperature));
    }

    if temperature == 0.0 {
        return probs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite() && **p > 0.0)
            .fold(None, |best: Option<(usize, f32)>, (i, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })
            .map(|(i, _)| i)
            .ok_or(Error::DegenerateDistribution);
    }

    let logs: Vec<f64> = probs
        .iter()
        .map(|&p| {
            let p = f64::from(p);
            if p.is_finite() && p > 0.0 { p.ln() / temperature } else { f64::NEG_INFINITY }
        })
        .collect();

    let max = logs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return Err(Error::DegenerateDistribution);
    }

    let weights: Vec<f64> = logs.iter().map(|&l| (l - max).exp()).collect();
    rng.categorical(&weights)
}

pub fn inverse_transform(
    vocab: &Vocabulary,
    vectors: &[Vec<f32>],
    temperature: f64,
    rng: &mut Rng,
) -> Result<String> {
    let mut tokens = Vec::with_capacity(vectors.len());
    for probs in vectors {
        if probs.len() != vocab.len() {
            return Err(Error::DimensionMismatch { expected: vocab.len(), got: probs.len() });
        }
        let idx = sample_index(probs, temperature, rng)?;
        // idx < probs.len() == vocab.len()
        tokens.push(vocab.token(idx).unwrap_or_default());
    }
    Ok(render(&tokens))
}

// ── Rendering ─────────────────────────────────────────────────────────────

/// Attach to the previous token without a space.
const CLOSING: &[&str] = &[".", ",", ";", ":", "!", "?", ")", "”"];

/// Suppress the space before the following token.
const OPENING: &[&str] = &["(", "“"];

/// Join tokens back into prose.
///
/// Words are space separated. Closing punctuation hugs the word before it,
/// an opening curly quote starts a new paragraph, straight quotes alternate
/// between opening and closing, and an em dash joins its neighbours.
pub fn render<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    let mut glue_next = true; // no space before the first token
    let mut quote_open = false;

    for tok in tokens.iter().map(AsRef::as_ref) {
        match tok {
            "“" => {
                if !out.is_empty() {
                    out.truncate(out.trim_end().len());
                    out.push_str("\n\n");
                }
                out.push_str(tok);
                glue_next = true;
            }
            "\"" if quote_open => {
                out.push_str(tok);
                quote_open = false;
                glue_next = false;
            }
            "\"" => {
                if !glue_next {
                    out.push(' ');
                }
                out.push_str(tok);
                quote_open = true;
                glue_next = true;
            }
            "—" => {
                out.push_str(tok);
                glue_next = true;
            }
            t if CLOSING.contains(&t) => {
                out.push_str(t);
                glue_next = false;
            }
            t => {
                if !glue_next {
                    out.push(' ');
                }
                out.push_str(t);
                glue_next = OPENING.contains(&t);
            }
        }
    }
    out
}
