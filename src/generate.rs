/* ------------------------------------------------------------------ */
/* Autoregressive generation from a trained predictor                */
/* ------------------------------------------------------------------ */
//
// Seeding     copy W consecutive tokens from a random corpus offset
// Generating  predict on the trailing W tokens, sample, append (× length)
// Done        render the whole buffer, seed included
//
// The predictor is anything that maps a window to a distribution over the
// vocabulary; the trained `WordRnn` is one, tests use fixed tables.

use tracing::debug;

use crate::config::TrainConfig;
use crate::error::{Error, Result};
use crate::rng::Rng;
use crate::vectorizer::{render, sample_index, OneHot};
use crate::vocab::Vocabulary;

pub trait Predictor {
    /// Probability of each vocabulary entry following `window`.
    fn predict(&self, window: &[OneHot]) -> Result<Vec<f32>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Seeding,
    Generating { remaining: usize },
    Done,
}

pub struct Generator<'a, P: Predictor> {
    predictor:   &'a P,
    vocab:       &'a Vocabulary,
    corpus:      &'a [OneHot],
    window:      usize,
    length:      usize,
    temperature: f64,
    phase:       Phase,
    buffer:      Vec<OneHot>,
}

impl<'a, P: Predictor> Generator<'a, P> {
    pub fn new(
        predictor: &'a P,
        vocab: &'a Vocabulary,
        corpus: &'a [OneHot],
        window: usize,
        length: usize,
        temperature: f64,
    ) -> Self {
        Self {
            predictor,
            vocab,
            corpus,
            window,
            length,
            temperature,
            phase: Phase::Seeding,
            buffer: Vec::with_capacity(window + length),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn buffer(&self) -> &[OneHot] {
        &self.buffer
    }

    /// Advance one transition and return the new phase.
    pub fn step(&mut self, rng: &mut Rng) -> Result<Phase> {
        self.phase = match self.phase {
            Phase::Seeding => {
                if self.window == 0 {
                    return Err(Error::InvalidConfig("window must be at least 1".into()));
                }
                if self.corpus.len() < self.window {
                    return Err(Error::CorpusTooShort { len: self.corpus.len(), window: self.window });
                }
                let start = rng.choice(self.corpus.len() - self.window + 1);
                self.buffer.extend_from_slice(&self.corpus[start..start + self.window]);
                debug!(start, "seeded generation window");
                if self.length == 0 { Phase::Done } else { Phase::Generating { remaining: self.length } }
            }
            Phase::Generating { remaining } => {
                let tail = &self.buffer[self.buffer.len() - self.window..];
                let probs = self.predictor.predict(tail)?;
                if probs.len() != self.vocab.len() {
                    return Err(Error::DimensionMismatch { expected: self.vocab.len(), got: probs.len() });
                }
                let next = sample_index(&probs, self.temperature, rng)?;
                self.buffer.push(OneHot::new(next, self.vocab.len()));
                if remaining == 1 { Phase::Done } else { Phase::Generating { remaining: remaining - 1 } }
            }
            Phase::Done => Phase::Done,
        };
        Ok(self.phase)
    }

    /// Run to `Done` and render the buffer.
    pub fn run(mut self, rng: &mut Rng) -> Result<String> {
        while self.step(rng)? != Phase::Done {}
        Ok(self.render())
    }

    pub fn render(&self) -> String {
        let tokens: Vec<&str> = self
            .buffer
            .iter()
            .map(|oh| self.vocab.token(oh.index).unwrap_or_default())
            .collect();
        render(&tokens)
    }
}

pub fn generate<P: Predictor>(
    predictor: &P,
    vocab: &Vocabulary,
    corpus: &[OneHot],
    window: usize,
    length: usize,
    temperature: f64,
    rng: &mut Rng,
) -> Result<String> {
    Generator::new(predictor, vocab, corpus, window, length, temperature).run(rng)
}

/// Samples to show after a training epoch, one per configured temperature.
pub fn sample_after_epoch<P: Predictor>(
    predictor: &P,
    vocab: &Vocabulary,
    corpus: &[OneHot],
    config: &TrainConfig,
    rng: &mut Rng,
) -> Result<Vec<(f64, String)>> {
    config
        .temperatures
        .iter()
        .map(|&t| {
            let text = generate(predictor, vocab, corpus, config.window_size, config.generate_length, t, rng)?;
            Ok((t, text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{fit, transform};

    /// Always predicts the token after the last one in the window, cyclically.
    struct NextId(usize);

    impl Predictor for NextId {
        fn predict(&self, window: &[OneHot]) -> Result<Vec<f32>> {
            let mut p = vec![0.0; self.0];
            p[(window[window.len() - 1].index + 1) % self.0] = 1.0;
            Ok(p)
        }
    }

    struct WrongSize;

    impl Predictor for WrongSize {
        fn predict(&self, _window: &[OneHot]) -> Result<Vec<f32>> {
            Ok(vec![1.0])
        }
    }

    const TEXT: &str = "a b c d e f g h";

    #[test]
    fn phases_in_order() {
        let vocab = fit(TEXT);
        let corpus = transform(&vocab, TEXT).unwrap();
        let predictor = NextId(vocab.len());
        let mut gen = Generator::new(&predictor, &vocab, &corpus, 3, 2, 1.0);
        let mut rng = Rng::new(5);

        assert_eq!(gen.phase(), Phase::Seeding);
        assert_eq!(gen.step(&mut rng).unwrap(), Phase::Generating { remaining: 2 });
        assert_eq!(gen.buffer().len(), 3);
        assert_eq!(gen.step(&mut rng).unwrap(), Phase::Generating { remaining: 1 });
        assert_eq!(gen.step(&mut rng).unwrap(), Phase::Done);
        assert_eq!(gen.buffer().len(), 5);
        assert_eq!(gen.step(&mut rng).unwrap(), Phase::Done);
        assert_eq!(gen.buffer().len(), 5);
    }

    #[test]
    fn seed_is_a_real_corpus_slice_and_continuation_follows_predictor() {
        let vocab = fit(TEXT);
        let corpus = transform(&vocab, TEXT).unwrap();
        let predictor = NextId(vocab.len());
        let mut gen = Generator::new(&predictor, &vocab, &corpus, 3, 4, 0.7);
        let mut rng = Rng::new(11);
        while gen.step(&mut rng).unwrap() != Phase::Done {}

        let buf = gen.buffer();
        assert_eq!(buf.len(), 7);
        let seeded = corpus.windows(3).any(|w| w == &buf[..3]);
        assert!(seeded);
        for pair in buf[2..].windows(2) {
            assert_eq!(pair[1].index, (pair[0].index + 1) % vocab.len());
        }
    }

    #[test]
    fn zero_length_renders_seed_only() {
        let vocab = fit(TEXT);
        let corpus = transform(&vocab, TEXT).unwrap();
        let predictor = NextId(vocab.len());
        let mut rng = Rng::new(0);
        let text = generate(&predictor, &vocab, &corpus, 8, 0, 1.0, &mut rng).unwrap();
        assert_eq!(text, TEXT);
    }

    #[test]
    fn corpus_shorter_than_window() {
        let vocab = fit("a b");
        let corpus = transform(&vocab, "a b").unwrap();
        let predictor = NextId(vocab.len());
        let mut rng = Rng::new(0);
        let err = generate(&predictor, &vocab, &corpus, 5, 3, 1.0, &mut rng).unwrap_err();
        assert!(matches!(err, Error::CorpusTooShort { len: 2, window: 5 }));
    }

    #[test]
    fn predictor_with_wrong_width_is_rejected() {
        let vocab = fit(TEXT);
        let corpus = transform(&vocab, TEXT).unwrap();
        let mut rng = Rng::new(0);
        let err = generate(&WrongSize, &vocab, &corpus, 2, 1, 1.0, &mut rng).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { got: 1, .. }));
    }

    #[test]
    fn one_sample_per_temperature() {
        let vocab = fit(TEXT);
        let corpus = transform(&vocab, TEXT).unwrap();
        let predictor = NextId(vocab.len());
        let config = TrainConfig { window_size: 2, generate_length: 3, ..TrainConfig::default() };
        let mut rng = Rng::new(0);
        let samples = sample_after_epoch(&predictor, &vocab, &corpus, &config, &mut rng).unwrap();
        assert_eq!(samples.len(), config.temperatures.len());
        for ((t, text), expected_t) in samples.iter().zip(&config.temperatures) {
            assert_eq!(t, expected_t);
            assert_eq!(text.split_whitespace().count(), 5);
        }
    }
}
