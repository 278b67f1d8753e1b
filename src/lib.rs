//! Word-level LSTM text generation.
//!
//! Tokenize a corpus into words and punctuation, one-hot encode it against a
//! sorted vocabulary, train a one-layer LSTM on sliding windows, and sample
//! new text from it at a chosen temperature.

pub mod config;
pub mod corpus;
pub mod device;
pub mod error;
pub mod generate;
pub mod model;
pub mod optimizer;
pub mod rng;
pub mod tokenizer;
pub mod train;
pub mod vectorizer;
pub mod vocab;
pub mod windows;

pub use error::{Error, Result};
pub use generate::{generate, sample_after_epoch, Generator, Phase, Predictor};
pub use model::WordRnn;
pub use train::{EpochStats, Trainer};
pub use vectorizer::{fit, inverse_transform, transform, OneHot};
pub use vocab::Vocabulary;
pub use windows::{build_windows, TrainingPair};
