/* ------------------------------------------------------------------ */
/* Hyperparameters and global constants                               */
/* ------------------------------------------------------------------ */
//
// Everything the run needs is fixed here. `TrainConfig::default()` gathers
// these into one value so tests and the binary can override single fields.

use crate::error::{Error, Result};

// ── Corpus ────────────────────────────────────────────────────────────────

pub const CORPUS_URL: &str = "https://www.gutenberg.org/files/11/11-0.txt";
pub const VOCAB_PATH: &str = "vocab.json";

// ── Windowing / generation ────────────────────────────────────────────────

pub const WINDOW_SIZE:     usize = 5;
pub const STRIDE:          usize = 1;
pub const GENERATE_LENGTH: usize = 50;
pub const SAMPLE_TEMPERATURES: [f64; 4] = [0.2, 0.5, 1.0, 1.2];

// ── Architecture ──────────────────────────────────────────────────────────

pub const HIDDEN_UNITS: usize = 128;
pub const DROPOUT_RATE: f32   = 0.2;

// ── Training ──────────────────────────────────────────────────────────────

pub const BATCH_SIZE:        usize = 128;
pub const EPOCHS:            usize = 20;
pub const LEARNING_RATE:     f64   = 1e-3;
pub const MIN_LEARNING_RATE: f64   = 1e-4;   // cosine floor, 10% of max
pub const WEIGHT_DECAY:      f64   = 0.0;    // plain Adam unless raised
pub const BETA1:             f64   = 0.9;
pub const BETA2:             f64   = 0.999;
pub const EPSILON:           f64   = 1e-8;
pub const SEED:              u64   = 42;
pub const LOG_INTERVAL:      usize = 50;     // batches between debug lines

// ── Device ────────────────────────────────────────────────────────────────

pub const USE_GPU: bool = true;

/// Run configuration. Defaults mirror the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub window_size:       usize,
    pub stride:            usize,
    pub generate_length:   usize,
    pub hidden_units:      usize,
    pub dropout_rate:      f32,
    pub batch_size:        usize,
    pub epochs:            usize,
    pub learning_rate:     f64,
    pub min_learning_rate: f64,
    pub weight_decay:      f64,
    pub temperatures:      Vec<f64>,
    pub seed:              u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            window_size:       WINDOW_SIZE,
            stride:            STRIDE,
            generate_length:   GENERATE_LENGTH,
            hidden_units:      HIDDEN_UNITS,
            dropout_rate:      DROPOUT_RATE,
            batch_size:        BATCH_SIZE,
            epochs:            EPOCHS,
            learning_rate:     LEARNING_RATE,
            min_learning_rate: MIN_LEARNING_RATE,
            weight_decay:      WEIGHT_DECAY,
            temperatures:      SAMPLE_TEMPERATURES.to_vec(),
            seed:              SEED,
        }
    }
}

impl TrainConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Reject values that would make windowing, batching or sampling meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::InvalidConfig("window_size must be at least 1".into()));
        }
        if self.stride == 0 {
            return Err(Error::InvalidConfig("stride must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.hidden_units == 0 {
            return Err(Error::InvalidConfig("hidden_units must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.dropout_rate) {
            return Err(Error::InvalidConfig(format!(
                "dropout_rate {} outside [0, 1)",
                self.dropout_rate
            )));
        }
        if !(self.learning_rate > 0.0) || !(self.min_learning_rate > 0.0) {
            return Err(Error::InvalidConfig("learning rates must be positive".into()));
        }
        if self.min_learning_rate > self.learning_rate {
            return Err(Error::InvalidConfig(
                "min_learning_rate exceeds learning_rate".into(),
            ));
        }
        if let Some(t) = self.temperatures.iter().find(|t| t.is_nan() || **t < 0.0) {
            return Err(Error::InvalidConfig(format!("sample temperature {t} is negative")));
        }
        Ok(())
    }
}
