/* ------------------------------------------------------------------ */
/* Training loop                                                      */
/* ------------------------------------------------------------------ */
//
// One call to `train_epoch` = one pass over every training pair in a fresh
// random order, one AdamW step per mini-batch. The caller decides what to
// do between epochs (the binary prints generated samples).

use candle_core::{DType, Device, D};
use candle_nn::loss::cross_entropy;
use candle_nn::{AdamW, Optimizer, VarBuilder, VarMap};
use tracing::debug;

use crate::config::{TrainConfig, LOG_INTERVAL};
use crate::error::{Error, Result};
use crate::model::WordRnn;
use crate::optimizer::{apply_schedule, build_optimizer};
use crate::rng::Rng;
use crate::windows::{encode_batch, TrainingPair};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    pub loss:          f32,
    pub accuracy:      f32,
    pub batches:       usize,
    pub learning_rate: f64,
}

pub struct Trainer {
    model:     WordRnn,
    // owns the weights the model and optimizer refer to
    _varmap:   VarMap,
    optimizer: AdamW,
    config:    TrainConfig,
}

impl Trainer {
    pub fn new(vocab_size: usize, config: TrainConfig, device: &Device) -> Result<Self> {
        config.validate()?;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, device);
        let model = WordRnn::new(vb, vocab_size, config.hidden_units, config.dropout_rate)?;
        let optimizer = build_optimizer(varmap.all_vars(), &config)?;
        Ok(Self { model, _varmap: varmap, optimizer, config })
    }

    pub fn model(&self) -> &WordRnn {
        &self.model
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn train_epoch(&mut self, epoch: usize, pairs: &[TrainingPair<'_>], rng: &mut Rng) -> Result<EpochStats> {
        if pairs.is_empty() {
            return Err(Error::InvalidConfig("no training pairs; corpus shorter than window".into()));
        }

        let learning_rate = apply_schedule(&mut self.optimizer, epoch, &self.config);

        let mut order: Vec<usize> = (0..pairs.len()).collect();
        rng.shuffle(&mut order);

        let vocab_size = self.model.vocab_size();
        let mut total_loss = 0.0f32;
        let mut correct    = 0.0f32;
        let mut batches    = 0usize;

        for chunk in order.chunks(self.config.batch_size) {
            let batch: Vec<TrainingPair<'_>> = chunk.iter().map(|&i| pairs[i]).collect();
            let (xs, ys) = encode_batch(&batch, vocab_size, self.model.device())?;

            let logits = self.model.forward_t(&xs, true)?;
            let loss = cross_entropy(&logits, &ys)?;
            self.optimizer.backward_step(&loss)?;

            let batch_loss = loss.to_scalar::<f32>()?;
            total_loss += batch_loss * chunk.len() as f32;
            correct += logits
                .argmax(D::Minus1)?
                .eq(&ys)?
                .to_dtype(DType::F32)?
                .sum_all()?
                .to_scalar::<f32>()?;
            batches += 1;

            if batches % LOG_INTERVAL == 0 {
                debug!(epoch, batches, loss = batch_loss, "training");
            }
        }

        let n = pairs.len() as f32;
        Ok(EpochStats { loss: total_loss / n, accuracy: correct / n, batches, learning_rate })
    }
}
