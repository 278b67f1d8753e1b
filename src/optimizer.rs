/* ------------------------------------------------------------------ */
/* AdamW construction and learning-rate schedule                     */
/* ------------------------------------------------------------------ */

use candle_core::Var;
use candle_nn::{AdamW, Optimizer, ParamsAdamW};

use crate::config::{TrainConfig, BETA1, BETA2, EPSILON};
use crate::error::Result;

pub fn build_optimizer(vars: Vec<Var>, config: &TrainConfig) -> Result<AdamW> {
    let params = ParamsAdamW {
        lr:           config.learning_rate,
        beta1:        BETA1,
        beta2:        BETA2,
        eps:          EPSILON,
        weight_decay: config.weight_decay,
    };
    Ok(AdamW::new(vars, params)?)
}

// Schedule per epoch: constant → cosine decay over the last 40% of epochs
pub fn learning_rate(epoch: usize, config: &TrainConfig) -> f64 {
    let epochs      = config.epochs.max(1);
    let decay_start = (epochs * 3) / 5;

    if epoch < decay_start || epochs - decay_start <= 1 {
        config.learning_rate
    } else {
        let progress = (epoch - decay_start) as f64 / (epochs - decay_start - 1) as f64;
        let cosine   = 0.5 * (1.0 + (progress.min(1.0) * std::f64::consts::PI).cos());
        config.min_learning_rate + (config.learning_rate - config.min_learning_rate) * cosine
    }
}

pub fn apply_schedule(opt: &mut AdamW, epoch: usize, config: &TrainConfig) -> f64 {
    let lr = learning_rate(epoch, config);
    opt.set_learning_rate(lr);
    lr
}
