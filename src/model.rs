/* ------------------------------------------------------------------ */
/* Word-level LSTM: window of one-hot rows → next-token logits       */
/* ------------------------------------------------------------------ */
//
//   xs (batch, W, V) ─ LSTM(V → H) ─ last h (batch, H) ─ dropout ─ linear(H → V)
//
// All weights live in the VarMap behind the VarBuilder; the trainer hands
// `varmap.all_vars()` to the optimizer.

use candle_core::{Device, Tensor, D};
use candle_nn::rnn::{lstm, LSTMConfig, LSTM, RNN};
use candle_nn::{linear, Dropout, Linear, Module, ModuleT, VarBuilder};

use crate::error::{Error, Result};
use crate::generate::Predictor;
use crate::vectorizer::OneHot;
use crate::windows::encode_window;

pub struct WordRnn {
    lstm:       LSTM,
    dropout:    Dropout,
    head:       Linear,
    vocab_size: usize,
    device:     Device,
}

impl WordRnn {
    pub fn new(vb: VarBuilder, vocab_size: usize, hidden: usize, dropout: f32) -> Result<Self> {
        let device = vb.device().clone();
        let lstm = lstm(vocab_size, hidden, LSTMConfig::default(), vb.pp("lstm"))?;
        let head = linear(hidden, vocab_size, vb.pp("head"))?;
        Ok(Self {
            lstm,
            dropout: Dropout::new(dropout),
            head,
            vocab_size,
            device,
        })
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Logits `(batch, V)` for input `(batch, W, V)`.
    pub fn forward_t(&self, xs: &Tensor, train: bool) -> Result<Tensor> {
        let states = self.lstm.seq(xs)?;
        let last = states
            .last()
            .ok_or_else(|| Error::InvalidConfig("empty input window".into()))?;
        let h = self.dropout.forward_t(last.h(), train)?;
        Ok(self.head.forward(&h)?)
    }
}

impl Predictor for WordRnn {
    fn predict(&self, window: &[OneHot]) -> Result<Vec<f32>> {
        let xs = encode_window(window, self.vocab_size, &self.device)?;
        let logits = self.forward_t(&xs, false)?;
        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?;
        Ok(probs.squeeze(0)?.to_vec1::<f32>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::DType;
    use candle_nn::VarMap;

    fn tiny(vocab: usize) -> WordRnn {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        WordRnn::new(vb, vocab, 8, 0.2).unwrap()
    }

    #[test]
    fn forward_shape() {
        let model = tiny(6);
        let xs = Tensor::zeros((3, 4, 6), DType::F32, &Device::Cpu).unwrap();
        let logits = model.forward_t(&xs, true).unwrap();
        assert_eq!(logits.dims(), &[3, 6]);
    }

    #[test]
    fn predict_is_a_distribution() {
        let model = tiny(6);
        let window: Vec<OneHot> = (0..5).map(|i| OneHot::new(i, 6)).collect();
        let probs = model.predict(&window).unwrap();
        assert_eq!(probs.len(), 6);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
        assert!(probs.iter().all(|&p| p > 0.0));
    }

    #[test]
    fn eval_mode_is_deterministic() {
        let model = tiny(4);
        let window = [OneHot::new(1, 4), OneHot::new(3, 4)];
        assert_eq!(model.predict(&window).unwrap(), model.predict(&window).unwrap());
    }
}
