/* ------------------------------------------------------------------ */
/* Windowed training pairs and mini-batch tensors                    */
/* ------------------------------------------------------------------ */
//
// For a sequence of N one-hot rows and window W, pair i is
//   inputs: seq[i .. i + W]      target: seq[i + W]
// for i = 0, stride, 2·stride, … while i < N - W. Windows borrow the
// sequence; dense tensors are built per batch in `encode_batch`.

use candle_core::{Device, Tensor};

use crate::error::{Error, Result};
use crate::vectorizer::OneHot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingPair<'a> {
    pub window: &'a [OneHot],
    pub target: OneHot,
}

pub fn build_windows(seq: &[OneHot], window: usize, stride: usize) -> Result<Vec<TrainingPair<'_>>> {
    if window == 0 {
        return Err(Error::InvalidConfig("window must be at least 1".into()));
    }
    if stride == 0 {
        return Err(Error::InvalidConfig("stride must be at least 1".into()));
    }
    if seq.len() <= window {
        return Ok(Vec::new());
    }

    Ok((0..seq.len() - window)
        .step_by(stride)
        .map(|i| TrainingPair { window: &seq[i..i + window], target: seq[i + window] })
        .collect())
}

/// Inputs as `(batch, W, vocab_len)` f32 one-hot rows, targets as `(batch,)` u32 ids.
pub fn encode_batch(pairs: &[TrainingPair<'_>], vocab_len: usize, device: &Device) -> Result<(Tensor, Tensor)> {
    let batch = pairs.len();
    let window = pairs.first().map_or(0, |p| p.window.len());

    let mut inputs = vec![0.0f32; batch * window * vocab_len];
    let mut targets = Vec::with_capacity(batch);

    for (b, pair) in pairs.iter().enumerate() {
        if pair.window.len() != window {
            return Err(Error::InvalidConfig(format!(
                "mixed window lengths in batch: {} and {}",
                window,
                pair.window.len()
            )));
        }
        for (t, row) in pair.window.iter().enumerate() {
            let off = (b * window + t) * vocab_len;
            row.write_into(&mut inputs[off..off + vocab_len]);
        }
        targets.push(pair.target.index as u32);
    }

    let xs = Tensor::from_vec(inputs, (batch, window, vocab_len), device)?;
    let ys = Tensor::from_vec(targets, batch, device)?;
    Ok((xs, ys))
}

/// Single window as a `(1, W, vocab_len)` tensor, for prediction.
pub fn encode_window(window: &[OneHot], vocab_len: usize, device: &Device) -> Result<Tensor> {
    let mut inputs = vec![0.0f32; window.len() * vocab_len];
    for (t, row) in window.iter().enumerate() {
        row.write_into(&mut inputs[t * vocab_len..(t + 1) * vocab_len]);
    }
    Ok(Tensor::from_vec(inputs, (1, window.len(), vocab_len), device)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seq(n: usize, dim: usize) -> Vec<OneHot> {
        (0..n).map(|i| OneHot::new(i % dim, dim)).collect()
    }

    #[test]
    fn n_minus_w_pairs_for_unit_stride() {
        let s = seq(12, 7);
        let pairs = build_windows(&s, 5, 1).unwrap();
        assert_eq!(pairs.len(), 7);
        for (i, p) in pairs.iter().enumerate() {
            assert_eq!(p.window.len(), 5);
            assert_eq!(p.window[4], s[i + 4]);
            assert_eq!(p.target, s[i + 5]);
        }
    }

    #[test]
    fn stride_skips_starts() {
        let s = seq(12, 7);
        let pairs = build_windows(&s, 5, 3).unwrap();
        // starts 0, 3, 6
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2].window[0], s[6]);
        assert_eq!(pairs[2].target, s[11]);
    }

    #[test]
    fn short_sequence_gives_no_pairs() {
        assert!(build_windows(&seq(5, 3), 5, 1).unwrap().is_empty());
        assert!(build_windows(&seq(0, 3), 5, 1).unwrap().is_empty());
    }

    #[test]
    fn zero_window_or_stride_is_rejected() {
        let s = seq(10, 3);
        assert!(matches!(build_windows(&s, 0, 1), Err(Error::InvalidConfig(_))));
        assert!(matches!(build_windows(&s, 2, 0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn encode_batch_shapes_and_values() {
        let s = seq(8, 4);
        let pairs = build_windows(&s, 3, 1).unwrap();
        let (xs, ys) = encode_batch(&pairs[..2], 4, &Device::Cpu).unwrap();
        assert_eq!(xs.dims(), &[2, 3, 4]);
        assert_eq!(ys.dims(), &[2]);

        let rows = xs.to_vec3::<f32>().unwrap();
        // pair 1 starts at token 1 → index 1
        assert_eq!(rows[1][0], vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(ys.to_vec1::<u32>().unwrap(), vec![3, 0]);
    }

    #[test]
    fn encode_window_is_single_batch() {
        let s = seq(3, 5);
        let xs = encode_window(&s, 5, &Device::Cpu).unwrap();
        assert_eq!(xs.dims(), &[1, 3, 5]);
        assert_eq!(xs.sum_all().unwrap().to_scalar::<f32>().unwrap(), 3.0);
    }

    proptest! {
        #[test]
        fn pair_count_and_offsets(n in 0usize..200, w in 1usize..12, stride in 1usize..6) {
            let s = seq(n, 13);
            let pairs = build_windows(&s, w, stride).unwrap();
            let expected = if n > w { (n - w + stride - 1) / stride } else { 0 };
            prop_assert_eq!(pairs.len(), expected);
            for (k, p) in pairs.iter().enumerate() {
                let i = k * stride;
                prop_assert_eq!(p.window[w - 1], s[i + w - 1]);
                prop_assert_eq!(p.target, s[i + w]);
            }
        }
    }
}
