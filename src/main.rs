use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};

use wordrnn::config::{TrainConfig, CORPUS_URL, EPOCHS, VOCAB_PATH};
use wordrnn::device::DEVICE;
use wordrnn::rng::Rng;
use wordrnn::{build_windows, corpus, fit, sample_after_epoch, transform, Trainer};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wordrnn=info")),
        )
        .init();

    // Usage: wordrnn [epochs] [corpus-path]
    let args: Vec<String> = std::env::args().collect();
    let epochs = match args.get(1) {
        Some(arg) => arg.parse::<usize>().unwrap_or_else(|_| {
            warn!("invalid epochs argument {arg:?}, using default: {EPOCHS}");
            EPOCHS
        }),
        None => EPOCHS,
    };
    let corpus_path = args.get(2).map(PathBuf::from);

    let config = TrainConfig::default().with_epochs(epochs);
    config.validate().context("invalid configuration")?;
    let mut rng = Rng::new(config.seed);

    // ── Data ──────────────────────────────────────────────────────────
    let text = corpus::load_or_fetch(corpus_path.as_deref(), CORPUS_URL)
        .context("could not load corpus")?;
    info!("corpus: {} characters", text.len());

    let vocab = fit(&text);
    info!("vocabulary: {} tokens, first {:?}", vocab.len(), &vocab.tokens()[..10.min(vocab.len())]);
    vocab.save(VOCAB_PATH).with_context(|| format!("could not write {VOCAB_PATH}"))?;

    let encoded = transform(&vocab, &text).context("could not encode corpus")?;
    let pairs = build_windows(&encoded, config.window_size, config.stride)?;
    info!("{} tokens → {} training windows of {}", encoded.len(), pairs.len(), config.window_size);

    // ── Model ─────────────────────────────────────────────────────────
    let mut trainer = Trainer::new(vocab.len(), config.clone(), &DEVICE)
        .context("could not build model")?;
    info!(
        "model: LSTM {} → {} hidden, dropout {}, device {:?}",
        vocab.len(),
        config.hidden_units,
        config.dropout_rate,
        *DEVICE
    );

    // ── Train, sampling after every epoch ─────────────────────────────
    for epoch in 0..config.epochs {
        let stats = trainer
            .train_epoch(epoch, &pairs, &mut rng)
            .with_context(|| format!("training failed in epoch {}", epoch + 1))?;
        println!(
            "Epoch {:3}/{} | Loss: {:.4} | Acc: {:.3} | LR: {:.6}",
            epoch + 1,
            config.epochs,
            stats.loss,
            stats.accuracy,
            stats.learning_rate
        );

        let samples = sample_after_epoch(trainer.model(), &vocab, &encoded, &config, &mut rng)
            .context("generation failed")?;
        for (temperature, sample) in samples {
            println!("\n----- temperature {temperature} -----");
            println!("{sample}");
        }
        println!();
    }

    info!("done after {} epochs", config.epochs);
    Ok(())
}
