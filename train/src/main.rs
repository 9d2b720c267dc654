use std::fs;
use std::path::PathBuf;

use clap::Parser;
use traghetto::{Corpus, FeatureSet, Lexicon, MaxentClassifier, StringCodec};

#[derive(Parser, Debug)]
#[command(about = "A program to train maximum entropy part-of-speech classifiers.")]
struct Args {
    /// A tagged training corpus (one sentence per line, word/TAG tokens)
    #[arg(long)]
    corpus: PathBuf,

    /// The file to write the trained classifier to
    #[arg(long)]
    model: PathBuf,

    /// The file to write the lexicon to
    #[arg(long)]
    lexicon: PathBuf,

    /// The file to write the mined sample to
    #[arg(long)]
    sample: Option<PathBuf>,

    /// The percentage of sentences to train on; the rest is held out
    #[arg(long, default_value = "100")]
    split: usize,

    /// The maximum number of scaling iterations
    #[arg(long, default_value = "100")]
    iters: usize,

    /// Stop once the log-likelihood improvement falls below this value
    #[arg(long, default_value = "0.001")]
    min_improvement: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading corpus...");
    let text = fs::read_to_string(&args.corpus)?;
    let corpus = Corpus::from_brown_text(&text)?;
    eprintln!("# of sentences: {}", corpus.len());

    let (train_corpus, _) = corpus.split_train_test(args.split);

    eprintln!("Generating sample...");
    let sample = train_corpus.generate_sample();
    eprintln!("# of events: {}", sample.len());
    if let Some(path) = &args.sample {
        sample.save(path, &StringCodec)?;
    }

    eprintln!("Generating features...");
    let mut features = FeatureSet::new();
    sample.generate_features(&mut features);
    eprintln!("# of features: {}", features.len());

    eprintln!("Building lexicon...");
    let lexicon = Lexicon::from_corpus(&train_corpus);
    eprintln!("# of lexicon entries: {}", lexicon.len());

    eprintln!("Start training...");
    let mut classifier = MaxentClassifier::new(features, sample);
    let summary = classifier.train(args.iters, args.min_improvement)?;
    eprintln!(
        "Finish training: {} iterations, log-likelihood {}",
        summary.iterations, summary.log_likelihood
    );
    eprintln!("Checksum: {}", classifier.checksum());

    classifier.save(&args.model, &StringCodec)?;
    lexicon.save(&args.lexicon)?;

    Ok(())
}
