use std::fs;
use std::path::PathBuf;

use clap::Parser;
use traghetto::{Corpus, FeatureSet, Lexicon, MaxentClassifier, PosTagger};

#[derive(Parser, Debug)]
#[command(
    about = "A program to compare maxent tagging accuracy against the lexicon baseline."
)]
struct Args {
    /// A tagged corpus (one sentence per line, word/TAG tokens)
    #[arg(long)]
    corpus: PathBuf,

    /// The percentage of sentences to train on; the rest is evaluated
    #[arg(long, default_value = "20")]
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
    let (train_corpus, test_corpus) = corpus.split_train_test(args.split);
    eprintln!(
        "# of sentences: {} train, {} test",
        train_corpus.len(),
        test_corpus.len()
    );

    eprintln!("Start training...");
    let sample = train_corpus.generate_sample();
    let mut features = FeatureSet::new();
    sample.generate_features(&mut features);
    let mut classifier = MaxentClassifier::new(features, sample);
    let summary = classifier.train(args.iters, args.min_improvement)?;
    eprintln!(
        "Finish training: {} iterations, log-likelihood {}",
        summary.iterations, summary.log_likelihood
    );

    let lexicon = Lexicon::from_corpus(&train_corpus);
    let tagger = PosTagger::new(lexicon, classifier);

    eprintln!("Start tagging");
    let mut n_words = 0;
    let mut n_correct_lexicon = 0;
    let mut n_correct_maxent = 0;
    for sentence in test_corpus.sentences() {
        let words: Vec<&str> = sentence.words().iter().map(|w| w.token()).collect();
        let baseline = tagger.tag_with_lexicon(&words);
        let tagged = tagger.tag(&words);
        for ((gold, baseline), tagged) in
            sentence.words().iter().zip(&baseline).zip(&tagged)
        {
            n_words += 1;
            if gold.tag() == baseline.tag() {
                n_correct_lexicon += 1;
            }
            if gold.tag() == tagged.tag() {
                n_correct_maxent += 1;
            }
        }
    }

    println!("Number of words tagged: {n_words}");
    println!(
        "Percentage correctly tagged lexicon: {}%",
        n_correct_lexicon as f64 / n_words as f64 * 100.0
    );
    println!(
        "Percentage correctly tagged maxent: {}%",
        n_correct_maxent as f64 / n_words as f64 * 100.0
    );

    Ok(())
}
