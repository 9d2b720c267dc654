use std::io::{prelude::*, stdin};
use std::path::PathBuf;

use clap::Parser;
use traghetto::{Lexicon, MaxentClassifier, PosTagger, StringCodec};

#[derive(Parser, Debug)]
#[command(about = "A program to tag sentences with a trained classifier.")]
struct Args {
    /// The classifier file to use when tagging text
    #[arg(long)]
    model: PathBuf,

    /// The lexicon file to use for baseline tags and fallbacks
    #[arg(long)]
    lexicon: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let classifier = MaxentClassifier::load(&args.model, &StringCodec)?;
    let lexicon = Lexicon::load(&args.lexicon)?;
    let tagger = PosTagger::new(lexicon, classifier);

    eprintln!("Start tagging");
    for line in stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let tagged: Vec<String> = tagger
            .tag(&words)
            .iter()
            .map(|w| format!("{}/{}", w.token(), w.tag()))
            .collect();
        println!("{}", tagged.join(" "));
    }

    Ok(())
}
