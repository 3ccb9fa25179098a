use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_markov_core::io::read_file;
use rs_markov_core::model::observer::TransitionStats;
use rs_markov_core::MarkovModel;

/// Trains a Markov chain on a few sequences, dumps it and generates from it.
#[derive(Parser, Debug)]
#[command(name = "rs-markov-exemple")]
#[command(about = "Train a Markov chain and generate sequences from it", long_about = None)]
struct Args {
    /// Number of context symbols
    #[arg(short, long, default_value_t = 1)]
    order: usize,

    /// Number of sequences to generate
    #[arg(short, long, default_value_t = 5)]
    count: usize,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Training file, one sequence per line
    #[arg(short, long, value_name = "PATH")]
    file: Option<String>,

    /// Split sequences into words instead of characters
    #[arg(short, long)]
    words: bool,

    /// Print the transition table before generating
    #[arg(short, long)]
    dump: bool,

    /// Print how many transitions were added and incremented
    #[arg(long)]
    stats: bool,

    /// Training sequences (default: bag bat ate)
    sequences: Vec<String>,
}

impl Args {
    /// Collects the training data from the file and the positional arguments.
    fn training_data(&self) -> std::io::Result<Vec<String>> {
        let mut data = match &self.file {
            Some(path) => read_file(path)?,
            None => Vec::new(),
        };
        data.extend(self.sequences.iter().cloned());
        if data.is_empty() {
            data = vec!["bag".to_owned(), "bat".to_owned(), "ate".to_owned()];
        }
        Ok(data)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let data = args.training_data()?;
    let mut rng = args.rng();

    let generated = if args.words {
        // Word model: "the cat sat" is three symbols
        let mut model: MarkovModel<String> = MarkovModel::new(args.order)?;
        let mut stats = TransitionStats::new();
        let recorded = model.train_words_observed(&data, &mut stats);
        report(&args, recorded, &stats, || model.dump());
        model.generate_many(args.count, &mut rng)
    } else {
        // Character model: "bag" is three symbols
        let mut model: MarkovModel<char> = MarkovModel::new(args.order)?;
        let mut stats = TransitionStats::new();
        let recorded = model.train_observed(&data, &mut stats);
        report(&args, recorded, &stats, || model.dump());
        model.generate_many(args.count, &mut rng)
    };

    match generated {
        Ok(sequences) => {
            for sequence in sequences {
                println!("{}", sequence);
            }
            Ok(())
        }
        Err(e) => {
            warn!("Nothing to generate from: {}", e);
            Err(e.into())
        }
    }
}

/// Prints the optional dump and statistics.
fn report<F: FnOnce() -> String>(args: &Args, recorded: usize, stats: &TransitionStats, dump: F) {
    info!("Trained on {} sequences (order {})", recorded, args.order);

    if args.dump {
        print!("{}", dump());
    }

    if args.stats {
        println!("Add: {}", stats.added);
        println!("Incr: {}", stats.incremented);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bag_bat_ate() {
        let args = Args::try_parse_from(["rs-markov-exemple"]).unwrap();
        assert_eq!(args.order, 1);
        assert_eq!(args.count, 5);
        assert_eq!(args.training_data().unwrap(), vec!["bag", "bat", "ate"]);
    }

    #[test]
    fn positional_sequences_replace_defaults() {
        let args = Args::try_parse_from(["rs-markov-exemple", "-o", "2", "--words", "the cat", "a dog"]).unwrap();
        assert_eq!(args.order, 2);
        assert!(args.words);
        assert_eq!(args.training_data().unwrap(), vec!["the cat", "a dog"]);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let args = Args::try_parse_from(["rs-markov-exemple", "--seed", "11"]).unwrap();
        let mut model: MarkovModel<char> = MarkovModel::new(1).unwrap();
        model.train(args.training_data().unwrap());
        let first = model.generate_many(5, &mut args.rng()).unwrap();
        let second = model.generate_many(5, &mut args.rng()).unwrap();
        assert_eq!(first, second);
    }
}
