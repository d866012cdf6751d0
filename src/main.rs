use std::process::ExitCode;

use log::{info, warn, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use word_grid::{WordSearch, WordSearchConfig};

/// How many fresh searches to run before giving up on the word list.
const MAX_ATTEMPTS: u32 = 5;

fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
}

fn main() -> ExitCode {
    init_logger();

    let seed = match std::env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        None => None,
        Some(Ok(seed)) => Some(seed),
        Some(Err(e)) => {
            eprintln!("Seed must be a non-negative integer: {e}");
            return ExitCode::FAILURE;
        }
    };

    let words = [
        String::from("SWIFT"),
        String::from("KOTLIN"),
        String::from("OBJECTIVEC"),
        String::from("VARIABLE"),
        String::from("JAVA"),
        String::from("MOBILE"),
    ];

    let config = WordSearchConfig {
        num_rows: 10,
        num_columns: 10,
        words: &words,
        ..Default::default()
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for attempt in 1..=MAX_ATTEMPTS {
        match WordSearch::with_rng(&config, &mut rng) {
            Ok(word_search) => {
                info!("generated word search on attempt {attempt}");
                println!("{}", word_search);

                for (word, span) in word_search.word_spans() {
                    println!("{} {} {:?}", span.key(), word, span.direction);
                }

                return ExitCode::SUCCESS;
            }
            Err(e) if e.is_recoverable() => warn!("attempt {attempt} failed: {e}"),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    eprintln!("No word search found after {MAX_ATTEMPTS} attempts");
    ExitCode::FAILURE
}
