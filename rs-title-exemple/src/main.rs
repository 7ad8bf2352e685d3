use log::warn;
use rs_title_core::{CorpusConfig, FileCorpus, GenerationConfig, Generator, TitleError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Read every corpus from the "data" directory (.dat files, one title per line)
    let corpus = FileCorpus::new(CorpusConfig::default())?;
    let names = corpus.list_corpora()?;

    let mut config = GenerationConfig::default();

    // Titles stop growing after this many characters
    config.set_max_title_chars(300)?;

    // Number of generate-and-filter rounds before giving up on unique titles
    config.set_max_rounds(20)?;

    // A zero ceiling is rejected
    match config.set_max_rounds(0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    let generator = Generator::new(corpus, config);

    for name in &names {
        println!("== {name}");

        // Plain generation: titles may copy a real one
        for (i, title) in generator.generate(name, 5)?.iter().enumerate() {
            println!("Generated title {}: {}", i + 1, title);
        }

        // Unique generation: copies of real titles are replaced
        match generator.generate_unique(name, 5) {
            Ok(titles) => {
                for (i, title) in titles.iter().enumerate() {
                    println!("Unique title {}: {}", i + 1, title);
                }
            }
            Err(TitleError::UnboundedUniquenessRetry { titles, .. }) => {
                warn!("Corpus '{name}' is too small to produce enough unique titles");
                for title in titles {
                    println!("Partial unique title: {title}");
                }
            }
            Err(e) => return Err(e.into()),
        }

        // How often does the chain copy a real title?
        let report = generator.evaluate(name, 100)?;
        println!(
            "{} duplicates out of {} ({:.1}% unique)",
            report.duplicate_count,
            report.generated.len(),
            report.unique_fraction * 100.0
        );
    }

    Ok(())
}
