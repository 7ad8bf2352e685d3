use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_title_core::{CorpusConfig, CorpusSource, FileCorpus, GenerationConfig, Generator, TitleError};
use tempfile::tempdir;

fn config_for(dir: &std::path::Path, categories: &[&str]) -> CorpusConfig {
	CorpusConfig {
		data_dir: dir.to_string_lossy().to_string(),
		categories: categories.iter().map(|c| c.to_string()).collect(),
		..CorpusConfig::default()
	}
}

#[test]
fn reads_one_title_per_line() {
	let dir = tempdir().unwrap();
	fs::write(dir.path().join("news.dat"), "Cat eats dog\n\nDog eats cat\r\nCat eats dog\n").unwrap();
	fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

	let corpus = FileCorpus::new(config_for(dir.path(), &[])).unwrap();
	assert_eq!(corpus.fetch_titles("news").unwrap(), vec!["Cat eats dog", "Dog eats cat"]);
	assert_eq!(corpus.list_corpora().unwrap(), vec!["news"]);

	let marked: Vec<String> = corpus.fetch_tokens("news").unwrap().iter().map(|t| t.to_marked()).collect();
	assert_eq!(marked, vec!["^Cat", "eats", "dog*", "^Dog", "eats", "cat*"]);
}

#[test]
fn categories_are_merged_in_order() {
	let dir = tempdir().unwrap();
	let news = dir.path().join("news");
	fs::create_dir(&news).unwrap();
	fs::write(news.join("top.dat"), "Second title\nFirst title\n").unwrap();
	fs::write(news.join("hot.dat"), "First title\nThird title\n").unwrap();

	let corpus = FileCorpus::new(config_for(dir.path(), &["top", "new", "hot"])).unwrap();
	assert_eq!(
		corpus.fetch_titles("news").unwrap(),
		vec!["Second title", "First title", "Third title"]
	);
	assert_eq!(corpus.list_corpora().unwrap(), vec!["news"]);
}

#[test]
fn unknown_or_escaping_ids_are_not_found() {
	let dir = tempdir().unwrap();
	let corpus = FileCorpus::new(config_for(dir.path(), &[])).unwrap();
	assert!(matches!(corpus.fetch_titles("missing"), Err(TitleError::CorpusNotFound { .. })));
	assert!(matches!(corpus.fetch_titles("../news"), Err(TitleError::CorpusNotFound { .. })));
}

#[test]
fn data_dir_must_exist() {
	let dir = tempdir().unwrap();
	let config = config_for(&dir.path().join("nope"), &[]);
	assert!(matches!(FileCorpus::new(config), Err(TitleError::InvalidConfig(_))));
}

#[test]
fn generates_from_disk() {
	let dir = tempdir().unwrap();
	fs::write(dir.path().join("pets.dat"), "a cat sat on the mat\na dog sat on the rug\n").unwrap();

	let corpus = FileCorpus::new(config_for(dir.path(), &[])).unwrap();
	let generator = Generator::new(corpus, GenerationConfig::default());
	let mut rng = StdRng::seed_from_u64(9);

	let titles = generator.generate_unique_with("pets", 5, &mut rng).unwrap();
	assert_eq!(titles.len(), 5);
	assert!(titles.iter().all(|t| t == "a cat sat on the rug" || t == "a dog sat on the mat"));

	let report = generator.evaluate_with("pets", 20, &mut rng).unwrap();
	assert_eq!(report.generated.len(), 20);
	assert_eq!(report.duplicate_count + report.unique_count(), 20);
}
