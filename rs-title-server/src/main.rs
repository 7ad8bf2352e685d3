use std::env;

use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};

use rs_title_core::{CorpusConfig, CorpusSource, FileCorpus, GenerationConfig, Generator, TitleError};

/// Default number of titles when `count` is omitted.
const DEFAULT_COUNT: usize = 10;

/// Upper bound on `count` for a single request.
const MAX_COUNT: usize = 1000;

/// Query parameters of `/v1/generate`.
#[derive(Deserialize)]
struct GenerateParams {
	corpus: Option<String>,
	count: Option<usize>,
	unique: Option<bool>,
}

/// Query parameters of `/v1/report`.
#[derive(Deserialize)]
struct ReportParams {
	corpus: Option<String>,
	count: Option<usize>,
}

/// Body returned when the uniqueness filter ran out of rounds.
#[derive(Serialize)]
struct PartialTitles<'a> {
	error: String,
	titles: &'a [String],
}

/// The corpus is boxed so tests can serve in-memory corpora.
type SharedGenerator = Generator<Box<dyn CorpusSource + Send + Sync>>;

struct SharedData {
	generator: SharedGenerator,
	corpus: Option<FileCorpus>,
}

/// Validates the corpus id and count shared by every generating endpoint.
fn request_args(corpus: &Option<String>, count: Option<usize>) -> Result<(String, usize), HttpResponse> {
	let corpus = match corpus {
		Some(s) if !s.trim().is_empty() => s.trim().to_owned(),
		_ => return Err(HttpResponse::BadRequest().body("Missing or empty corpus name")),
	};
	let count = count.unwrap_or(DEFAULT_COUNT);
	if count > MAX_COUNT {
		return Err(HttpResponse::BadRequest().body(format!("count must be <= {MAX_COUNT}")));
	}
	Ok((corpus, count))
}

/// Maps a core error to an HTTP response.
fn error_response(e: TitleError) -> HttpResponse {
	match e {
		TitleError::CorpusNotFound { .. } => HttpResponse::NotFound().body(e.to_string()),
		TitleError::EmptyCorpus { .. } => HttpResponse::UnprocessableEntity().body(e.to_string()),
		TitleError::UnboundedUniquenessRetry { ref titles, .. } => HttpResponse::UnprocessableEntity().json(PartialTitles {
			error: e.to_string(),
			titles,
		}),
		TitleError::InvalidConfig(_) => HttpResponse::BadRequest().body(e.to_string()),
		TitleError::ChainLookupFailure { .. } | TitleError::TruncatedStream { .. } | TitleError::Io(_) => {
			error!("Generation failed: {e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` titles for `corpus` and returns them as a JSON array.
/// With `unique=true`, copies of real titles are filtered out.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let (corpus, count) = match request_args(&query.corpus, query.count) {
		Ok(args) => args,
		Err(response) => return response,
	};

	let result = if query.unique.unwrap_or(false) {
		data.generator.generate_unique(&corpus, count)
	} else {
		data.generator.generate(&corpus, count)
	};

	match result {
		Ok(titles) => HttpResponse::Ok().json(titles),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/report`
///
/// Generates `count` titles and returns the duplicate report as JSON.
#[get("/v1/report")]
async fn get_report(data: web::Data<SharedData>, query: web::Query<ReportParams>) -> impl Responder {
	let (corpus, count) = match request_args(&query.corpus, query.count) {
		Ok(args) => args,
		Err(response) => return response,
	};

	match data.generator.evaluate(&corpus, count) {
		Ok(report) => HttpResponse::Ok().json(report),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Lists the corpora available in the data directory.
#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<SharedData>) -> impl Responder {
	let Some(corpus) = &data.corpus else {
		return HttpResponse::Ok().json(Vec::<String>::new());
	};
	match corpus.list_corpora() {
		Ok(ids) => HttpResponse::Ok().json(ids),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated).service(get_report).service(get_corpora);
}

/// Main entry point for the server.
///
/// Serves the corpora found in the data directory.
///
/// # Notes
/// - `RS_TITLE_DATA` sets the data directory (default `./data`).
/// - `RS_TITLE_BIND` sets the bind address (default `127.0.0.1:5000`).
/// - `RUST_LOG` controls logging.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let corpus_config = CorpusConfig {
		data_dir: env::var("RS_TITLE_DATA").unwrap_or_else(|_| "./data".to_owned()),
		..CorpusConfig::default()
	};
	let bind = env::var("RS_TITLE_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());

	let corpus = FileCorpus::new(corpus_config).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	let source: Box<dyn CorpusSource + Send + Sync> = Box::new(corpus.clone());
	let shared_data = web::Data::new(SharedData {
		generator: Generator::new(source, GenerationConfig::default()),
		corpus: Some(corpus),
	});

	info!("Listening on {bind}");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(configure)
	})
		.bind(bind)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use rs_title_core::MemoryCorpus;

	fn shared_data_with_rounds(max_rounds: usize) -> web::Data<SharedData> {
		let mut corpus = MemoryCorpus::new();
		corpus.insert("pets", ["a cat sat on the mat", "a dog sat on the rug"]);
		corpus.insert("single", ["nothing new here"]);
		let mut config = GenerationConfig::default();
		config.set_max_rounds(max_rounds).unwrap();
		let source: Box<dyn CorpusSource + Send + Sync> = Box::new(corpus);
		web::Data::new(SharedData {
			generator: Generator::new(source, config),
			corpus: None,
		})
	}

	/// Enough rounds that a corpus producing new titles half of the time
	/// always completes.
	fn shared_data() -> web::Data<SharedData> {
		shared_data_with_rounds(GenerationConfig::default().max_rounds())
	}

	#[actix_web::test]
	async fn generate_unique_titles() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/generate?corpus=pets&count=4&unique=true").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let titles: Vec<String> = test::read_body_json(resp).await;
		assert_eq!(titles.len(), 4);
		assert!(titles.iter().all(|t| t == "a cat sat on the rug" || t == "a dog sat on the mat"));
	}

	#[actix_web::test]
	async fn report_counts_duplicates() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/report?corpus=single&count=3").to_request();
		let report: serde_json::Value = test::call_and_read_body_json(&app, req).await;

		assert_eq!(report["duplicate_count"], 3);
		assert_eq!(report["generated"].as_array().map(Vec::len), Some(3));
	}

	#[actix_web::test]
	async fn exhausted_rounds_return_partial_titles() {
		let app = test::init_service(App::new().app_data(shared_data_with_rounds(3)).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/generate?corpus=single&count=2&unique=true").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

		let body: serde_json::Value = test::read_body_json(resp).await;
		assert_eq!(body["titles"].as_array().map(Vec::len), Some(0));
	}

	#[actix_web::test]
	async fn bad_requests() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;

		let req = test::TestRequest::get().uri("/v1/generate?count=2").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		let req = test::TestRequest::get().uri("/v1/generate?corpus=unknown").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
	}
}
