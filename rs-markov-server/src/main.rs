use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use rs_markov_core::io::read_file;
use rs_markov_core::{MarkovError, MarkovModel};

/// Upper bound on sequences returned by a single `/v1/generate` call.
const MAX_COUNT: usize = 100;

/// Command line configuration of the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "rs-markov-server")]
#[command(about = "HTTP interface to a character-level Markov chain", long_about = None)]
struct Config {
	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Markov order (number of context characters)
	#[arg(long, default_value_t = 1)]
	order: usize,

	/// Corpus to train on at startup, one sequence per line
	#[arg(long, value_name = "PATH")]
	data: Option<String>,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	seed: Option<u64>,
}

#[derive(Serialize)]
struct ModelStats {
	order: usize,
	states: usize,
	transitions: usize,
	trained: bool,
}

/// Model shared by all workers: training writes, everything else reads.
struct SharedData {
	model: RwLock<MarkovModel<char>>,
}

impl GenerateParams {
	fn count(&self) -> usize {
		self.count.unwrap_or(1).clamp(1, MAX_COUNT)
	}
}

/// HTTP PUT endpoint `/v1/train`
///
/// Body is a newline-separated list of training sequences.
#[put("/v1/train")]
async fn put_train(data: web::Data<SharedData>, body: String) -> impl Responder {
	let mut model = match data.model.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let recorded = model.train(body.lines());
	info!("Trained {} sequences, {} states", recorded, model.state_count());
	HttpResponse::Ok().body(format!("Trained {} sequences", recorded))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns `count` generated sequences, one per line.
/// A `seed` makes the output reproducible.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let model = match data.model.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let result = match query.seed {
		Some(seed) => model.generate_many(query.count(), &mut StdRng::seed_from_u64(seed)),
		None => model.generate_many(query.count(), &mut rand::rng()),
	};

	match result {
		Ok(sequences) => HttpResponse::Ok().body(sequences.join("\n")),
		Err(e @ MarkovError::MissingState { .. }) => {
			warn!("Generation failed: {e}");
			HttpResponse::Conflict().body(e.to_string())
		}
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/dump")]
async fn get_dump(data: web::Data<SharedData>) -> impl Responder {
	match data.model.read() {
		Ok(model) => HttpResponse::Ok().body(model.dump()),
		Err(_) => HttpResponse::InternalServerError().body("Model lock failed"),
	}
}

#[get("/v1/table")]
async fn get_table(data: web::Data<SharedData>) -> impl Responder {
	match data.model.read() {
		Ok(model) => HttpResponse::Ok().json(model.snapshot()),
		Err(_) => HttpResponse::InternalServerError().body("Model lock failed"),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>) -> impl Responder {
	let model = match data.model.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().json(ModelStats {
		order: model.order(),
		states: model.state_count(),
		transitions: model.transition_count(),
		trained: model.is_trained(),
	})
}

/// Builds the shared model, training it on `config.data` if set.
fn build_shared_data(config: &Config) -> std::io::Result<SharedData> {
	let mut model = MarkovModel::new(config.order)
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

	if let Some(path) = &config.data {
		let lines = read_file(path)?;
		let recorded = model.train(&lines);
		info!("Loaded {}: {} sequences, {} states", path, recorded, model.state_count());
	}

	Ok(SharedData { model: RwLock::new(model) })
}

/// Main entry point for the server.
///
/// Builds the model, wraps it in a `RwLock` so generations can run
/// concurrently while training is exclusive, and starts an Actix-web
/// HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let config = Config::parse();
	let shared_data = web::Data::new(build_shared_data(&config)?);

	info!("Listening on {}:{} (order {})", config.host, config.port, config.order);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(put_train)
			.service(get_generated)
			.service(get_dump)
			.service(get_table)
			.service(get_stats)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
