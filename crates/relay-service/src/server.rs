//! HTTP server for the relay API.
//!
//! Exposes digest computation, transfer submission and read-only views of
//! nonce and balance state under `/api`.

use crate::apis::assets::AssetsResponse;
use axum::{
	extract::{Path, State},
	response::Json,
	routing::{get, post},
	Router,
};
use relay_config::{ApiConfig, Config};
use relay_core::TransferAuthorizer;
use relay_types::{
	APIError, BalanceResponse, DigestResponse, NonceStatusResponse, TransferIntent,
	TransferRequest, TransferResponse,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// The authorizer; locked per request so transfers never interleave.
	pub authorizer: Arc<Mutex<TransferAuthorizer>>,
	/// Complete configuration.
	pub config: Arc<Config>,
}

/// Builds the API router with its middleware.
pub fn router(state: AppState) -> Router {
	Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/digest", post(handle_digest))
				.route("/transfers", post(handle_transfer))
				.route("/nonces/{sender}/{nonce}", get(handle_nonce_status))
				.route("/assets", get(handle_list_assets))
				.route("/assets/{asset}/balances/{owner}", get(handle_balance)),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state)
}

/// Starts the HTTP server and serves until the listener fails.
pub async fn start_server(
	api_config: ApiConfig,
	config: Config,
	authorizer: TransferAuthorizer,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(AppState {
		authorizer: Arc::new(Mutex::new(authorizer)),
		config: Arc::new(config),
	});

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Relay API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles POST /api/digest requests.
async fn handle_digest(Json(intent): Json<TransferIntent>) -> Json<DigestResponse> {
	Json(crate::apis::digest::process_digest_request(&intent))
}

/// Handles POST /api/transfers requests.
async fn handle_transfer(
	State(state): State<AppState>,
	Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, APIError> {
	match crate::apis::transfer::submit_transfer(&state.authorizer, request).await {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Transfer request failed: {}", e);
			Err(e)
		},
	}
}

/// Handles GET /api/nonces/{sender}/{nonce} requests.
async fn handle_nonce_status(
	Path((sender, nonce)): Path<(String, String)>,
	State(state): State<AppState>,
) -> Result<Json<NonceStatusResponse>, APIError> {
	crate::apis::nonces::get_nonce_status(&state.authorizer, &sender, &nonce)
		.await
		.map(Json)
}

/// Handles GET /api/assets requests.
async fn handle_list_assets(State(state): State<AppState>) -> Json<AssetsResponse> {
	Json(crate::apis::assets::list_assets(&state.config))
}

/// Handles GET /api/assets/{asset}/balances/{owner} requests.
async fn handle_balance(
	Path((asset, owner)): Path<(String, String)>,
	State(state): State<AppState>,
) -> Result<Json<BalanceResponse>, APIError> {
	crate::apis::assets::get_balance(&state.authorizer, &asset, &owner)
		.await
		.map(Json)
}
