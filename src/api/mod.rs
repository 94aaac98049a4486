mod handlers;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::DocumentStore;

pub use handlers::{MessageResponse, LIVENESS_MESSAGE, UPDATED_MESSAGE};

pub fn create_router(store: DocumentStore) -> Router {
    let api = Router::new().route(
        "/sheet",
        get(handlers::get_sheet).post(handlers::replace_sheet),
    );

    Router::new()
        .route("/", get(handlers::liveness))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(store)
}
