use axum::Router;
use axum::extract::DefaultBodyLimit;
use plint::kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Plint intake API", description = "Waitlist signups and contact queries"))]
struct ApiDoc;

/// Builds the full application: slice routes, `/health`, the API reference at `/api`,
/// request tracing and the body size limit.
pub fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();
    let body_limit = state.config.server.body_limit;

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(plint::server::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api", api_doc);

    Router::new().merge(openapi_routes).merge(scalar_routes)
}
