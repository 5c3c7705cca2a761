use super::health;
use axum::extract::FromRef;
use plint_database::Database;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Platform routes that do not belong to a slice (`/health`).
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    Database: FromRef<S>,
{
    health::touch_start_time();
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}
