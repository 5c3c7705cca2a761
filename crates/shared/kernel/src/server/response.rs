use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::borrow::Cow;
use utoipa::ToSchema;

/// Success envelope: `{ "success": true, "message": ..., "data": ... }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct IntakeResponse<T> {
    pub success: bool,
    #[schema(value_type = String)]
    pub message: Cow<'static, str>,
    pub data: T,
}

impl<T: Serialize> IntakeResponse<T> {
    pub fn created(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self { success: true, message: message.into(), data }
    }
}

impl<T: Serialize> IntoResponse for IntakeResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}
