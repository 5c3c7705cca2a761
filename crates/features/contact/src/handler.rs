use crate::Contact;
use crate::model::{ContactQuery, SubmitQueryRequest};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use plint_derive::api_handler;
use plint_kernel::prelude::{ApiError, ApiState, CONTACT_TAG, ErrorResponse, IntakeResponse};
use tracing::info;

pub(crate) const SUBMITTED_MESSAGE: &str = "Your query has been submitted successfully!";

#[api_handler(
    post,
    path = "/api/contact",
    request_body = SubmitQueryRequest,
    responses(
        (status = CREATED, description = "Query stored", body = IntakeResponse<ContactQuery>),
        (status = BAD_REQUEST, description = "Missing email or query, or query too long", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Storage or configuration failure", body = ErrorResponse),
    ),
    tag = CONTACT_TAG,
)]
pub(crate) async fn submit_query(
    State(state): State<ApiState>,
    payload: Result<Json<SubmitQueryRequest>, JsonRejection>,
) -> Result<IntakeResponse<ContactQuery>, ApiError> {
    state.ensure_store_configured()?;
    let Json(request) = payload?;

    let query = state.try_get_slice::<Contact>()?.submit(request).await?;
    info!(id = %query.id, "Contact query stored");

    Ok(IntakeResponse::created(SUBMITTED_MESSAGE, query))
}
