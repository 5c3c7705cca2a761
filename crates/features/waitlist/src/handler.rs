use crate::Waitlist;
use crate::model::{JoinWaitlistRequest, WaitlistEntry};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use plint_derive::api_handler;
use plint_kernel::prelude::{ApiError, ApiState, ErrorResponse, IntakeResponse, WAITLIST_TAG};
use tracing::info;

pub(crate) const JOINED_MESSAGE: &str = "Successfully joined the waitlist!";

#[api_handler(
    post,
    path = "/api/waitlist",
    request_body = JoinWaitlistRequest,
    responses(
        (status = CREATED, description = "Signup stored", body = IntakeResponse<WaitlistEntry>),
        (status = BAD_REQUEST, description = "Missing or malformed email", body = ErrorResponse),
        (status = CONFLICT, description = "Email already on the waitlist", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Storage or configuration failure", body = ErrorResponse),
    ),
    tag = WAITLIST_TAG,
)]
pub(crate) async fn join_waitlist(
    State(state): State<ApiState>,
    payload: Result<Json<JoinWaitlistRequest>, JsonRejection>,
) -> Result<IntakeResponse<WaitlistEntry>, ApiError> {
    state.ensure_store_configured()?;
    let Json(request) = payload?;

    let entry = state.try_get_slice::<Waitlist>()?.join(request).await?;
    info!(id = %entry.id, "Waitlist signup stored");

    Ok(IntakeResponse::created(JOINED_MESSAGE, entry))
}
