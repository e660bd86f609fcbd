use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::{error, info, warn};

use crate::{
    adapters::inbound::http::{
        dto::{ErrorResponseDto, HealthResponseDto, ReplicationRequestDto, SuccessResponseDto},
        router::AppState,
    },
    domain::{
        errors::ReplicationError,
        models::ReplicationRequest,
        value_objects::ObjectKey,
    },
};

/// Handle single-object replication.
///
/// Performs real writes to the target store; there is no dry-run mode.
pub async fn replicate_object(
    State(app_state): State<AppState>,
    Json(body): Json<ReplicationRequestDto>,
) -> Result<(StatusCode, Json<SuccessResponseDto>), (StatusCode, Json<ErrorResponseDto>)> {
    let key = ObjectKey::new(body.s3_key).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponseDto::from_validation_error(&e)),
        )
    })?;

    info!(key = %key, "replication requested");

    let outcome = app_state
        .replication_service
        .replicate(ReplicationRequest::new(key))
        .await
        .map_err(|e| {
            log_failure(&e);
            let status_code = StatusCode::from(&e);
            (
                status_code,
                Json(ErrorResponseDto::from_replication_error(&e)),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(SuccessResponseDto::from_outcome(&outcome)),
    ))
}

/// Liveness probe
pub async fn health() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "ok".to_string(),
    })
}

fn log_failure(err: &ReplicationError) {
    match err {
        ReplicationError::NotFoundInSource { key } => {
            warn!(key = %key, "object not found in source")
        }
        other => error!(error = %other, "replication failed"),
    }
}
