//! Video library handlers.

use axum::Json;
use axum::extract::{Multipart, State};
use bytes::Bytes;

use pdview_core::error::AppError;
use pdview_entity::video::VideoEntry;

use crate::dto::request::VideoNameRequest;
use crate::dto::response::{
    ActiveVideoResponse, VideoDeleteResponse, VideoSelectResponse, VideoUploadResponse,
};
use crate::handlers::parse_json;
use crate::state::AppState;

/// GET /api/videos
pub async fn list_videos(State(state): State<AppState>) -> Result<Json<Vec<VideoEntry>>, AppError> {
    let videos = state.videos.list().await?;
    Ok(Json(videos))
}

/// POST /api/videos/select
pub async fn select_video(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VideoSelectResponse>, AppError> {
    let req: VideoNameRequest = parse_json(&body)?;

    let active_video = state.videos.select(&req.video_name).await?;

    Ok(Json(VideoSelectResponse {
        success: true,
        message: "Video selected successfully".to_string(),
        active_video,
    }))
}

/// POST /api/videos/upload — multipart form with a `video` field.
///
/// Multipart parse failures are echoed back with their cause; the
/// operator is on a trusted local network and needs them to debug.
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VideoUploadResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("video") {
            let filename = field
                .file_name()
                .map(String::from)
                .ok_or_else(|| AppError::validation("The 'video' field carries no file name"))?;
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, data));
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::validation("Missing form field 'video'"))?;

    state.videos.upload(&filename, data).await?;

    Ok(Json(VideoUploadResponse {
        success: true,
        message: "Video uploaded successfully".to_string(),
        filename,
    }))
}

/// GET /api/videos/active
pub async fn active_video(State(state): State<AppState>) -> Json<ActiveVideoResponse> {
    let active_video = state.videos.active_name().await;

    Json(ActiveVideoResponse {
        video_path: VideoEntry::public_path(&active_video),
        active_video,
    })
}

/// POST|DELETE /api/videos/delete
pub async fn delete_video(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VideoDeleteResponse>, AppError> {
    let req: VideoNameRequest = parse_json(&body)?;

    state.videos.delete(&req.video_name).await?;

    Ok(Json(VideoDeleteResponse {
        success: true,
        message: "Video deleted successfully".to_string(),
    }))
}
