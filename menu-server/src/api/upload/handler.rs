//! Image Upload Handler
//!
//! Accepts menu-item and feedback images as multipart form data, converts
//! to JPEG and stores them content-addressed (the SHA-256 of the original
//! bytes is the filename) under the public static dir, so duplicate
//! uploads collapse to one file.

use axum::{Json, extract::{Multipart, State}};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Cursor;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored images
const JPEG_QUALITY: u8 = 85;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub url: String,
}

fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Decode, then re-encode as JPEG
fn compress_to_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidImageFile, e.to_string()))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img.write_with_encoder(encoder).map_err(|e| {
            AppError::with_message(
                ErrorCode::InvalidImageFile,
                format!("Failed to compress image: {e}"),
            )
        })?;
    }
    Ok(buffer)
}

fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::new(ErrorCode::FileTooLarge).with_detail(
            "max_bytes",
            MAX_FILE_SIZE as u64,
        ));
    }
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::NoFileProvided));
    }
    if !SUPPORTED_FORMATS.contains(&ext) {
        return Err(
            AppError::new(ErrorCode::UnsupportedFileFormat).with_detail("extension", ext)
        );
    }
    Ok(())
}

/// POST /api/upload/image
pub async fn upload_image(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        .ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;

    let original_name = field.file_name().unwrap_or("upload").to_string();
    let ext = original_name
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase();

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

    validate_image(&data, &ext)?;

    let hash = calculate_hash(&data);
    let filename = format!("{}.jpg", hash);
    let path = state.config.uploads_dir().join(&filename);

    // Content-addressed: a re-upload of the same bytes is a no-op
    if !path.exists() {
        let jpeg = compress_to_jpeg(&data)?;
        std::fs::write(&path, &jpeg).map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to store image: {e}"),
            )
        })?;
    }

    tracing::debug!(filename = %filename, size = data.len(), "Image uploaded");

    Ok(Json(UploadResponse {
        url: format!("/uploads/{}", filename),
        filename,
        original_name,
        size: data.len(),
    }))
}
