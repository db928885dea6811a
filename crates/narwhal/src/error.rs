#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("container dimensions must be finite: {width}x{height}")]
    InvalidContainer { width: f64, height: f64 },
    #[error("invalid bubble spec {image_id:?}: {reason}")]
    InvalidSpec { image_id: String, reason: String },
    #[error("duplicate bubble image id: {image_id}")]
    DuplicateImageId { image_id: String },
    #[error("layout request JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
