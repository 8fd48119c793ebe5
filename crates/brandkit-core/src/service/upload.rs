//! Image persistence port.

use brandkit_types::error::ServiceError;
use brandkit_types::media::{UploadRequest, UploadedAsset};

/// Stores inline image data and returns a permanent URL.
pub trait ImageUploader: Send + Sync {
    fn upload(
        &self,
        request: &UploadRequest,
    ) -> impl std::future::Future<Output = Result<UploadedAsset, ServiceError>> + Send;
}
