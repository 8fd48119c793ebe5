//! Image generation and stock-photo search ports.

use brandkit_types::error::ServiceError;
use brandkit_types::media::{GeneratedImage, ImageRequest, ImageSearchQuery, PhotoRecord};

/// Turns a text prompt into one or more hosted image URLs.
pub trait ImageGenerator: Send + Sync {
    fn generate(
        &self,
        request: &ImageRequest,
    ) -> impl std::future::Future<Output = Result<Vec<GeneratedImage>, ServiceError>> + Send;
}

/// Searches a stock-photo library.
pub trait ImageSearch: Send + Sync {
    fn search(
        &self,
        query: &ImageSearchQuery,
    ) -> impl std::future::Future<Output = Result<Vec<PhotoRecord>, ServiceError>> + Send;
}
