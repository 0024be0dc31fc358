use crate::core::document::Document;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and parse the body as HTML.
    async fn fetch(&self, url: &str) -> Result<Document>;
}

/// Turns one fetched page into a typed result.
pub trait PageExtractor {
    type Output;

    fn extract(&self, doc: &Document) -> Result<Self::Output>;
}
