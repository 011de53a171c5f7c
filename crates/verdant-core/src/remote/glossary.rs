//! GlossaryBackend trait definition.

use verdant_types::error::RemoteError;
use verdant_types::glossary::GlossaryIndex;

/// The remote glossary service.
pub trait GlossaryBackend: Send + Sync {
    /// `GET /api/glossary -> {category: [term]}`
    fn fetch_glossary(
        &self,
    ) -> impl std::future::Future<Output = Result<GlossaryIndex, RemoteError>> + Send;

    /// `GET /api/search?query=... -> [term]`
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RemoteError>> + Send;
}
