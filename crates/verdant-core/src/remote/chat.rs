//! ChatBackend trait definition.

use tokio_util::sync::CancellationToken;
use verdant_types::error::RemoteError;

/// The remote conversational service.
///
/// Implementations live in verdant-infra (e.g., `HttpChatClient`).
pub trait ChatBackend: Send + Sync {
    /// Ask the service for a short title describing `input`.
    ///
    /// `POST /api/generate_title {input} -> {title}`
    fn generate_title(
        &self,
        input: &str,
    ) -> impl std::future::Future<Output = Result<String, RemoteError>> + Send;

    /// Ask the service to answer `question`.
    ///
    /// `POST /api/chat {question} -> {response}`
    ///
    /// Must resolve to `RemoteError::Cancelled` once `cancel` fires.
    fn chat(
        &self,
        question: &str,
        cancel: &CancellationToken,
    ) -> impl std::future::Future<Output = Result<String, RemoteError>> + Send;
}
