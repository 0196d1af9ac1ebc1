pub mod gemini;

pub use gemini::GeminiClient;

use crate::error::PredictError;

/// Text-completion seam. The orchestrator only depends on "send a prompt,
/// get raw text or a typed failure within a bounded time", so tests can
/// drive it with canned or failing backends.
pub trait TextCompletion {
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, PredictError>> + Send;
}
