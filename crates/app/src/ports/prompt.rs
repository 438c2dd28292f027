//! Prompt port: blocking acknowledgments and confirmations.

use std::future::Future;
use std::sync::Arc;

/// Modal interaction with the user.
pub trait UserPrompt: Send + Sync {
    /// Show a message the user must acknowledge.
    fn alert(&self, message: &str);

    /// Ask a yes/no question. Resolves to `true` only on an explicit yes.
    fn confirm(&self, message: &str) -> impl Future<Output = bool> + Send;
}

impl<T: UserPrompt> UserPrompt for Arc<T> {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&self, message: &str) -> impl Future<Output = bool> + Send {
        (**self).confirm(message)
    }
}
