//! Notifier trait for pushing messages to a chat

use async_trait::async_trait;

use crate::error::NotifierError;

/// Trait for sending notifications to the configured chat destination
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Chat destination the notifier delivers to
    fn destination(&self) -> &str;

    /// Send a message. Failures are logged here and returned to the caller.
    async fn send(&self, text: &str) -> Result<(), NotifierError>;
}
