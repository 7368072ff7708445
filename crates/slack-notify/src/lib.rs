pub mod assemble;
pub mod cli;
pub mod config;
pub mod error;
pub mod payload;
pub mod sink;

use crate::config::{Config, Variant};
use crate::error::NotifyError;
use crate::sink::Sink;

/// Build the payload for `variant` and hand it to `sink` once.
pub async fn notify(config: &Config, variant: Variant, sink: &dyn Sink) -> Result<String, NotifyError> {
    let payload = assemble::build_webhook(config, variant);
    tracing::debug!(?variant, minimal = config.minimal, "payload assembled");
    sink.deliver(&payload).await
}
