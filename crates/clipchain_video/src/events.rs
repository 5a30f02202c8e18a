//! Progress event plumbing.

use clipchain_core::PipelineEvent;
use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

/// Sending half of a pipeline event stream.
pub type EventSender = UnboundedSender<PipelineEvent>;

/// Publish an event if anyone is listening.
///
/// A dropped receiver is not an error.
pub fn emit(events: Option<&EventSender>, event: PipelineEvent) {
    let Some(tx) = events else {
        return;
    };
    if tx.send(event).is_err() {
        trace!("Event receiver dropped");
    }
}
