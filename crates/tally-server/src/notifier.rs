//! Delivery of balance reminders.

use std::future::Future;

use tally_core::notify::Notice;

/// A transport that can deliver one [`Notice`].
pub trait Notifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn send(
    &self,
    notice: &Notice,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Writes each reminder to the log instead of a chat.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  type Error = std::convert::Infallible;

  async fn send(&self, notice: &Notice) -> Result<(), Self::Error> {
    tracing::info!(
      chat_id = notice.chat_id,
      employee = %notice.employee_name,
      total = %notice.total,
      "balance reminder"
    );
    Ok(())
  }
}
