//! Server configuration, read from TOML and `TALLY_*` environment variables.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  #[serde(default = "default_store_path")]
  pub store_path:    PathBuf,
  #[serde(default)]
  pub notifications: NotificationConfig,
}

/// The daily reminder job.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
  #[serde(default = "default_enabled")]
  pub enabled: bool,
  /// Local hour (0-23) at which the job runs each day.
  #[serde(default = "default_hour")]
  pub hour:    u32,
  /// Day of month on which reminders go out.
  #[serde(default = "default_day")]
  pub day:     u32,
}

impl Default for NotificationConfig {
  fn default() -> Self {
    Self {
      enabled: default_enabled(),
      hour:    default_hour(),
      day:     default_day(),
    }
  }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/tally/ledger.db") }
fn default_enabled() -> bool { true }
fn default_hour() -> u32 { 10 }
fn default_day() -> u32 { tally_core::period::CUTOFF_DAY }

impl ServerConfig {
  /// Reject values the scheduler cannot honour.
  pub fn validate(&self) -> anyhow::Result<()> {
    let n = &self.notifications;
    anyhow::ensure!(n.hour < 24, "notifications.hour must be 0-23, got {}", n.hour);
    anyhow::ensure!(
      (1..=28).contains(&n.day),
      "notifications.day must be 1-28, got {}",
      n.day
    );
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.port, 8080);
    assert!(cfg.notifications.enabled);
    assert_eq!(cfg.notifications.hour, 10);
    assert_eq!(cfg.notifications.day, 10);
    cfg.validate().unwrap();
  }

  #[test]
  fn nested_notification_table() {
    let cfg = parse(
      r#"
        port = 9000
        store_path = "/tmp/t.db"

        [notifications]
        enabled = false
        hour = 7
      "#,
    );
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/t.db"));
    assert!(!cfg.notifications.enabled);
    assert_eq!(cfg.notifications.hour, 7);
    assert_eq!(cfg.notifications.day, 10);
  }

  #[test]
  fn out_of_range_hour_is_rejected() {
    let cfg = parse("[notifications]\nhour = 24\n");
    assert!(cfg.validate().is_err());
  }
}
