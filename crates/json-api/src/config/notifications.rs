//! Notifications Config

use clap::Args;
use shopease_app::notifications::RelayConfig;

/// Order status notification settings.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Relay endpoint that delivers customer emails; notifications are only
    /// logged when unset
    #[arg(long, env = "NOTIFY_RELAY_URL")]
    pub notify_relay_url: Option<String>,

    /// Bearer token for the relay
    #[arg(long, env = "NOTIFY_RELAY_TOKEN", hide_env_values = true)]
    pub notify_relay_token: Option<String>,
}

impl NotificationsConfig {
    /// Relay configuration, when a relay URL is set.
    pub fn relay(&self) -> Option<RelayConfig> {
        self.notify_relay_url.clone().map(|url| RelayConfig {
            url,
            token: self.notify_relay_token.clone(),
        })
    }
}
