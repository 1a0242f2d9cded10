pub mod config;
pub mod error;
pub mod notify;
pub mod probe;
pub mod status;
pub mod ticker;
pub mod worker;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::Error;
pub use notify::{Notification, Notifier, WebhookNotifier};
pub use probe::{HttpProber, Prober};
pub use status::{Status, StatusRegistry, Transition};
pub use ticker::{SleepTicker, Ticker};
pub use worker::{CheckReport, Monitor, Outcome};
