use clap::error::ErrorKind;
use clap::Parser;

use crate::config::Variant;

/// slack-notify – post CI job status to a Slack Incoming Webhook
///
/// All message content is read from the environment (SLACK_WEBHOOK,
/// SLACK_TITLE, SLACK_MESSAGE, ...).
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Activate verbose output (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Message layout to post [default: SLACK_FORMAT, else blocks]
    #[arg(long, value_enum)]
    pub format: Option<Variant>,
}

impl Cli {
    /// Log filter used when RUST_LOG is unset.
    pub fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Exit status for a command-line parse outcome. Usage errors share the
/// configuration status so that 2 always means a failed delivery.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
