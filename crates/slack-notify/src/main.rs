use clap::Parser;
use tracing_subscriber::EnvFilter;

use slack_notify::cli::{usage_exit_code, Cli};
use slack_notify::config::{Config, Variant};
use slack_notify::error::NotifyError;
use slack_notify::notify;
use slack_notify::sink::WebhookSink;

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(usage_exit_code(&err));
        }
    };

    // stdout is reserved for the response status line
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let variant = match cli.format.map(Ok).unwrap_or_else(Variant::from_env) {
        Ok(variant) => variant,
        Err(err) => exit_with(err),
    };
    let config = match Config::from_env(variant) {
        Ok(config) => config,
        Err(err) => exit_with(err),
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let sink = WebhookSink::new(config.webhook.clone());
    match rt.block_on(notify(&config, variant, &sink)) {
        Ok(status) => {
            println!("{status}");
            Ok(())
        }
        Err(err) => exit_with(err),
    }
}

fn exit_with(err: NotifyError) -> ! {
    if err.is_config() {
        eprintln!("{err}");
    } else {
        eprintln!("Error sending message: {err}");
    }
    std::process::exit(err.exit_code());
}
