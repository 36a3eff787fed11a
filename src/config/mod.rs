// Adding the context method to errors:
use eyre::WrapErr;
use color_eyre::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
  pub db_path: String,
  pub bind_address: String,
  // Shared PIN the admin endpoints check. Not a
  // security boundary, it keeps casual visitors out
  // of the management panel and nothing more.
  pub admin_pin: String,
  // Buffer size for the view counter thread:
  pub message_queue_size: usize,
  // Rate limiter settings:
  pub rl_max_requests: u32,
  pub rl_max_requests_time: u32,
  pub rl_block_duration: u32
}

impl Config {

  pub fn from_env() -> Result<Config> {
    let mut c = config::Config::new();
    // RUST_LOG is already set in main.rs if it
    // was absent.
    // Let's set the other default values. You have
    // to use lowercase when compared to what's
    // in the .env file.
    // db_path has no default, starting without one
    // fails loudly.
    c.set_default("bind_address", "127.0.0.1:8080")?;
    c.set_default("admin_pin", "300382")?;
    // Used to set the queue size for sync_sender
    // (the view counter thread uses it):
    c.set_default("message_queue_size", 30)?;
    // Settings for the basic rate limiter guarding
    // the search and admin login endpoints:
    c.set_default("rl_max_requests", 120)?;
    c.set_default("rl_max_requests_time", 60)?;
    c.set_default("rl_block_duration", 60)?;

    c.merge(config::Environment::default())?;
    // The error has to be given a context for
    // color_eyre to work here:
    c.try_into()
      .context("Loading configuration from env")
  }

}
