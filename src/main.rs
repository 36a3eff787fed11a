mod app;
mod catalog;
mod config;
mod db;
mod icons;
mod utils;
mod viewcount;

use color_eyre::Result;
use dotenv::dotenv;
use std::env;

// The actual server setup lives in app::run, this only
// takes care of the process-wide stuff.
#[actix_web::main]
async fn main() -> Result<()> {
  dotenv().ok();
  // The config module assumes RUST_LOG has been set,
  // we provide the default here once:
  if env::var("RUST_LOG").is_err() {
    env::set_var("RUST_LOG", "info");
  }
  env_logger::init();

  app::run().await
}
