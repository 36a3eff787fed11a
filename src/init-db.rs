#![allow(dead_code)]
mod config;
mod db;
mod utils;

use color_eyre::Result;
use dotenv::dotenv;
use getopts::Options;
use log::info;
use r2d2_sqlite::SqliteConnectionManager;
use std::env;
use crate::config::Config;
use crate::db::entities::{Article, Category};
use crate::db::Pool;
use crate::utils::time_utils;

// Copied the usage printing from the getopts doc.
fn print_usage(program: &str, opts: Options) {
  let brief = format!("Usage: {} [options]", program);
  print!("{}", opts.usage(&brief));
}

/**
 * Binary that creates the database schema, with an
 * option to load a couple of demo rows for local
 * development.
 */
fn main() -> Result<()> {
  dotenv().ok();
  env_logger::init();

  let args: Vec<String> = env::args().collect();
  let program = args[0].clone();
  let mut opts = Options::new();
  opts.optflag("s", "seed", "Insert demo categories and articles");
  opts.optflag("h", "help", "Program usage");
  let opt_matches = opts.parse(&args[1..])?;
  if opt_matches.opt_present("h") {
    print_usage(&program, opts);
    return Ok(());
  }

  let config = Config::from_env()
    .expect("Configuration (environment or .env file) is missing");
  let manager = SqliteConnectionManager::file(&config.db_path);
  let pool = Pool::new(manager)
    .expect("Database connection failed");

  info!("Creating schema in {}...", config.db_path);
  db::create_schema(&pool)?;

  if opt_matches.opt_present("s") {
    info!("Seeding demo content...");
    seed_demo_content(&pool)?;
  }

  Ok(())
}

fn seed_demo_content(pool: &Pool) -> Result<()> {
  let categories = [
    (
      "Getting Started",
      "getting-started",
      "First steps on the platform",
      "Rocket",
      1
    ),
    (
      "Billing",
      "billing",
      "Invoices, payments and refunds",
      "CreditCard",
      2
    ),
    (
      "Security",
      "security",
      "Keeping your account safe",
      "Shield",
      3
    )
  ];
  for (title, slug, description, icon_name, home_order) in categories.iter() {
    let category_id = db::insert_category(pool, &Category {
      id: -1,
      title: title.to_string(),
      slug: slug.to_string(),
      description: Some(description.to_string()),
      icon_name: Some(icon_name.to_string()),
      home_order: Some(*home_order)
    })?;
    db::insert_article(pool, &Article {
      id: -1,
      title: format!("About {}", title),
      content: format!(
        "Everything you need to know about {}.",
        title.to_lowercase()
      ),
      description: None,
      category_id,
      icon_name: None,
      video_url: None,
      // Promote the first demo article to the home
      // page so the quick access section isn't empty:
      is_quick_access: if *home_order == 1 { 1 } else { 0 },
      view_count: 0,
      created_at: time_utils::current_timestamp()
    })?;
  }
  Ok(())
}
