use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use color_eyre::Result;
use eyre::WrapErr;
use log::{debug, error};
use r2d2_sqlite::SqliteConnectionManager;
use std::sync::RwLock;
use crate::config::Config;
use crate::db::Pool;
use crate::viewcount::ViewCountService;
use page_cache::PageCache;
use rate_limiter::BasicRateLimiter;
mod admin;
mod dtos;
mod error;
mod guards;
mod handlers;
mod helpers;
mod page_cache;
mod rate_limiter;

// Declare app state struct:
pub struct AppState {
  pub pool: Pool,
  pub view_counter: ViewCountService,
  pub page_cache: PageCache,
  pub rate_limiter: RwLock<BasicRateLimiter>,
  pub admin_pin: String
}

impl AppState {

  // True when the caller should get a 429. Lock errors
  // are logged and treated as "not limited", a broken
  // limiter shouldn't take the endpoints down with it.
  pub fn check_rate_limit(&self) -> bool {
    match self.rate_limiter.write() {
      Ok(mut limiter) => limiter.register_hit(),
      Err(e) => {
        error!("Could not get a write handle on the rate \
          limiter, SHOULD NEVER HAPPEN - {}", e);
        false
      }
    }
  }

}

// Function to start the server. Has to be async because
// of the .await at the end, main.rs carries the actix
// runtime decorator.
pub async fn run() -> Result<()> {
  let config = Config::from_env()
    .expect("Configuration (environment or .env file) is missing");
  debug!("Current config: {:?}", config);
  let manager = SqliteConnectionManager::file(&config.db_path);
  let pool = Pool::new(manager)
    .expect("Database connection failed");
  // The DDL is all IF NOT EXISTS, running it on every
  // start costs nothing and a fresh deployment works
  // without a separate init step:
  crate::db::create_schema(&pool)
    .expect("Could not create the database schema");

  // The view counter drains its queue on a dedicated
  // thread with its own handle on the pool:
  let view_counter = ViewCountService::open(&pool, config.message_queue_size);

  // Got to copy these before "config" is picked apart
  // for the app state:
  let bind_address = config.bind_address.clone();
  let admin_pin = config.admin_pin.clone();

  let app_state = web::Data::new(
    AppState {
      pool,
      view_counter,
      page_cache: PageCache::new(),
      rate_limiter: RwLock::new(
        BasicRateLimiter::new(
          config.rl_max_requests,
          config.rl_max_requests_time,
          config.rl_block_duration
        )
      ),
      admin_pin: config.admin_pin
    }
  );

  HttpServer::new(move || {
    let admin_pin = admin_pin.clone();
    App::new()
      .app_data(app_state.clone())
      .app_data(web::PathConfig::default().error_handler(|_, _| {
        // No idea how this works but it does:
        actix_web::error::ErrorBadRequest("Invalid path arguments")
      }))
      .app_data(web::QueryConfig::default().error_handler(|_, _| {
        actix_web::error::ErrorBadRequest("Invalid query string arguments")
      }))
      // The frontend is served from another origin:
      .wrap(Cors::permissive())
      .wrap(middleware::Logger::default())
      .configure(move |cfg| base_endpoints_config(cfg, admin_pin))
      .default_service(web::route().to(handlers::not_found))
  })
  .bind(bind_address)?
  .run()
  .await
  .context("Start Actix web server")

}

// Route configuration:
fn base_endpoints_config(cfg: &mut web::ServiceConfig, admin_pin: String) {
  // The mutation routes don't match at all without the
  // right PIN header, callers get the default 404.
  let pin_guard = guards::PinGuard::new(admin_pin);

  cfg.route("/", web::get().to(handlers::home))
    .route("/sidebar", web::get().to(handlers::sidebar))
    .route("/categories", web::get().to(handlers::categories))
    .route("/categories/{slug}", web::get().to(handlers::category_page))
    // Has to be registered before the {articleId} route:
    .route("/articles/search", web::get().to(handlers::search_articles))
    .route("/articles/{articleId}", web::get().to(handlers::article_page))
    .route("/icons", web::get().to(handlers::icons))
    .route("/admin/login", web::post().to(admin::login))
    .service(
      web::scope("/admin")
        .guard(pin_guard)
        .route("/categories", web::post().to(admin::create_category))
        .route("/categories/{categoryId}", web::put().to(admin::update_category))
        .route("/categories/{categoryId}", web::delete().to(admin::delete_category))
        .route("/articles", web::post().to(admin::create_article))
        .route("/articles/{articleId}", web::put().to(admin::update_article))
        .route("/articles/{articleId}", web::delete().to(admin::delete_article))
    );
}
