use actix_web::{
  web,
  HttpResponse,
  Result
};
use log::error;
use serde::{Deserialize, Serialize};
use crate::catalog;
use crate::db;
use crate::icons;
use super::dtos::*;
use super::error::{map_db_error, Error};
use super::helpers;
use super::AppState;

// Handlers for the public pages. The admin mutations
// live in the admin module.

// Cap on the quick access section of the home page:
const MAX_QUICK_ACCESS: i32 = 6;

/* --- Query string objects --- */
// These have to be public.
#[derive(Serialize, Deserialize)]
pub struct SearchQuery {
  pub q: Option<String>
}
/* --- End query string objects --- */

// Default response when no route matched the request.
// Admin routes land here too when the PIN guard turns
// them down.
pub async fn not_found() -> Result<HttpResponse, Error> {
  Err(Error::NotFound(String::from("Endpoint doesn't exist")))
}

fn cached_json(body: String) -> HttpResponse {
  HttpResponse::Ok()
    .content_type("application/json")
    .body(body)
}

// Serialize the page, remember the body under its
// path, respond.
fn render_cached<T: serde::Serialize>(
  app_state: &AppState,
  path: &str,
  dto: &T
) -> Result<HttpResponse, Error> {
  let body = serde_json::to_string(dto)
    .map_err(|e| {
      error!("Could not serialize page body - {}", e);
      Error::InternalServerError(String::from("Serialization error"))
    })?;
  app_state.page_cache.store(path, &body);
  Ok(cached_json(body))
}

// Home listing: the categories in their configured
// order plus the promoted articles. The two fetches
// are independent so they run concurrently. A read
// failure renders the degraded empty home page rather
// than an error.
pub async fn home(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  if let Some(body) = app_state.page_cache.get(helpers::HOME_PATH) {
    return Ok(cached_json(body));
  }
  let pool_categories = app_state.pool.clone();
  let pool_quick = app_state.pool.clone();
  let fetched = futures::try_join!(
    web::block(move || db::all_categories(&pool_categories)),
    web::block(move || db::quick_access_articles(&pool_quick, MAX_QUICK_ACCESS))
  );
  let (categories, quick_access) = match fetched {
    Ok(pair) => pair,
    Err(e) => {
      error!("Could not fetch home page data - {}", e);
      (Vec::new(), Vec::new())
    }
  };
  let dto = HomeDto {
    categories: categories.into_iter().map(CategoryDto::from).collect(),
    quick_access: quick_access.into_iter().map(ArticleCardDto::from).collect()
  };
  render_cached(&app_state, helpers::HOME_PATH, &dto)
}

// Flat category list, the admin article form needs it
// for its category select.
pub async fn categories(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  match db::all_categories(&app_state.pool) {
    Ok(categories) => Ok(
      HttpResponse::Ok().json(
        categories.into_iter()
          .map(CategoryDto::from)
          .collect::<Vec<CategoryDto>>()
      )
    ),
    Err(e) => Err(map_db_error(e))
  }
}

pub async fn category_page(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let slug = path.into_inner().0;
  let cache_path = helpers::category_path(&slug);
  if let Some(body) = app_state.page_cache.get(&cache_path) {
    return Ok(cached_json(body));
  }
  let category = db::category_by_slug(&app_state.pool, &slug)
    .map_err(map_db_error)?;
  let category = match category {
    Some(category) => category,
    None => return Err(Error::NotFound(String::from("Category does not exist")))
  };
  // A failing article fetch degrades to the empty
  // state, the category header still renders:
  let articles = match db::articles_for_category(&app_state.pool, category.id) {
    Ok(articles) => articles,
    Err(e) => {
      error!(
        "Could not fetch articles for category {} - {}",
        category.id,
        e
      );
      Vec::new()
    }
  };
  let dto = CategoryPageDto {
    category: CategoryDto::from(category),
    articles: articles.into_iter().map(ArticleCardDto::from).collect()
  };
  render_cached(&app_state, &cache_path, &dto)
}

pub async fn article_page(
  app_state: web::Data<AppState>,
  path: web::Path<(i32,)>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  // Count the view before anything else, a reload is a
  // view too. Nobody waits on the outcome:
  register_view(article_id, &app_state);
  let cache_path = helpers::article_path(article_id);
  if let Some(body) = app_state.page_cache.get(&cache_path) {
    return Ok(cached_json(body));
  }
  let article = match db::article_by_id(&app_state.pool, article_id) {
    Ok(article) => article,
    Err(e) => {
      error!("Could not fetch article {} - {}", article_id, e);
      None
    }
  };
  let article = match article {
    Some(article) => article,
    None => return Err(Error::NotFound(String::from("Article does not exist")))
  };
  // Join the parent category for the breadcrumb. A
  // dangling category_id just means no breadcrumb:
  let parent = match db::category_by_id(&app_state.pool, article.category_id) {
    Ok(parent) => parent,
    Err(e) => {
      error!("Could not fetch category {} - {}", article.category_id, e);
      None
    }
  };
  let dto = ArticleDto::from_article(article, parent);
  render_cached(&app_state, &cache_path, &dto)
}

// This is where you'd choose to panic or not when the
// counter thread is dead. We just log it.
fn register_view(article_id: i32, app_state: &AppState) {
  if let Err(e) = app_state.view_counter.register_view(article_id) {
    error!("Could not count article view - {}", e);
  }
}

// Accordion data: every category joined with its
// articles, grouped in memory after two concurrent
// fetches. Categories without articles don't show up.
pub async fn sidebar(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let pool_categories = app_state.pool.clone();
  let pool_articles = app_state.pool.clone();
  let fetched = futures::try_join!(
    web::block(move || db::all_categories(&pool_categories)),
    web::block(move || db::all_article_listings(&pool_articles))
  );
  let (categories, articles) = match fetched {
    Ok(pair) => pair,
    Err(e) => {
      error!("Could not fetch sidebar data - {}", e);
      (Vec::new(), Vec::new())
    }
  };
  let groups = catalog::group_by_category(categories, articles);
  let dto: Vec<SidebarCategoryDto> = groups.into_iter()
    .filter(|group| !group.articles.is_empty())
    .map(SidebarCategoryDto::from)
    .collect();
  Ok(HttpResponse::Ok().json(dto))
}

// Title search over the full article list, filtered in
// memory. A blank term just returns everything, the
// frontend decides what to do with that.
pub async fn search_articles(
  app_state: web::Data<AppState>,
  query: web::Query<SearchQuery>
) -> Result<HttpResponse, Error> {
  // Shares the basic rate limiter with the admin login
  // endpoint:
  if app_state.check_rate_limit() {
    return Err(Error::TooManyRequests);
  }
  let term = query.q.clone().unwrap_or_default();
  let listings = match db::all_article_listings(&app_state.pool) {
    Ok(listings) => listings,
    Err(e) => {
      error!("Could not fetch articles for search - {}", e);
      Vec::new()
    }
  };
  let results: Vec<SearchResultDto> =
    catalog::filter_by_title(&listings, &term)
      .into_iter()
      .map(SearchResultDto::from)
      .collect();
  Ok(HttpResponse::Ok().json(results))
}

// The catalog the admin icon picker offers. Keeping it
// served from here means the picker and the validation
// can't drift apart.
pub async fn icons() -> HttpResponse {
  HttpResponse::Ok().json(&icons::AVAILABLE_ICONS[..])
}
