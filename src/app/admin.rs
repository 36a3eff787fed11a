use actix_web::{
  web,
  HttpResponse,
  Result
};
use log::{error, info};
use crate::db;
use crate::icons;
use super::dtos::*;
use super::error::Error;
use super::helpers;
use super::AppState;

// The five mutation actions plus the login check. They
// all answer the uniform {success, message} shape, and
// datastore failures pass their message through
// verbatim so the admin sees what actually went wrong.
// The form keeps its values on the frontend, a failed
// action is retried by just submitting again.

// The PIN guard already filtered the mutation routes,
// this endpoint only exists so the admin UI can check
// the PIN up front for its login screen.
pub async fn login(
  app_state: web::Data<AppState>,
  form: web::Json<LoginForm>
) -> Result<HttpResponse, Error> {
  if app_state.check_rate_limit() {
    return Err(Error::TooManyRequests);
  }
  if form.pin == app_state.admin_pin {
    Ok(HttpResponse::Ok().json(ActionResult::success("Access granted")))
  } else {
    Ok(HttpResponse::Ok().json(ActionResult::failure("Incorrect PIN. Try again.")))
  }
}

/* --- Validation --- */
// Required-field checks plus the icon catalog
// membership, nothing fancier. These run before
// anything reaches the datastore.

fn validate_category_form(form: &CategoryForm) -> Result<(), String> {
  if form.title.trim().is_empty() {
    return Err(String::from("Title is required"));
  }
  validate_icon_name(&form.icon_name)
}

fn validate_article_form(form: &ArticleForm) -> Result<(), String> {
  if form.title.trim().is_empty() {
    return Err(String::from("Title is required"));
  }
  if form.content.trim().is_empty() {
    return Err(String::from("Content is required"));
  }
  match form.category_id {
    Some(id) if id > 0 => (),
    _ => return Err(String::from("Please select a category"))
  }
  validate_icon_name(&form.icon_name)
}

// Only names from the shared catalog may be stored. An
// empty selection is fine, the resolver has fallbacks.
fn validate_icon_name(icon_name: &Option<String>) -> Result<(), String> {
  match icon_name {
    Some(name) if !name.is_empty() && !icons::is_known_icon(name) =>
      Err(format!("Unknown icon name: {}", name)),
    _ => Ok(())
  }
}

/* --- Category actions --- */

pub async fn create_category(
  app_state: web::Data<AppState>,
  form: web::Json<CategoryForm>
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  if let Err(message) = validate_category_form(&form) {
    return Ok(HttpResponse::Ok().json(ActionResult::failure(&message)));
  }
  let category = form.into_category();
  match db::insert_category(&app_state.pool, &category) {
    Ok(id) => {
      info!("Created category {} ({})", id, category.slug);
      app_state.page_cache.invalidate(helpers::HOME_PATH);
      Ok(HttpResponse::Ok().json(
        ActionResult::success_with_id("Category created successfully", id)
      ))
    },
    Err(e) => {
      error!("Could not create category - {}", e);
      Ok(HttpResponse::Ok().json(ActionResult::failure(&e.to_string())))
    }
  }
}

pub async fn update_category(
  app_state: web::Data<AppState>,
  path: web::Path<(i32,)>,
  form: web::Json<CategoryForm>
) -> Result<HttpResponse, Error> {
  let category_id = path.into_inner().0;
  let form = form.into_inner();
  if let Err(message) = validate_category_form(&form) {
    return Ok(HttpResponse::Ok().json(ActionResult::failure(&message)));
  }
  let category = form.into_category();
  match db::update_category(&app_state.pool, category_id, &category) {
    Ok(_) => {
      app_state.page_cache.invalidate(helpers::HOME_PATH);
      app_state.page_cache.invalidate(&helpers::category_path(&category.slug));
      Ok(HttpResponse::Ok().json(
        ActionResult::success("Category updated successfully")
      ))
    },
    Err(e) => {
      error!("Could not update category {} - {}", category_id, e);
      Ok(HttpResponse::Ok().json(ActionResult::failure(&e.to_string())))
    }
  }
}

pub async fn delete_category(
  app_state: web::Data<AppState>,
  path: web::Path<(i32,)>
) -> Result<HttpResponse, Error> {
  let category_id = path.into_inner().0;
  // The slug is only needed to invalidate the category
  // page afterwards:
  let slug = match db::category_slug_by_id(&app_state.pool, category_id) {
    Ok(slug) => slug,
    Err(e) => {
      error!(
        "Could not look up slug for category {} - {}",
        category_id,
        e
      );
      None
    }
  };
  match db::delete_category(&app_state.pool, category_id) {
    Ok(_) => {
      // Articles under the category stay where they
      // are, the pages tolerate the missing parent.
      app_state.page_cache.invalidate(helpers::HOME_PATH);
      if let Some(slug) = slug {
        app_state.page_cache.invalidate(&helpers::category_path(&slug));
      }
      Ok(HttpResponse::Ok().json(
        ActionResult::success("Category deleted successfully")
      ))
    },
    Err(e) => {
      error!("Could not delete category {} - {}", category_id, e);
      Ok(HttpResponse::Ok().json(ActionResult::failure(&e.to_string())))
    }
  }
}

/* --- Article actions --- */

// Home, optionally the article page itself, and the
// parent category page. The parent lookup happens only
// for the invalidation.
fn invalidate_article_paths(
  app_state: &AppState,
  article_id: Option<i32>,
  category_id: i32
) {
  app_state.page_cache.invalidate(helpers::HOME_PATH);
  if let Some(id) = article_id {
    app_state.page_cache.invalidate(&helpers::article_path(id));
  }
  match db::category_slug_by_id(&app_state.pool, category_id) {
    Ok(Some(slug)) => {
      app_state.page_cache.invalidate(&helpers::category_path(&slug));
    },
    Ok(None) => (),
    Err(e) => {
      error!(
        "Could not look up slug for category {} - {}",
        category_id,
        e
      );
    }
  }
}

pub async fn create_article(
  app_state: web::Data<AppState>,
  form: web::Json<ArticleForm>
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  // An article without a category is rejected here,
  // before anything reaches the datastore:
  if let Err(message) = validate_article_form(&form) {
    return Ok(HttpResponse::Ok().json(ActionResult::failure(&message)));
  }
  let article = form.into_article();
  match db::insert_article(&app_state.pool, &article) {
    Ok(id) => {
      info!("Created article {} ({})", id, article.title);
      invalidate_article_paths(&app_state, None, article.category_id);
      Ok(HttpResponse::Ok().json(
        ActionResult::success_with_id("Article created successfully", id)
      ))
    },
    Err(e) => {
      error!("Could not create article - {}", e);
      Ok(HttpResponse::Ok().json(ActionResult::failure(&e.to_string())))
    }
  }
}

pub async fn update_article(
  app_state: web::Data<AppState>,
  path: web::Path<(i32,)>,
  form: web::Json<ArticleForm>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  let form = form.into_inner();
  if let Err(message) = validate_article_form(&form) {
    return Ok(HttpResponse::Ok().json(ActionResult::failure(&message)));
  }
  let article = form.into_article();
  match db::update_article(&app_state.pool, article_id, &article) {
    Ok(_) => {
      invalidate_article_paths(
        &app_state,
        Some(article_id),
        article.category_id
      );
      Ok(HttpResponse::Ok().json(
        ActionResult::success("Article updated successfully")
      ))
    },
    Err(e) => {
      error!("Could not update article {} - {}", article_id, e);
      Ok(HttpResponse::Ok().json(ActionResult::failure(&e.to_string())))
    }
  }
}

pub async fn delete_article(
  app_state: web::Data<AppState>,
  path: web::Path<(i32,)>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  // Fetch the article first, its category_id decides
  // which category page goes stale:
  let parent_category_id = match db::article_by_id(&app_state.pool, article_id) {
    Ok(Some(article)) => Some(article.category_id),
    Ok(None) => None,
    Err(e) => {
      error!(
        "Could not fetch article {} before deletion - {}",
        article_id,
        e
      );
      None
    }
  };
  match db::delete_article(&app_state.pool, article_id) {
    Ok(_) => {
      match parent_category_id {
        Some(category_id) => invalidate_article_paths(
          &app_state,
          Some(article_id),
          category_id
        ),
        None => {
          app_state.page_cache.invalidate(helpers::HOME_PATH);
          app_state.page_cache.invalidate(&helpers::article_path(article_id));
        }
      }
      Ok(HttpResponse::Ok().json(
        ActionResult::success("Article deleted successfully")
      ))
    },
    Err(e) => {
      error!("Could not delete article {} - {}", article_id, e);
      Ok(HttpResponse::Ok().json(ActionResult::failure(&e.to_string())))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn article_form(category_id: Option<i32>) -> ArticleForm {
    ArticleForm {
      title: "Reset password".to_string(),
      content: "Body".to_string(),
      description: None,
      category_id,
      icon_name: None,
      video_url: None,
      is_quick_access: None
    }
  }

  #[test]
  fn article_without_a_category_is_rejected() {
    let result = validate_article_form(&article_form(None));
    assert_eq!(Err("Please select a category".to_string()), result);
    // Zero is the "nothing selected" value some forms
    // send, it counts as missing too:
    assert!(validate_article_form(&article_form(Some(0))).is_err());
  }

  #[test]
  fn article_with_a_category_passes() {
    assert!(validate_article_form(&article_form(Some(3))).is_ok());
  }

  #[test]
  fn blank_article_titles_are_rejected() {
    let mut form = article_form(Some(3));
    form.title = "   ".to_string();
    assert!(validate_article_form(&form).is_err());
  }

  #[test]
  fn unknown_icons_are_rejected() {
    let mut form = article_form(Some(3));
    form.icon_name = Some("NoSuchIcon".to_string());
    assert!(validate_article_form(&form).is_err());
    form.icon_name = Some("KeyRound".to_string());
    assert!(validate_article_form(&form).is_ok());
  }

  #[test]
  fn category_titles_are_required() {
    let form = CategoryForm {
      title: String::new(),
      slug: None,
      description: None,
      icon_name: None,
      home_order: None
    };
    assert!(validate_category_form(&form).is_err());
  }
}
