use rusqlite::{params, OptionalExtension, Row, ToSql, NO_PARAMS};
pub mod entities;
mod helpers;
mod mappers;
mod queries;
use eyre::WrapErr;
use color_eyre::Result;
use entities::*;
use helpers::generate_field_equal_qmark;
use mappers::{map_article, map_article_listing, map_category};
use queries::{
  delete_query_builder,
  insert_query_builder,
  select_query_builder,
  update_query_builder,
  Order,
  OrderBy
};

// Type alias to make function signatures much clearer:
pub type Pool = r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>;

// Everything in here is synchronous, SQLite calls are
// fast enough that there's nothing to win by making
// the data access async.

// The column lists double as the mapper contracts, the
// mappers read the columns by position:
const CATEGORY_FIELDS: [&str; 6] = [
  "id", "title", "slug", "description", "icon_name", "home_order"
];
const ARTICLE_FIELDS: [&str; 10] = [
  "id", "title", "content", "description", "category_id",
  "icon_name", "video_url", "is_quick_access", "view_count", "created_at"
];
const ARTICLE_LISTING_FIELDS: [&str; 3] = ["id", "title", "category_id"];

// Articles are always listed by title, and the title
// ordering should ignore case:
const TITLE_ORDER: &str = "title COLLATE NOCASE";

fn select_many<T, P, F>(
  pool: &Pool,
  query: &str,
  params: P,
  mapper: F
) -> Result<Vec<T>>
  where
    P: IntoIterator,
    P::Item: ToSql,
    F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
{
  let conn = pool.clone().get()?;
  let mut stmt = conn.prepare(query)?;
  stmt.query_map(params, mapper)
    .and_then(Iterator::collect)
    .context("Generic select_many query")
}

fn select_single<T, P, F>(
  pool: &Pool,
  query: &str,
  params: P,
  mapper: F
) -> Result<Option<T>>
  where
    P: IntoIterator,
    P::Item: ToSql,
    F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
{
  let conn = pool.clone().get()?;
  let mut stmt = conn.prepare(query)?;
  stmt.query_row(params, mapper)
    .optional()
    .context("Generic select_single query")
}

/* --- Categories --- */

pub fn all_categories(pool: &Pool) -> Result<Vec<Category>> {
  let query = select_query_builder(
    &CATEGORY_FIELDS,
    "categories",
    None,
    // Ascending puts the NULL home_order rows first,
    // which is the datastore default we live with:
    Some(OrderBy::new(Order::Asc, "home_order")),
    None
  );
  select_many(pool, &query, NO_PARAMS, map_category)
}

pub fn category_by_id(pool: &Pool, id: i32) -> Result<Option<Category>> {
  let query = select_query_builder(
    &CATEGORY_FIELDS,
    "categories",
    Some(&[generate_field_equal_qmark("id")]),
    None,
    None
  );
  select_single(pool, &query, params![id], map_category)
}

// Stored slugs are the routing keys, the lookup is a
// plain equality match.
pub fn category_by_slug(pool: &Pool, slug: &str) -> Result<Option<Category>> {
  let query = select_query_builder(
    &CATEGORY_FIELDS,
    "categories",
    Some(&[generate_field_equal_qmark("slug")]),
    None,
    None
  );
  select_single(pool, &query, params![slug], map_category)
}

// The admin actions only ever need the slug of a
// parent category to know which page went stale:
pub fn category_slug_by_id(pool: &Pool, id: i32) -> Result<Option<String>> {
  select_single(
    pool,
    "SELECT slug FROM categories WHERE id = ?",
    params![id],
    |row| row.get(0)
  )
}

pub fn insert_category(pool: &Pool, category: &Category) -> Result<i32> {
  let conn = pool.clone().get()?;
  let query = insert_query_builder(
    "categories",
    &["title", "slug", "description", "icon_name", "home_order"]
  );
  conn.execute(
    &query,
    params![
      category.title,
      category.slug,
      category.description,
      category.icon_name,
      category.home_order
    ]
  ).context("Insert category")?;
  Ok(conn.last_insert_rowid() as i32)
}

pub fn update_category(
  pool: &Pool,
  id: i32,
  category: &Category
) -> Result<usize> {
  let conn = pool.clone().get()?;
  let query = update_query_builder(
    "categories",
    &["title", "slug", "description", "icon_name", "home_order"],
    &generate_field_equal_qmark("id")
  );
  conn.execute(
    &query,
    params![
      category.title,
      category.slug,
      category.description,
      category.icon_name,
      category.home_order,
      id
    ]
  ).context("Update category")
}

// Articles under the category are not touched, see the
// schema notes.
pub fn delete_category(pool: &Pool, id: i32) -> Result<usize> {
  let conn = pool.clone().get()?;
  let query = delete_query_builder(
    "categories",
    &generate_field_equal_qmark("id")
  );
  conn.execute(&query, params![id])
    .context("Delete category")
}

/* --- Articles --- */

pub fn all_article_listings(pool: &Pool) -> Result<Vec<ArticleListing>> {
  let query = select_query_builder(
    &ARTICLE_LISTING_FIELDS,
    "articles",
    None,
    Some(OrderBy::new(Order::Asc, TITLE_ORDER)),
    None
  );
  select_many(pool, &query, NO_PARAMS, map_article_listing)
}

pub fn articles_for_category(
  pool: &Pool,
  category_id: i32
) -> Result<Vec<Article>> {
  let query = select_query_builder(
    &ARTICLE_FIELDS,
    "articles",
    Some(&[generate_field_equal_qmark("category_id")]),
    Some(OrderBy::new(Order::Asc, TITLE_ORDER)),
    None
  );
  select_many(pool, &query, params![category_id], map_article)
}

pub fn quick_access_articles(pool: &Pool, max: i32) -> Result<Vec<Article>> {
  let query = select_query_builder(
    &ARTICLE_FIELDS,
    "articles",
    Some(&["is_quick_access = 1".to_string()]),
    Some(OrderBy::new(Order::Asc, TITLE_ORDER)),
    Some(max)
  );
  select_many(pool, &query, NO_PARAMS, map_article)
}

pub fn article_by_id(pool: &Pool, id: i32) -> Result<Option<Article>> {
  let query = select_query_builder(
    &ARTICLE_FIELDS,
    "articles",
    Some(&[generate_field_equal_qmark("id")]),
    None,
    None
  );
  select_single(pool, &query, params![id], map_article)
}

pub fn insert_article(pool: &Pool, article: &Article) -> Result<i32> {
  let conn = pool.clone().get()?;
  let query = insert_query_builder(
    "articles",
    &[
      "title", "content", "description", "category_id",
      "icon_name", "video_url", "is_quick_access", "created_at"
    ]
  );
  conn.execute(
    &query,
    params![
      article.title,
      article.content,
      article.description,
      article.category_id,
      article.icon_name,
      article.video_url,
      article.is_quick_access,
      article.created_at
    ]
  ).context("Insert article")?;
  Ok(conn.last_insert_rowid() as i32)
}

// Full payload update, created_at and view_count are
// never overwritten.
pub fn update_article(
  pool: &Pool,
  id: i32,
  article: &Article
) -> Result<usize> {
  let conn = pool.clone().get()?;
  let query = update_query_builder(
    "articles",
    &[
      "title", "content", "description", "category_id",
      "icon_name", "video_url", "is_quick_access"
    ],
    &generate_field_equal_qmark("id")
  );
  conn.execute(
    &query,
    params![
      article.title,
      article.content,
      article.description,
      article.category_id,
      article.icon_name,
      article.video_url,
      article.is_quick_access,
      id
    ]
  ).context("Update article")
}

pub fn delete_article(pool: &Pool, id: i32) -> Result<usize> {
  let conn = pool.clone().get()?;
  let query = delete_query_builder(
    "articles",
    &generate_field_equal_qmark("id")
  );
  conn.execute(&query, params![id])
    .context("Delete article")
}

// The view counter procedure. Callers fire this from a
// dedicated thread and nobody waits on the result, see
// the viewcount module.
pub fn increment_view_count(pool: &Pool, id: i32) -> Result<()> {
  let conn = pool.clone().get()?;
  conn.execute(
    "UPDATE articles SET view_count = view_count + 1 WHERE id = ?",
    params![id]
  ).context("Increment article view count")?;
  Ok(())
}

/* --- Schema --- */

// Used by the init-db binary and the tests. There is no
// foreign key constraint on articles.category_id:
// deleting a category leaves its articles in place and
// the readers tolerate the dangling id.
pub fn create_schema(pool: &Pool) -> Result<()> {
  let conn = pool.clone().get()?;
  conn.execute_batch(
    "CREATE TABLE IF NOT EXISTS categories (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      title TEXT NOT NULL,
      slug TEXT NOT NULL UNIQUE,
      description TEXT,
      icon_name TEXT,
      home_order INTEGER
    );
    CREATE TABLE IF NOT EXISTS articles (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      title TEXT NOT NULL,
      content TEXT NOT NULL,
      description TEXT,
      category_id INTEGER NOT NULL,
      icon_name TEXT,
      video_url TEXT,
      is_quick_access INTEGER NOT NULL DEFAULT 0,
      view_count INTEGER NOT NULL DEFAULT 0,
      created_at INTEGER NOT NULL
    );"
  ).context("Create database schema")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::time_utils;
  use r2d2_sqlite::SqliteConnectionManager;

  // A single-connection pool on an in-memory database.
  // max_size has to stay at 1, every new connection
  // would otherwise get its own empty database.
  fn memory_pool() -> Pool {
    let manager = SqliteConnectionManager::memory();
    let pool = r2d2::Pool::builder()
      .max_size(1)
      .build(manager)
      .unwrap();
    create_schema(&pool).unwrap();
    pool
  }

  fn sample_category(title: &str, slug: &str) -> Category {
    Category {
      id: -1,
      title: title.to_string(),
      slug: slug.to_string(),
      description: None,
      icon_name: None,
      home_order: None
    }
  }

  fn sample_article(title: &str, category_id: i32) -> Article {
    Article {
      id: -1,
      title: title.to_string(),
      content: format!("Body of {}", title),
      description: None,
      category_id,
      icon_name: None,
      video_url: None,
      is_quick_access: 0,
      view_count: 0,
      created_at: time_utils::current_timestamp()
    }
  }

  #[test]
  fn created_category_resolves_by_slug() {
    let pool = memory_pool();
    let id = insert_category(
      &pool,
      &sample_category("Billing", "billing")
    ).unwrap();
    let found = category_by_slug(&pool, "billing").unwrap().unwrap();
    assert_eq!(id, found.id);
    assert_eq!("Billing", found.title);
    // A brand new category has no articles yet:
    assert!(articles_for_category(&pool, id).unwrap().is_empty());
  }

  #[test]
  fn duplicate_slugs_are_rejected() {
    let pool = memory_pool();
    insert_category(&pool, &sample_category("Billing", "billing")).unwrap();
    let second = insert_category(
      &pool,
      &sample_category("Billing again", "billing")
    );
    assert!(second.is_err());
  }

  #[test]
  fn article_shows_up_in_its_category_listing_once() {
    let pool = memory_pool();
    let category_id = insert_category(
      &pool,
      &sample_category("Billing", "billing")
    ).unwrap();
    insert_article(
      &pool,
      &sample_article("Reset password", category_id)
    ).unwrap();
    let listed = articles_for_category(&pool, category_id).unwrap();
    assert_eq!(1, listed.len());
    assert_eq!("Reset password", listed[0].title);
  }

  #[test]
  fn articles_are_listed_in_title_order_ignoring_case() {
    let pool = memory_pool();
    let category_id = insert_category(
      &pool,
      &sample_category("Guides", "guides")
    ).unwrap();
    insert_article(&pool, &sample_article("zebra guide", category_id)).unwrap();
    insert_article(&pool, &sample_article("Alpha guide", category_id)).unwrap();
    insert_article(&pool, &sample_article("mango guide", category_id)).unwrap();
    let titles: Vec<String> = articles_for_category(&pool, category_id)
      .unwrap()
      .into_iter()
      .map(|a| a.title)
      .collect();
    assert_eq!(vec!["Alpha guide", "mango guide", "zebra guide"], titles);
  }

  #[test]
  fn categories_are_ordered_by_home_order() {
    let pool = memory_pool();
    let mut second = sample_category("Second", "second");
    second.home_order = Some(2);
    let mut first = sample_category("First", "first");
    first.home_order = Some(1);
    let unordered = sample_category("Unordered", "unordered");
    insert_category(&pool, &second).unwrap();
    insert_category(&pool, &unordered).unwrap();
    insert_category(&pool, &first).unwrap();
    let slugs: Vec<String> = all_categories(&pool)
      .unwrap()
      .into_iter()
      .map(|c| c.slug)
      .collect();
    // SQLite sorts NULL first in ascending order:
    assert_eq!(vec!["unordered", "first", "second"], slugs);
  }

  #[test]
  fn deleting_a_category_leaves_its_articles_dangling() {
    let pool = memory_pool();
    let category_id = insert_category(
      &pool,
      &sample_category("Billing", "billing")
    ).unwrap();
    let article_id = insert_article(
      &pool,
      &sample_article("Reset password", category_id)
    ).unwrap();
    delete_category(&pool, category_id).unwrap();
    assert!(category_by_slug(&pool, "billing").unwrap().is_none());
    // The article survives and still points at the
    // missing category:
    let orphan = article_by_id(&pool, article_id).unwrap().unwrap();
    assert_eq!(category_id, orphan.category_id);
    assert!(category_by_id(&pool, orphan.category_id).unwrap().is_none());
  }

  #[test]
  fn update_category_replaces_the_full_payload() {
    let pool = memory_pool();
    let id = insert_category(
      &pool,
      &sample_category("Billing", "billing")
    ).unwrap();
    let mut updated = sample_category("Payments", "payments");
    updated.description = Some("Invoices and refunds".to_string());
    update_category(&pool, id, &updated).unwrap();
    assert!(category_by_slug(&pool, "billing").unwrap().is_none());
    let found = category_by_slug(&pool, "payments").unwrap().unwrap();
    assert_eq!(id, found.id);
    assert_eq!(Some("Invoices and refunds".to_string()), found.description);
  }

  #[test]
  fn view_count_increments_accumulate() {
    let pool = memory_pool();
    let category_id = insert_category(
      &pool,
      &sample_category("Billing", "billing")
    ).unwrap();
    let article_id = insert_article(
      &pool,
      &sample_article("Reset password", category_id)
    ).unwrap();
    increment_view_count(&pool, article_id).unwrap();
    increment_view_count(&pool, article_id).unwrap();
    let article = article_by_id(&pool, article_id).unwrap().unwrap();
    assert_eq!(2, article.view_count);
  }

  #[test]
  fn quick_access_only_returns_flagged_articles() {
    let pool = memory_pool();
    let category_id = insert_category(
      &pool,
      &sample_category("Billing", "billing")
    ).unwrap();
    let mut promoted = sample_article("Two-Factor Auth", category_id);
    promoted.is_quick_access = 1;
    insert_article(&pool, &promoted).unwrap();
    insert_article(&pool, &sample_article("Invoices", category_id)).unwrap();
    let quick = quick_access_articles(&pool, 6).unwrap();
    assert_eq!(1, quick.len());
    assert_eq!("Two-Factor Auth", quick[0].title);
  }
}
