use serde::{Deserialize, Serialize};

// Plain datatypes matching the two tables one to one.
// The JSON shapes the pages consume are DTOs over in
// the app module.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
  pub id: i32,
  pub title: String,
  pub slug: String,
  pub description: Option<String>,
  pub icon_name: Option<String>,
  pub home_order: Option<i32>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
  pub id: i32,
  pub title: String,
  pub content: String,
  pub description: Option<String>,
  // Points at categories.id. There is no cascade on
  // category deletion, readers have to tolerate ids
  // that no longer resolve.
  pub category_id: i32,
  pub icon_name: Option<String>,
  pub video_url: Option<String>,
  // 0 or 1, promotes the article to the home page:
  pub is_quick_access: i32,
  pub view_count: i64,
  pub created_at: i64
}

// Lighter projection for the sidebar and the title
// search, fetching content there would be wasted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleListing {
  pub id: i32,
  pub title: String,
  pub category_id: i32
}
