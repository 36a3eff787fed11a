// Logical page paths, used both as the cache keys and
// as the invalidation targets after a mutation.

pub const HOME_PATH: &str = "/";

pub fn category_path(slug: &str) -> String {
  format!("/categories/{}", slug)
}

pub fn article_path(article_id: i32) -> String {
  format!("/articles/{}", article_id)
}
