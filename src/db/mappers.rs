use super::entities::*;
use rusqlite::{Error, Row};

// Column indexes follow the field lists declared in
// the parent module.

pub fn map_category(row: &Row) -> Result<Category, Error> {
  Ok(Category {
    id: row.get(0)?,
    title: row.get(1)?,
    slug: row.get(2)?,
    description: row.get(3)?,
    icon_name: row.get(4)?,
    home_order: row.get(5)?
  })
}

pub fn map_article(row: &Row) -> Result<Article, Error> {
  Ok(Article {
    id: row.get(0)?,
    title: row.get(1)?,
    content: row.get(2)?,
    description: row.get(3)?,
    category_id: row.get(4)?,
    icon_name: row.get(5)?,
    video_url: row.get(6)?,
    is_quick_access: row.get(7)?,
    view_count: row.get(8)?,
    created_at: row.get(9)?
  })
}

pub fn map_article_listing(row: &Row) -> Result<ArticleListing, Error> {
  Ok(ArticleListing {
    id: row.get(0)?,
    title: row.get(1)?,
    category_id: row.get(2)?
  })
}
