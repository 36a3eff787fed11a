use crate::catalog::{self, CategoryArticles};
use crate::db::entities::*;
use crate::icons;
use crate::utils::{self, serde_utils, text_utils, time_utils};
use serde::{Deserialize, Serialize};

// Entities come out of the db module raw, these are
// the JSON shapes the pages actually consume. The From
// conversions do the icon resolution and the date
// formatting on the way out, and the form conversions
// normalize what the admin panel sends in.

// Max chars of article content shown on a card when no
// description was written:
const MAX_PREVIEW_LENGTH: usize = 180;

/* --- Page DTOs --- */

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
  pub id: i32,
  pub title: String,
  pub slug: String,
  pub description: Option<String>,
  // Always resolved, the frontend never has to guess:
  pub icon_name: String,
  pub home_order: Option<i32>
}

impl From<Category> for CategoryDto {
  fn from(category: Category) -> Self {
    let icon_name = icons::resolve_icon(
      category.icon_name.as_deref(),
      Some(&category.title)
    ).to_string();
    Self {
      id: category.id,
      title: category.title,
      slug: category.slug,
      description: category.description,
      icon_name,
      home_order: category.home_order
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCardDto {
  pub id: i32,
  pub title: String,
  pub description: String,
  pub icon_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub video_url: Option<String>
}

impl From<Article> for ArticleCardDto {
  fn from(article: Article) -> Self {
    let icon_name = icons::resolve_icon(
      article.icon_name.as_deref(),
      None
    ).to_string();
    let description = match article.description {
      Some(description) => description,
      None => text_utils::content_preview(&article.content, MAX_PREVIEW_LENGTH)
    };
    Self {
      id: article.id,
      title: article.title,
      description,
      icon_name,
      video_url: article.video_url
    }
  }
}

// Parent category reference for the breadcrumb on the
// article page.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRefDto {
  pub title: String,
  pub slug: String
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
  pub id: i32,
  pub title: String,
  pub content: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub icon_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub video_url: Option<String>,
  pub view_count: i64,
  pub created_at: String,
  // Absent when the category was deleted from under
  // the article:
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<CategoryRefDto>
}

impl ArticleDto {
  pub fn from_article(article: Article, parent: Option<Category>) -> Self {
    let icon_name = icons::resolve_icon(
      article.icon_name.as_deref(),
      parent.as_ref().map(|c| c.title.as_str())
    ).to_string();
    Self {
      id: article.id,
      title: article.title,
      content: article.content,
      description: article.description,
      icon_name,
      video_url: article.video_url,
      view_count: article.view_count,
      created_at: time_utils::timestamp_to_date_string(article.created_at),
      category: parent.map(|c| CategoryRefDto {
        title: c.title,
        slug: c.slug
      })
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDto {
  pub categories: Vec<CategoryDto>,
  pub quick_access: Vec<ArticleCardDto>
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPageDto {
  pub category: CategoryDto,
  pub articles: Vec<ArticleCardDto>
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarArticleDto {
  pub id: i32,
  pub title: String
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarCategoryDto {
  pub id: i32,
  pub title: String,
  pub slug: String,
  pub icon_name: String,
  pub articles: Vec<SidebarArticleDto>
}

impl From<CategoryArticles> for SidebarCategoryDto {
  fn from(group: CategoryArticles) -> Self {
    let icon_name = icons::resolve_icon(
      group.category.icon_name.as_deref(),
      Some(&group.category.title)
    ).to_string();
    Self {
      id: group.category.id,
      title: group.category.title,
      slug: group.category.slug,
      icon_name,
      articles: group.articles.into_iter()
        .map(|article| SidebarArticleDto {
          id: article.id,
          title: article.title
        })
        .collect()
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultDto {
  pub id: i32,
  pub title: String
}

impl From<ArticleListing> for SearchResultDto {
  fn from(listing: ArticleListing) -> Self {
    Self {
      id: listing.id,
      title: listing.title
    }
  }
}

/* --- Admin forms --- */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
  pub title: String,
  pub slug: Option<String>,
  pub description: Option<String>,
  pub icon_name: Option<String>,
  pub home_order: Option<i32>
}

impl CategoryForm {
  // Normalized entity: blank optional fields become
  // NULL and a blank slug is derived from the title.
  pub fn into_category(self) -> Category {
    let slug = match serde_utils::empty_string_to_none(self.slug) {
      Some(slug) => slug,
      None => catalog::slugify(&self.title)
    };
    Category {
      id: -1,
      title: self.title.trim().to_string(),
      slug,
      description: serde_utils::empty_string_to_none(self.description),
      icon_name: serde_utils::empty_string_to_none(self.icon_name),
      home_order: self.home_order
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleForm {
  pub title: String,
  pub content: String,
  pub description: Option<String>,
  pub category_id: Option<i32>,
  pub icon_name: Option<String>,
  pub video_url: Option<String>,
  pub is_quick_access: Option<bool>
}

impl ArticleForm {
  pub fn into_article(self) -> Article {
    Article {
      id: -1,
      title: self.title.trim().to_string(),
      content: self.content,
      description: serde_utils::empty_string_to_none(self.description),
      category_id: self.category_id.unwrap_or(-1),
      icon_name: serde_utils::empty_string_to_none(self.icon_name),
      video_url: serde_utils::empty_string_to_none(self.video_url),
      is_quick_access: utils::option_bool_to_i32(self.is_quick_access),
      view_count: 0,
      created_at: time_utils::current_timestamp()
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
  pub pin: String
}

/* --- Mutation results --- */

// Uniform result shape for the five admin actions plus
// the login check. The id rides along on creations.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResult {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<i32>
}

impl ActionResult {
  pub fn success(message: &str) -> Self {
    Self {
      success: true,
      message: String::from(message),
      id: None
    }
  }

  pub fn success_with_id(message: &str, id: i32) -> Self {
    Self {
      success: true,
      message: String::from(message),
      id: Some(id)
    }
  }

  pub fn failure(message: &str) -> Self {
    Self {
      success: false,
      message: String::from(message),
      id: None
    }
  }
}
