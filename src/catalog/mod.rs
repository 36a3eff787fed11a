use crate::db::entities::{ArticleListing, Category};
use crate::utils::text_utils::fold_accents;
use lazy_static::lazy_static;
use regex::Regex;

// Pure functions shaping the fetched rows for the
// pages: slug derivation, the category/article join
// for the sidebar, and the title search. The handlers
// fetch, this module never touches the datastore.

// A category joined with the articles pointing at it.
// Order within articles is whatever the query gave us,
// which is title ascending.
#[derive(Debug)]
pub struct CategoryArticles {
  pub category: Category,
  pub articles: Vec<ArticleListing>
}

// URL-safe identifier derived from a title: fold the
// accents away, lowercase, turn whitespace runs into
// single hyphens. Only used when the admin leaves the
// slug field blank, stored slugs stay authoritative
// for routing.
pub fn slugify(title: &str) -> String {
  lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
  }
  let folded = fold_accents(title.trim()).to_lowercase();
  WHITESPACE.replace_all(&folded, "-").to_string()
}

// Partition the articles under their categories. An
// article whose category_id matches no category ends
// up in no group.
pub fn group_by_category(
  categories: Vec<Category>,
  articles: Vec<ArticleListing>
) -> Vec<CategoryArticles> {
  categories.into_iter()
    .map(|category| {
      let owned: Vec<ArticleListing> = articles.iter()
        .filter(|article| article.category_id == category.id)
        .cloned()
        .collect();
      CategoryArticles {
        category,
        articles: owned
      }
    })
    .collect()
}

// Case-insensitive substring match over the titles. A
// blank term keeps the whole list.
pub fn filter_by_title(
  articles: &[ArticleListing],
  term: &str
) -> Vec<ArticleListing> {
  let needle = term.trim().to_lowercase();
  if needle.is_empty() {
    return articles.to_vec();
  }
  articles.iter()
    .filter(|article| article.title.to_lowercase().contains(&needle))
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn category(id: i32, title: &str, slug: &str) -> Category {
    Category {
      id,
      title: title.to_string(),
      slug: slug.to_string(),
      description: None,
      icon_name: None,
      home_order: None
    }
  }

  fn listing(id: i32, title: &str, category_id: i32) -> ArticleListing {
    ArticleListing {
      id,
      title: title.to_string(),
      category_id
    }
  }

  #[test]
  fn slugify_strips_accents_and_lowercases() {
    assert_eq!("primeiros-passos", slugify("Primeiros Passos"));
    assert_eq!("configuracoes-avancadas", slugify("Configurações Avançadas"));
    assert_eq!("cobranca", slugify("Cobrança"));
  }

  #[test]
  fn slugify_collapses_whitespace_runs() {
    assert_eq!("two-words", slugify("  Two   Words "));
  }

  #[test]
  fn every_article_lands_in_exactly_one_group() {
    let categories = vec![
      category(1, "Billing", "billing"),
      category(2, "Security", "security")
    ];
    let articles = vec![
      listing(10, "Invoices", 1),
      listing(11, "Refunds", 1),
      listing(12, "Two-Factor Auth", 2),
      // Dangling category id, should show up nowhere:
      listing(13, "Lost article", 99)
    ];
    let groups = group_by_category(categories, articles);
    assert_eq!(2, groups.len());
    assert_eq!(2, groups[0].articles.len());
    assert_eq!(1, groups[1].articles.len());
    let all_ids: Vec<i32> = groups.iter()
      .flat_map(|g| g.articles.iter().map(|a| a.id))
      .collect();
    assert_eq!(vec![10, 11, 12], all_ids);
  }

  #[test]
  fn grouping_preserves_the_article_order() {
    let categories = vec![category(1, "Billing", "billing")];
    let articles = vec![
      listing(10, "Alpha", 1),
      listing(11, "Beta", 1),
      listing(12, "Gamma", 1)
    ];
    let groups = group_by_category(categories, articles);
    let titles: Vec<&str> = groups[0].articles.iter()
      .map(|a| a.title.as_str())
      .collect();
    assert_eq!(vec!["Alpha", "Beta", "Gamma"], titles);
  }

  #[test]
  fn filter_matches_substrings_ignoring_case() {
    let articles = vec![
      listing(1, "Reset Password", 1),
      listing(2, "Update payment method", 1)
    ];
    let found = filter_by_title(&articles, "reset");
    assert_eq!(1, found.len());
    assert_eq!(1, found[0].id);
  }

  #[test]
  fn blank_term_keeps_the_whole_list() {
    let articles = vec![
      listing(1, "Reset Password", 1),
      listing(2, "Update payment method", 1)
    ];
    assert_eq!(articles, filter_by_title(&articles, ""));
    assert_eq!(articles, filter_by_title(&articles, "   "));
  }

  #[test]
  fn filter_is_idempotent() {
    let articles = vec![
      listing(1, "Reset Password", 1),
      listing(2, "Password policy", 1),
      listing(3, "Invoices", 1)
    ];
    let once = filter_by_title(&articles, "password");
    let twice = filter_by_title(&once, "password");
    assert_eq!(once, twice);
  }

  #[test]
  fn longer_terms_never_grow_the_result() {
    let articles = vec![
      listing(1, "Reset Password", 1),
      listing(2, "Password policy", 1),
      listing(3, "Reset 2FA", 1)
    ];
    let mut term = String::new();
    let mut previous = filter_by_title(&articles, &term).len();
    for c in "reset p".chars() {
      term.push(c);
      let current = filter_by_title(&articles, &term).len();
      assert!(current <= previous);
      previous = current;
    }
  }
}
