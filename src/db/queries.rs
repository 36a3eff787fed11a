// Small string builders for the SQL we send to the
// datastore. Only covers what the parent module needs:
// projected selects with equality filters, ordering
// and limits, plus insert/update/delete by filter.
// Values always go through ? placeholders, never into
// the query string.

use super::helpers::generate_field_equal_qmark;

pub enum Order {
  Asc,
  Desc
}

pub struct OrderBy {
  pub order: Order,
  pub field: String
}

impl OrderBy {
  pub fn new(order: Order, field: &str) -> Self {
    OrderBy {
      order,
      field: field.to_string()
    }
  }
}

// Multiple where clauses are stitched with AND, we
// never needed OR so far.
pub fn select_query_builder(
  q_fields: &[&str],
  q_from: &str,
  q_where: Option<&[String]>,
  q_order: Option<OrderBy>,
  limit: Option<i32>
) -> String {
  let mut query = format!(
    "SELECT {} FROM {} ",
    q_fields.join(","),
    q_from
  );
  if let Some(wh) = q_where {
    query.push_str(
      &format!(
        "WHERE {} ",
        wh.join(" AND ")
      )
    );
  }
  if let Some(order) = q_order {
    query.push_str(&format!("ORDER BY {} ", order.field));
    query.push_str(
      match order.order {
        Order::Asc => "ASC ",
        Order::Desc => "DESC "
      }
    );
  }
  if let Some(lim) = limit {
    query.push_str(
      &format!(
        "LIMIT {} ",
        lim
      )
    );
  }
  query
}

pub fn insert_query_builder(table: &str, fields: &[&str]) -> String {
  let placeholders: Vec<&str> = fields.iter().map(|_| "?").collect();
  format!(
    "INSERT INTO {} ({}) VALUES ({})",
    table,
    fields.join(","),
    placeholders.join(",")
  )
}

pub fn update_query_builder(
  table: &str,
  fields: &[&str],
  q_where: &str
) -> String {
  let assignments: Vec<String> = fields.iter()
    .map(|field| generate_field_equal_qmark(field))
    .collect();
  format!(
    "UPDATE {} SET {} WHERE {}",
    table,
    assignments.join(","),
    q_where
  )
}

pub fn delete_query_builder(table: &str, q_where: &str) -> String {
  format!("DELETE FROM {} WHERE {}", table, q_where)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn generate_simple_select() {
    let query = select_query_builder(
      &["id", "title"],
      "categories",
      None,
      None,
      None
    );
    // There's supposed to be an extra space at the end
    // and no space between commas:
    let expected = String::from("SELECT id,title FROM categories ");
    assert_eq!(query, expected);
  }

  #[test]
  fn generate_full_select() {
    let query = select_query_builder(
      &["id", "title"],
      "articles",
      Some(&[generate_field_equal_qmark("category_id")]),
      Some(OrderBy::new(Order::Asc, "title")),
      Some(10)
    );
    let expected = String::from(
      "SELECT id,title FROM articles WHERE category_id = ? ORDER BY title ASC LIMIT 10 "
    );
    assert_eq!(query, expected);
  }

  #[test]
  fn where_clauses_are_joined_with_and() {
    let query = select_query_builder(
      &["id"],
      "articles",
      Some(&[
        generate_field_equal_qmark("category_id"),
        generate_field_equal_qmark("is_quick_access")
      ]),
      None,
      None
    );
    let expected = String::from(
      "SELECT id FROM articles WHERE category_id = ? AND is_quick_access = ? "
    );
    assert_eq!(query, expected);
  }

  #[test]
  fn generate_insert() {
    let query = insert_query_builder("categories", &["title", "slug"]);
    assert_eq!("INSERT INTO categories (title,slug) VALUES (?,?)", query);
  }

  #[test]
  fn generate_update() {
    let query = update_query_builder(
      "categories",
      &["title", "slug"],
      &generate_field_equal_qmark("id")
    );
    assert_eq!("UPDATE categories SET title = ?,slug = ? WHERE id = ?", query);
  }

  #[test]
  fn generate_delete() {
    let query = delete_query_builder(
      "articles",
      &generate_field_equal_qmark("id")
    );
    assert_eq!("DELETE FROM articles WHERE id = ?", query);
  }
}
