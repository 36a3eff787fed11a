pub fn generate_field_equal_qmark(name: &str) -> String {
  format!("{} = ?", name)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn generates_a_placeholder_clause() {
    assert_eq!("slug = ?", generate_field_equal_qmark("slug"));
  }
}
