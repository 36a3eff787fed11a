// The admin forms send empty strings for the optional
// fields that were left blank, the database should get
// NULL for those instead. Used in the form to entity
// conversions.
pub fn empty_string_to_none(value: Option<String>) -> Option<String> {
  match value {
    Some(s) => {
      let trimmed = s.trim();
      if trimmed.is_empty() {
        None
      } else {
        Some(trimmed.to_string())
      }
    },
    None => None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_string_becomes_none() {
    assert_eq!(None, empty_string_to_none(Some(String::new())));
    assert_eq!(None, empty_string_to_none(Some("   ".to_string())));
    assert_eq!(None, empty_string_to_none(None));
  }

  #[test]
  fn filled_string_is_kept_trimmed() {
    assert_eq!(
      Some("KeyRound".to_string()),
      empty_string_to_none(Some(" KeyRound ".to_string()))
    );
  }
}
