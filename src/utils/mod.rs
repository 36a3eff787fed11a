pub mod serde_utils;
pub mod text_utils;
pub mod time_utils;

// SQLite has no boolean column type, flags are stored
// as 0 or 1.
pub fn option_bool_to_i32(value: Option<bool>) -> i32 {
  match value {
    Some(true) => 1,
    _ => 0
  }
}
