// Truncating with String::truncate can panic when the
// cut lands in the middle of a multibyte char, so we
// count chars instead of bytes.
pub fn truncate_utf8(value: &mut String, max_chars: usize) {
  if value.chars().count() > max_chars {
    *value = value.chars().take(max_chars).collect();
  }
}

// Shortened version of an article body for the cards,
// used when no description was written.
pub fn content_preview(content: &str, max_chars: usize) -> String {
  let mut preview = content.trim().to_string();
  truncate_utf8(&mut preview, max_chars);
  preview
}

// The Latin diacritics we actually get in category and
// article titles. Anything else passes through as is.
pub fn fold_accents(value: &str) -> String {
  value.chars().map(|c| match c {
    'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
    'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
    'é' | 'è' | 'ê' | 'ë' => 'e',
    'É' | 'È' | 'Ê' | 'Ë' => 'E',
    'í' | 'ì' | 'î' | 'ï' => 'i',
    'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
    'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
    'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
    'ú' | 'ù' | 'û' | 'ü' => 'u',
    'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
    'ç' => 'c',
    'Ç' => 'C',
    'ñ' => 'n',
    'Ñ' => 'N',
    _ => c
  }).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truncate_utf8_is_multibyte_safe() {
    let mut sut = String::from("héhé hôhô");
    truncate_utf8(&mut sut, 4);
    assert_eq!("héhé", sut);
  }

  #[test]
  fn truncate_utf8_leaves_short_strings_alone() {
    let mut sut = String::from("short");
    truncate_utf8(&mut sut, 50);
    assert_eq!("short", sut);
  }

  #[test]
  fn fold_accents_on_portuguese_titles() {
    assert_eq!(
      "Configuracoes Avancadas",
      fold_accents("Configurações Avançadas")
    );
  }

  #[test]
  fn content_preview_trims_and_cuts() {
    let preview = content_preview("  some long article body  ", 9);
    assert_eq!("some long", preview);
  }
}
