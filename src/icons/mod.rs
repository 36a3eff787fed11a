// The icon names mirror the lucide set the frontend
// bundles. The admin picker reads this list from the
// /icons endpoint and the mutation actions validate
// against it, so only known names get stored going
// forward. Legacy rows can still hold anything, which
// is what the fallback chain is for.

pub const AVAILABLE_ICONS: [&str; 24] = [
  "BarChart",
  "BookOpen",
  "CreditCard",
  "FileQuestion",
  "FileText",
  "Globe",
  "HelpCircle",
  "KeyRound",
  "LifeBuoy",
  "Lock",
  "Mail",
  "MessageCircle",
  "Phone",
  "Plug",
  "Rocket",
  "Settings",
  "Shield",
  "Smartphone",
  "Star",
  "User",
  "Users",
  "Video",
  "Wallet",
  "Wrench"
];

pub const DEFAULT_ICON: &str = "FileText";

// Guesses for categories stored without an icon. The
// labels are matched upper-cased.
const CATEGORY_FALLBACKS: [(&str, &str); 6] = [
  ("ACCOUNT", "User"),
  ("BILLING", "CreditCard"),
  ("GETTING STARTED", "Rocket"),
  ("INTEGRATIONS", "Plug"),
  ("SECURITY", "Shield"),
  ("VIDEOS", "Video")
];

pub fn is_known_icon(name: &str) -> bool {
  AVAILABLE_ICONS.iter().any(|icon| *icon == name)
}

// Three steps: the stored name when we know it, then a
// guess from the category label, then the default.
// Always comes back with something renderable.
pub fn resolve_icon(
  icon_name: Option<&str>,
  category: Option<&str>
) -> &'static str {
  if let Some(name) = icon_name {
    let known = AVAILABLE_ICONS.iter()
      .copied()
      .find(|icon| *icon == name);
    if let Some(icon) = known {
      return icon;
    }
  }
  if let Some(label) = category {
    let key = label.trim().to_uppercase();
    let fallback = CATEGORY_FALLBACKS.iter()
      .find(|entry| entry.0 == key)
      .map(|entry| entry.1);
    if let Some(icon) = fallback {
      return icon;
    }
  }
  DEFAULT_ICON
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_name_resolves_to_itself() {
    assert_eq!("KeyRound", resolve_icon(Some("KeyRound"), None));
  }

  #[test]
  fn unknown_name_falls_back_to_the_category_label() {
    assert_eq!("CreditCard", resolve_icon(Some("NoSuchIcon"), Some("billing")));
    assert_eq!("Shield", resolve_icon(None, Some("Security")));
  }

  #[test]
  fn unknown_everything_resolves_to_the_default() {
    assert_eq!(DEFAULT_ICON, resolve_icon(Some("NoSuchIcon"), Some("Whatever")));
    assert_eq!(DEFAULT_ICON, resolve_icon(None, None));
    assert_eq!(DEFAULT_ICON, resolve_icon(Some(""), Some("")));
  }

  #[test]
  fn category_fallbacks_point_at_known_icons() {
    for (_, icon) in CATEGORY_FALLBACKS.iter() {
      assert!(is_known_icon(icon));
    }
  }

  #[test]
  fn the_default_icon_is_in_the_catalog() {
    assert!(is_known_icon(DEFAULT_ICON));
  }
}
