//! Entity name normalization.

/// Normalize an entity name to the capitalized form used on disk and in
/// the manifest. Only the first character is touched; the remainder is
/// preserved as given.
pub fn normalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => name.to_string(),
    }
}
