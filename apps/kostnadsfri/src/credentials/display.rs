//! Turning slugs back into something readable.

/// Swedish company-form suffixes shown in upper case.
const BUSINESS_SUFFIXES: &[&str] = &["ab", "hb", "kb", "ek", "ef"];

/// `ikea-ab` → `Ikea AB`.
pub fn slug_to_display(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            if BUSINESS_SUFFIXES.contains(&word) {
                word.to_uppercase()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Interactive input that is already lowercase and has no spaces is taken as
/// a slug rather than a company name.
pub fn looks_like_slug(input: &str) -> bool {
    input == input.to_lowercase() && !input.contains(' ')
}
