//! URL slugs and display formatting for listings.

use crate::model::Record;

/// Lowercase, `&` spelled out, non-alphanumeric runs collapsed to `-`, no
/// leading or trailing dashes.
pub fn slugify(s: &str) -> String {
    let lowered = s.trim().to_lowercase().replace('&', "and");
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Detail page path: `/daycare/{id}-{name}-{city}`.
pub fn detail_url(record: &Record) -> String {
    format!(
        "/daycare/{}-{}-{}",
        record.id(),
        slugify(record.name()),
        slugify(record.city())
    )
}

/// Title-cases the upper-case export values ("NEW ALBANY" -> "New Albany").
pub fn pretty_name(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut at_word_start = true;

    for c in lowered.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }

    out
}

pub fn rating_label(rating: &str) -> &'static str {
    match rating.trim() {
        "3" => "Gold Rated",
        "2" => "Silver Rated",
        "1" => "Bronze Rated",
        _ => "Not Rated",
    }
}
