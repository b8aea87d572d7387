/// Player-name abbreviation policies.
///
/// Two distinct rules serve two distinct callers: `abbreviate` compacts
/// football position leaders at extraction time, while
/// `abbreviate_for_display` squeezes any name into a caller-supplied length
/// budget and is meant for display surfaces.

/// Compact a full name for a stat line: `"Patrick Mahomes"` → `"Mahomes"`,
/// `"Giannis Antetokounmpo"` → `"G. Antetokounmpo"`.
pub fn abbreviate(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    if parts.len() >= 2 {
        let last = parts[parts.len() - 1];
        // Surname alone when it is short enough.
        if last.chars().count() <= 8 {
            return last.to_owned();
        }
        if let Some(initial) = parts[0].chars().next() {
            return format!("{initial}. {last}");
        }
    }

    // Single token (or empty): keep at most 10 characters.
    full_name.chars().take(10).collect()
}

/// Fit `name` into `max_len` characters: unchanged if it fits, two-token
/// initials if those fit (`"LeBron James"` → `"LJ"`), hard truncation last.
pub fn abbreviate_for_display(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_owned();
    }

    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() >= 2 {
        let initials: String = parts.iter().take(2).filter_map(|p| p.chars().next()).collect();
        if initials.chars().count() <= max_len {
            return initials;
        }
    }

    name.chars().take(max_len).collect()
}
