//! Input checks shared by the domain services.

/// Whether `value` is an address of the shape `local@domain.tld` with no whitespace.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }

    value.match_indices('@').any(|(at, _)| {
        let (local, rest) = value.split_at(at);
        let domain = rest.trim_start_matches('@');

        !local.is_empty() && rest.len() == domain.len() + 1 && has_inner_dot(domain)
    })
}

fn has_inner_dot(domain: &str) -> bool {
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

/// Trim `value`, returning `None` when nothing is left.
#[must_use]
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
