//! Player name cleaning applied at registration.

use super::errors::{TournamentError, TournamentResult};

/// Longest accepted player name, counted in characters before escaping
pub const MAX_NAME_LEN: usize = 100;

/// Clean a free-text player name for storage.
///
/// Control characters are dropped and surrounding whitespace is trimmed.
/// Markup characters (`&`, `<`, `>`) are escaped as HTML entities, so a name
/// like `<b>Bob</b>` is stored as `&lt;b&gt;Bob&lt;/b&gt;` and renders as
/// text. Quotes and apostrophes are ordinary name characters and kept.
///
/// # Errors
///
/// Returns `TournamentError::InvalidName` if the trimmed name is empty or
/// longer than [`MAX_NAME_LEN`] characters.
pub fn clean_name(raw: &str) -> TournamentResult<String> {
    let visible: String = raw.chars().filter(|c| !c.is_control()).collect();
    let trimmed = visible.trim();

    if trimmed.is_empty() {
        return Err(TournamentError::InvalidName(
            "Name must not be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(TournamentError::InvalidName(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    let mut cleaned = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => cleaned.push_str("&amp;"),
            '<' => cleaned.push_str("&lt;"),
            '>' => cleaned.push_str("&gt;"),
            c => cleaned.push(c),
        }
    }

    Ok(cleaned)
}
