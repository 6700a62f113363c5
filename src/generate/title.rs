//! Title rules for generated metrics.

/// Platform limit on metric titles, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

pub const POP_SUFFIX: &str = " - previous year";

const PERCENT_PREFIX: &str = "% ";

const ELLIPSIS: char = '…';

/// Append `suffix` to `title`, cutting `title` so the result fits in
/// [`MAX_TITLE_LENGTH`] characters.
///
/// When cutting is needed the result is exactly `MAX_TITLE_LENGTH` characters:
/// the kept prefix is followed by an ellipsis, and a title ending in `)` keeps its
/// closing parenthesis after the ellipsis.
pub fn truncate_title(title: &str, suffix: &str) -> String {
    let max = MAX_TITLE_LENGTH.saturating_sub(suffix.chars().count());
    if title.chars().count() <= max {
        return format!("{title}{suffix}");
    }

    let mut out = String::with_capacity(MAX_TITLE_LENGTH * 4);
    if title.ends_with(')') {
        out.extend(title.chars().take(max.saturating_sub(2)));
        out.push(ELLIPSIS);
        out.push(')');
    } else {
        out.extend(title.chars().take(max.saturating_sub(1)));
        out.push(ELLIPSIS);
    }
    out.push_str(suffix);
    out
}

/// `"% " + title`, without doubling an existing `"% "` prefix. Not truncated.
pub fn percent_base_title(title: &str) -> String {
    let bare = title.strip_prefix(PERCENT_PREFIX).unwrap_or(title);
    format!("{PERCENT_PREFIX}{bare}")
}

/// Title of a percent-of-total metric.
pub fn percent_title(title: &str) -> String {
    truncate_title(&percent_base_title(title), "")
}

/// Title of a period-over-period metric.
pub fn pop_title(title: &str) -> String {
    truncate_title(title, POP_SUFFIX)
}
