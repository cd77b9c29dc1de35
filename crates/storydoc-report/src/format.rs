//! Text formatting for step lines and story identifiers.

use std::borrow::Cow;

/// Marker the step matcher puts before a parameter value that contained
/// literal parentheses.
pub const PARAMETER_VALUE_START: char = '\u{FF5F}';

/// Marker the step matcher puts after a parameter value that contained
/// literal parentheses.
pub const PARAMETER_VALUE_END: char = '\u{FF60}';

/// Format a step for display.
///
/// Restores escaped parentheses in parameter values and emphasizes the step
/// keyword (the first whitespace-delimited token). Everything else is passed
/// through unchanged, including markup-significant characters.
///
/// A keyword that is already emphasized is left alone, so formatting a
/// formatted step is a no-op.
///
/// # Examples
///
/// ```
/// use storydoc_report::format::format_step;
///
/// assert_eq!(format_step("Given I have $50"), "*Given* I have $50");
/// assert_eq!(format_step("When I pay \u{FF5F}<>&\u{FF60}"), "*When* I pay (<>&)");
/// assert_eq!(format_step("*Then* done"), "*Then* done");
/// ```
#[must_use]
pub fn format_step(step: &str) -> String {
    emphasize_keyword(&unescape_parameters(step))
}

/// Replace parameter value markers with literal parentheses.
#[must_use]
pub fn unescape_parameters(text: &str) -> Cow<'_, str> {
    if !text.contains([PARAMETER_VALUE_START, PARAMETER_VALUE_END]) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| match c {
                PARAMETER_VALUE_START => '(',
                PARAMETER_VALUE_END => ')',
                other => other,
            })
            .collect(),
    )
}

fn emphasize_keyword(text: &str) -> String {
    let Some(start) = text.find(|c: char| !c.is_whitespace()) else {
        return text.to_owned();
    };
    let (leading, rest) = text.split_at(start);
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (keyword, tail) = rest.split_at(end);

    if is_emphasized(keyword) {
        return text.to_owned();
    }
    format!("{leading}*{keyword}*{tail}")
}

fn is_emphasized(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('*') && token.ends_with('*')
}

/// Derive a block anchor id from a story name.
///
/// Path separators are not valid in AsciiDoc ids and become underscores.
///
/// # Examples
///
/// ```
/// use storydoc_report::format::anchor_id;
///
/// assert_eq!(anchor_id("/path/to/story"), "_path_to_story");
/// assert_eq!(anchor_id(r"stories\loan.story"), "stories_loan.story");
/// ```
#[must_use]
pub fn anchor_id(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// Derive the cross-reference identifier of a story from its path.
///
/// Uses the last segment after `/`, or after `\` when the path has no `/`.
///
/// # Examples
///
/// ```
/// use storydoc_report::format::story_identifier;
///
/// assert_eq!(story_identifier("stories/precondition.story"), "precondition.story");
/// assert_eq!(story_identifier(r"stories\precondition.story"), "precondition.story");
/// assert_eq!(story_identifier("precondition.story"), "precondition.story");
/// ```
#[must_use]
pub fn story_identifier(path: &str) -> &str {
    path.rsplit_once('/')
        .or_else(|| path.rsplit_once('\\'))
        .map_or(path, |(_, last)| last)
}
