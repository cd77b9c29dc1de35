//! AsciiDoc fragments for individual report blocks.
//!
//! Every function here is pure: it turns one piece of the story model into a
//! markup fragment terminated by a blank line. Blocks that can be absent
//! return `None` when there is nothing to show.

use std::time::Duration;

use crate::format::{anchor_id, format_step};
use crate::icon::Icon;
use crate::model::{ExamplesTable, GivenStory, Meta, Narrative, OutcomesTable};

/// Horizontal rule closing a given story inside its parent.
pub const GIVEN_STORY_SEPARATOR: &str = "'''\n\n";

/// Rendered in table cells whose value is missing.
pub const EMPTY_CELL: &str = "{empty}";

/// Anchor and section title of a story.
#[must_use]
pub fn story_heading(name: &str, heading: &str, given_story: bool) -> String {
    let suffix = if given_story { " [GivenStory]" } else { "" };
    format!("[[{}]]\n{heading} {name}{suffix}\n\n", anchor_id(name))
}

/// Section title of a scenario.
#[must_use]
pub fn scenario_heading(title: &str, heading: &str) -> String {
    format!("{heading} Scenario: {title}\n\n")
}

/// Free-text story description as a literal listing.
///
/// Blank descriptions are omitted.
#[must_use]
pub fn description(text: Option<&str>) -> Option<String> {
    let text = text.filter(|t| !t.trim().is_empty())?;
    Some(format!(".Description\n----\n{text}\n----\n\n"))
}

/// Story meta properties, one `+name+: value` line each, in insertion order.
#[must_use]
pub fn meta(meta: &Meta) -> Option<String> {
    if meta.is_empty() {
        return None;
    }
    let mut out = String::from(".Meta\n----\n");
    for (name, value) in meta.iter() {
        out.push_str(&format!("+{name}+: {value}\n"));
    }
    out.push_str("----\n\n");
    Some(out)
}

/// Narrative sidebar. Only the parts that are present get a line.
#[must_use]
pub fn narrative(narrative: &Narrative) -> Option<String> {
    if narrative.is_empty() {
        return None;
    }
    let lines = [
        ("In Order To", &narrative.in_order_to),
        ("As a", &narrative.as_a),
        ("I Want To", &narrative.i_want_to),
    ];
    let mut out = String::from(".Narrative\n****\n");
    for (label, text) in lines {
        if let Some(text) = text {
            out.push_str(&format!("*{label}* {text}\n\n"));
        }
    }
    out.push_str("****\n\n");
    Some(out)
}

/// Lifecycle steps run before and after each scenario.
///
/// The before and after listings are omitted independently when empty.
#[must_use]
pub fn lifecycle_steps(before: &[String], after: &[String]) -> Option<String> {
    if before.is_empty() && after.is_empty() {
        return None;
    }
    let mut out = String::from(".Lifecycle\n****\n");
    if !before.is_empty() {
        out.push_str(&steps_listing("Before", before));
    }
    if !after.is_empty() {
        out.push_str(&steps_listing("After", after));
    }
    out.push_str("****\n\n");
    Some(out)
}

/// Examples sidebar: the parametrised steps followed by the data table.
#[must_use]
pub fn examples(steps: &[String], table: &ExamplesTable) -> String {
    let mut out = String::from(".Examples\n****\n");
    if !steps.is_empty() {
        out.push_str(&steps_listing("Steps", steps));
    }
    out.push_str(&examples_table(table));
    out.push_str("****\n\n");
    out
}

/// Data table of an examples block.
///
/// Cells follow the declared header order. A row without a value for some
/// header gets [`EMPTY_CELL`] there.
#[must_use]
pub fn examples_table(table: &ExamplesTable) -> String {
    let mut out = String::from("[options=\"header\"]\n.Examples\n|===\n");
    out.push_str(&header_row(&table.headers));
    for row in &table.rows {
        for header in &table.headers {
            let value = row.get(header).map_or(EMPTY_CELL, String::as_str);
            out.push_str(&format!("|{value}\n"));
        }
        out.push('\n');
    }
    out.push_str("|===\n\n");
    out
}

/// Table of verified outcomes with a pass/fail icon per row.
#[must_use]
pub fn outcomes_table(table: &OutcomesTable) -> String {
    let mut out = String::from("[options=\"header\"]\n|===\n");
    out.push_str(&header_row(&table.fields));
    for outcome in &table.outcomes {
        let value = outcome.value.as_deref().unwrap_or(EMPTY_CELL);
        let icon = if outcome.verified {
            Icon::Successful
        } else {
            Icon::Failed
        };
        out.push_str(&format!(
            "|{}\n|{value}\n|{}\n|{}\n\n",
            outcome.description,
            outcome.matcher,
            icon.markup()
        ));
    }
    out.push_str("|===\n\n");
    out
}

/// Cross references to the stories run as preconditions.
#[must_use]
pub fn given_stories(stories: &[GivenStory]) -> Option<String> {
    if stories.is_empty() {
        return None;
    }
    let mut out = String::from(".Given Stories\n[NOTE]\n====\n");
    for story in stories {
        out.push_str(&format!("<<{}, {}>>", story.identifier(), story.path));
        if let Some(anchor) = story.anchor.as_deref().filter(|a| !a.trim().is_empty()) {
            out.push_str(&format!("#{anchor}"));
        }
        out.push('\n');
    }
    out.push_str("====\n\n");
    Some(out)
}

/// Step line with its outcome icon.
#[must_use]
pub fn step(step: &str, icon: Icon) -> String {
    format!("{} {}\n\n", format_step(step), icon.markup())
}

/// Failed step followed by its cause.
#[must_use]
pub fn failed_step(step_text: &str, cause: &str) -> String {
    let mut out = step(step_text, Icon::Failed);
    out.push_str(&admonition("IMPORTANT", None, cause));
    out
}

/// Restarted step followed by the restart reason.
#[must_use]
pub fn restarted_step(step_text: &str, cause: &str) -> String {
    let mut out = step(step_text, Icon::Restarted);
    out.push_str(&admonition("WARNING", None, cause));
    out
}

/// Step that failed verifying outcomes, followed by the outcomes table.
#[must_use]
pub fn failed_outcomes(step_text: &str, table: &OutcomesTable) -> String {
    let mut out = format!("{} {}\n", format_step(step_text), Icon::Failed.markup());
    out.push_str(&outcomes_table(table));
    out
}

/// Warning for a scenario excluded by `filter`.
#[must_use]
pub fn scenario_not_allowed(title: &str, filter: &str) -> String {
    let body = format!("{title} {}", Icon::NotAllowed.markup());
    admonition("WARNING", Some(&format!("Scenario Not Allowed [{filter}]")), &body)
}

/// Warning for a story excluded by `filter`.
#[must_use]
pub fn story_not_allowed(name: &str, filter: &str) -> String {
    let body = format!("{name} {}", Icon::NotAllowed.markup());
    admonition("WARNING", Some(&format!("Story Not Allowed [{filter}]")), &body)
}

/// Warning for a story cancelled after `timeout`, shown in whole seconds.
#[must_use]
pub fn story_cancelled(name: &str, timeout: Duration) -> String {
    let body = format!("{name} {}", Icon::Cancelled.markup());
    let title = format!("Story Cancelled with Timeout [{} sec.]", timeout.as_secs());
    admonition("WARNING", Some(&title), &body)
}

fn admonition(kind: &str, title: Option<&str>, body: &str) -> String {
    let title = title.map(|t| format!(".{t}\n")).unwrap_or_default();
    format!("[{kind}]\n{title}====\n{body}\n====\n\n")
}

fn steps_listing(title: &str, steps: &[String]) -> String {
    let mut out = format!(".{title}\n----\n");
    for step in steps {
        out.push_str(step);
        out.push('\n');
    }
    out.push_str("----\n\n");
    out
}

fn header_row(headers: &[String]) -> String {
    let mut out: String = headers.iter().map(|h| format!("|{h}")).collect();
    out.push('\n');
    out
}
