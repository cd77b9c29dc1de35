//! Story document with a deferred verdict slot.
//!
//! The verdict of a story is only known once its last step has been reported,
//! but its banner is the first thing readers see. The document therefore
//! keeps the banner position as a typed slot among the markup fragments and
//! fills it exactly once in [`StoryDocument::resolve`]. Accumulated markup is
//! never searched, so step text that looks like a placeholder (or contains
//! `%s`, `{{…}}` and the like) is left untouched.

use crate::verdict::Verdict;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Fragment {
    Markup(String),
    Verdict,
}

/// Append-only buffer for one top-level story.
#[derive(Clone, Debug, Default)]
pub struct StoryDocument {
    fragments: Vec<Fragment>,
    has_slot: bool,
}

impl StoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append markup.
    pub fn push(&mut self, markup: &str) {
        if markup.is_empty() {
            return;
        }
        if let Some(Fragment::Markup(last)) = self.fragments.last_mut() {
            last.push_str(markup);
        } else {
            self.fragments.push(Fragment::Markup(markup.to_owned()));
        }
    }

    /// Reserve the verdict banner position at the current end of the document.
    ///
    /// A document holds at most one slot. Returns `false` (and leaves the
    /// document unchanged) if a slot was already reserved.
    pub fn reserve_verdict(&mut self) -> bool {
        if self.has_slot {
            return false;
        }
        self.fragments.push(Fragment::Verdict);
        self.has_slot = true;
        true
    }

    #[must_use]
    pub fn has_verdict_slot(&self) -> bool {
        self.has_slot
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Consume the document, filling the slot with the banner for `verdict`.
    #[must_use]
    pub fn resolve(self, verdict: Verdict) -> String {
        let banner = verdict.banner();
        let capacity = self
            .fragments
            .iter()
            .map(|f| match f {
                Fragment::Markup(s) => s.len(),
                Fragment::Verdict => banner.len(),
            })
            .sum();

        let mut output = String::with_capacity(capacity);
        for fragment in self.fragments {
            match fragment {
                Fragment::Markup(s) => output.push_str(&s),
                Fragment::Verdict => output.push_str(&banner),
            }
        }
        output
    }
}
