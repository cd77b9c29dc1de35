//! Story model passed along with reporter events.

use std::collections::HashMap;

use crate::format::story_identifier;

/// A story being reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Story {
    /// Story name, usually its path (e.g. `stories/loan.story`).
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Story-level meta properties.
    pub meta: Meta,
}

impl Story {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }
}

/// Story narrative: *In order to* / *As a* / *I want to*.
///
/// Absent parts are not rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Narrative {
    pub in_order_to: Option<String>,
    pub as_a: Option<String>,
    pub i_want_to: Option<String>,
}

impl Narrative {
    #[must_use]
    pub fn new(
        in_order_to: impl Into<String>,
        as_a: impl Into<String>,
        i_want_to: impl Into<String>,
    ) -> Self {
        Self {
            in_order_to: Some(in_order_to.into()),
            as_a: Some(as_a.into()),
            i_want_to: Some(i_want_to.into()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_order_to.is_none() && self.as_a.is_none() && self.i_want_to.is_none()
    }
}

/// Meta properties in insertion order.
///
/// Setting an existing property replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meta {
    properties: Vec<(String, String)>,
}

impl Meta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a property, keeping its original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.properties.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.properties.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Meta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Self::new();
        for (name, value) in iter {
            meta.insert(name, value);
        }
        meta
    }
}

/// Steps run before and after every scenario of a story.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lifecycle {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Examples table of a parametrised scenario.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExamplesTable {
    /// Column headers in declared order.
    pub headers: Vec<String>,
    /// Rows keyed by header.
    pub rows: Vec<HashMap<String, String>>,
}

impl ExamplesTable {
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row given as values in header order.
    ///
    /// Extra values are dropped; missing values stay missing.
    #[must_use]
    pub fn with_row<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row = self
            .headers
            .iter()
            .cloned()
            .zip(values.into_iter().map(Into::into))
            .collect();
        self.rows.push(row);
        self
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value of `header` in row `index`, if present.
    #[must_use]
    pub fn cell(&self, index: usize, header: &str) -> Option<&str> {
        self.rows.get(index)?.get(header).map(String::as_str)
    }
}

/// A single expected/actual comparison inside a step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub description: String,
    /// Actual value, if any.
    pub value: Option<String>,
    /// Description of the expectation the value was checked against.
    pub matcher: String,
    pub verified: bool,
}

impl Outcome {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        value: impl Into<String>,
        matcher: impl Into<String>,
        verified: bool,
    ) -> Self {
        Self {
            description: description.into(),
            value: Some(value.into()),
            matcher: matcher.into(),
            verified,
        }
    }
}

/// Outcomes verified by a step, with the column labels to render.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomesTable {
    /// Labels for the description, value, matcher and verified columns.
    pub fields: [String; 4],
    pub outcomes: Vec<Outcome>,
}

impl OutcomesTable {
    #[must_use]
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self {
            outcomes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: [&str; 4]) -> Self {
        self.fields = fields.map(str::to_owned);
        self
    }

    /// Whether every outcome was verified.
    #[must_use]
    pub fn all_verified(&self) -> bool {
        self.outcomes.iter().all(|o| o.verified)
    }
}

impl Default for OutcomesTable {
    fn default() -> Self {
        Self {
            fields: ["Description", "Value", "Matcher", "Verified"].map(str::to_owned),
            outcomes: Vec::new(),
        }
    }
}

/// Reference to a story run as a precondition of the current one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GivenStory {
    pub path: String,
    /// Optional anchor (parameter row selector) within the given story.
    pub anchor: Option<String>,
}

impl GivenStory {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            anchor: None,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Cross-reference identifier derived from the path.
    #[must_use]
    pub fn identifier(&self) -> &str {
        story_identifier(&self.path)
    }
}
