//! Story verdict and its banner.

use std::fmt;

use crate::icon::Icon;

/// Worst outcome observed during a story.
///
/// Ordered by severity: `Success < Warning < Failure`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// Every step passed or was ignorable.
    #[default]
    Success,
    /// Nothing failed, but something was pending, skipped, filtered or cancelled.
    Warning,
    /// At least one step failed.
    Failure,
}

impl Verdict {
    /// Combine two verdicts, keeping the more severe one.
    ///
    /// ```
    /// use storydoc_report::Verdict;
    ///
    /// assert_eq!(Verdict::Failure.merge(Verdict::Warning), Verdict::Failure);
    /// assert_eq!(Verdict::Success.merge(Verdict::Warning), Verdict::Warning);
    /// ```
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }

    /// Sentence shown in the banner.
    #[must_use]
    pub fn sentence(self) -> &'static str {
        match self {
            Self::Success => "This story is ready to be shipped.",
            Self::Warning => "This story can be shipped with caution.",
            Self::Failure => "This story contains errors and should not be shipped.",
        }
    }

    /// Lead paragraph announcing the verdict at the top of a story.
    #[must_use]
    pub fn banner(self) -> String {
        let icon = match self {
            Self::Success => Icon::StorySuccess,
            Self::Warning => Icon::StoryWarning,
            Self::Failure => Icon::StoryFailure,
        };
        format!("[.lead]\n{} {}", icon.markup(), self.sentence())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Failure => "failure",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Verdict; 3] = [Verdict::Success, Verdict::Warning, Verdict::Failure];

    #[test]
    fn test_ordering() {
        assert!(Verdict::Success < Verdict::Warning);
        assert!(Verdict::Warning < Verdict::Failure);
    }

    #[test]
    fn test_merge_is_max() {
        for a in ALL {
            for b in ALL {
                assert_eq!(a.merge(b), a.max(b));
                assert_eq!(a.merge(b), b.merge(a));
            }
        }
    }

    #[test]
    fn test_merge_never_regresses() {
        for a in ALL {
            for b in ALL {
                assert!(a.merge(b) >= a);
            }
        }
    }

    #[test]
    fn test_default_is_success() {
        assert_eq!(Verdict::default(), Verdict::Success);
    }

    #[test]
    fn test_banners() {
        assert_eq!(
            Verdict::Success.banner(),
            "[.lead]\nicon:rocket[size=2x, role=\"green\"] This story is ready to be shipped."
        );
        assert_eq!(
            Verdict::Warning.banner(),
            "[.lead]\nicon:truck[size=2x, flip=\"horizontal\" role=\"orange\"] This story can be shipped with caution."
        );
        assert_eq!(
            Verdict::Failure.banner(),
            "[.lead]\nicon:ambulance[size=2x, flip=\"horizontal\" role=\"red\"] This story contains errors and should not be shipped."
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Verdict::Warning.to_string(), "warning");
    }
}
