//! Font Awesome icon macros used by step lines, admonitions and banners.

/// Icon shown next to a rendered element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    /// Step passed.
    Successful,
    /// Step or outcome failed.
    Failed,
    /// Step has no matching implementation yet.
    Pending,
    /// Step was skipped after an earlier failure.
    NotPerformed,
    /// Step was a comment or otherwise ignorable.
    Ignorable,
    /// Step was restarted.
    Restarted,
    /// Story or scenario excluded by a filter.
    NotAllowed,
    /// Story cancelled by a timeout.
    Cancelled,
    /// Story banner: ready to ship.
    StorySuccess,
    /// Story banner: ship with caution.
    StoryWarning,
    /// Story banner: do not ship.
    StoryFailure,
}

impl Icon {
    /// Render the `icon:` inline macro for this icon.
    ///
    /// # Example
    ///
    /// ```
    /// use storydoc_report::Icon;
    ///
    /// assert_eq!(Icon::Successful.markup(), r#"icon:thumbs-up[role="green"]"#);
    /// ```
    #[must_use]
    pub fn markup(self) -> String {
        let (name, role) = self.name_and_role();
        match self {
            Self::StorySuccess => format!(r#"icon:{name}[size=2x, role="{role}"]"#),
            Self::StoryWarning | Self::StoryFailure => {
                format!(r#"icon:{name}[size=2x, flip="horizontal" role="{role}"]"#)
            }
            _ => format!(r#"icon:{name}[role="{role}"]"#),
        }
    }

    fn name_and_role(self) -> (&'static str, &'static str) {
        match self {
            Self::Successful => ("thumbs-up", "green"),
            Self::Failed => ("thumbs-down", "red"),
            Self::Pending => ("spinner", "black"),
            Self::NotPerformed => ("unlink", "black"),
            Self::Ignorable => ("volume-off", "black"),
            Self::Restarted => ("rotate-right", "yellow"),
            Self::NotAllowed => ("minus-sign", "orange"),
            Self::Cancelled => ("remove-circle", "orange"),
            Self::StorySuccess => ("rocket", "green"),
            Self::StoryWarning => ("truck", "orange"),
            Self::StoryFailure => ("ambulance", "red"),
        }
    }
}
