//! Event-driven AsciiDoc renderer for behaviour-driven story runs.
//!
//! A story runner reports its progress as a stream of [`StoryEvent`]s: stories
//! start and end, scenarios run steps, steps succeed, fail or stay pending.
//! [`StoryReporter`] turns that stream into one AsciiDoc document per
//! top-level story and writes it to any [`std::io::Write`] sink.
//!
//! # Architecture
//!
//! - [`blocks`]: pure functions rendering one model element each
//! - [`StoryDocument`]: markup buffer with a typed slot for the verdict banner
//! - [`SectionLevel`]: heading depth shared by stories, given stories and scenarios
//! - [`Verdict`]: worst outcome seen so far, filled into the banner when the story ends
//!
//! Stories run as preconditions ("given stories") render inline in their
//! parent's document, one heading level deeper, and their outcomes count
//! towards the parent's verdict.
//!
//! # Example
//!
//! ```
//! use storydoc_report::{Narrative, StepOutcome, Story, StoryEvent, StoryReporter};
//!
//! let mut reporter = StoryReporter::new(Vec::new());
//! reporter
//!     .handle_all([
//!         StoryEvent::BeforeStory { story: Story::new("/path/to/story"), given_story: false },
//!         StoryEvent::Narrative(Narrative::new("renovate my house", "customer", "get a loan")),
//!         StoryEvent::BeforeScenario { title: "I ask for a loan".to_owned() },
//!         StepOutcome::Pending { step: "Then I should get a loan".to_owned() }.into(),
//!         StoryEvent::AfterScenario,
//!         StoryEvent::AfterStory { given_story: false },
//!     ])
//!     .unwrap();
//!
//! let output = String::from_utf8(reporter.into_inner()).unwrap();
//! assert!(output.contains("This story can be shipped with caution."));
//! ```

pub mod blocks;
mod document;
mod error;
mod event;
pub mod format;
mod icon;
mod level;
mod model;
mod reporter;
mod verdict;

pub use document::StoryDocument;
pub use error::ReportError;
pub use event::{StepOutcome, StoryEvent};
pub use icon::Icon;
pub use level::{SectionLevel, heading_markup};
pub use model::{
    ExamplesTable, GivenStory, Lifecycle, Meta, Narrative, Outcome, OutcomesTable, Story,
};
pub use reporter::StoryReporter;
pub use storydoc_config::LineEnding;
pub use verdict::Verdict;
