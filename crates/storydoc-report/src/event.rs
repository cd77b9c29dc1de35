//! Reporter events emitted by the story runner.

use std::collections::HashMap;
use std::time::Duration;

use crate::model::{ExamplesTable, GivenStory, Lifecycle, Meta, Narrative, OutcomesTable, Story};
use crate::verdict::Verdict;

/// Result of running a single step.
///
/// Every variant carries the step text as reported by the runner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepOutcome {
    /// Step passed.
    Successful {
        step: String,
    },
    /// Step failed. `cause` is the failure message; the runner must always
    /// provide it.
    Failed {
        step: String,
        cause: Option<String>,
    },
    /// No step implementation matched.
    Pending {
        step: String,
    },
    /// Step skipped because an earlier step in the scenario failed.
    NotPerformed {
        step: String,
    },
    /// Comment or other step that is not run.
    Ignorable {
        step: String,
    },
    /// Step was restarted. `cause` is the restart reason; the runner must
    /// always provide it.
    Restarted {
        step: String,
        cause: Option<String>,
    },
    /// Step failed verifying a table of outcomes.
    FailedOutcomes {
        step: String,
        table: OutcomesTable,
    },
}

impl StepOutcome {
    /// Step text.
    #[must_use]
    pub fn step(&self) -> &str {
        match self {
            Self::Successful { step }
            | Self::Failed { step, .. }
            | Self::Pending { step }
            | Self::NotPerformed { step }
            | Self::Ignorable { step }
            | Self::Restarted { step, .. }
            | Self::FailedOutcomes { step, .. } => step,
        }
    }

    /// Verdict this outcome contributes to its story, if any.
    #[must_use]
    pub fn severity(&self) -> Option<Verdict> {
        match self {
            Self::Successful { .. } | Self::Ignorable { .. } => None,
            Self::Pending { .. } | Self::NotPerformed { .. } => Some(Verdict::Warning),
            Self::Failed { .. } | Self::Restarted { .. } | Self::FailedOutcomes { .. } => {
                Some(Verdict::Failure)
            }
        }
    }
}

/// Lifecycle notification from the story runner.
///
/// Events arrive strictly in run order. Stories nest when a story runs other
/// stories as preconditions ("given stories"); those share the enclosing
/// story's document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoryEvent {
    /// A story starts. `given_story` is set for stories run as preconditions.
    BeforeStory {
        story: Story,
        given_story: bool,
    },
    /// The innermost open story ends. The document is flushed once no story is open.
    AfterStory {
        given_story: bool,
    },
    /// Story excluded by a meta filter.
    StoryNotAllowed {
        story: String,
        filter: String,
    },
    /// Story cancelled after running longer than `timeout`.
    StoryCancelled {
        story: String,
        timeout: Duration,
    },
    Narrative(Narrative),
    Lifecycle(Lifecycle),
    GivenStories(Vec<GivenStory>),
    /// Plain list of given story paths. Not rendered.
    GivenStoryPaths(Vec<String>),
    BeforeScenario {
        title: String,
    },
    ScenarioNotAllowed {
        title: String,
        filter: String,
    },
    /// Scenario-level meta. Not rendered.
    ScenarioMeta(Meta),
    AfterScenario,
    /// Parametrised steps and the table they run over.
    BeforeExamples {
        steps: Vec<String>,
        table: ExamplesTable,
    },
    /// Start of one examples row. Not rendered.
    Example(HashMap<String, String>),
    /// Not rendered.
    AfterExamples,
    /// Not rendered; the outcome follows as [`StoryEvent::Step`].
    BeforeStep(String),
    /// Outcome of a step in the current scenario.
    Step(StepOutcome),
    /// Steps without a matching implementation. Not rendered.
    PendingMethods(Vec<String>),
    /// The run is a dry run. Not rendered.
    DryRun,
}

impl StoryEvent {
    /// Short event name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeforeStory { .. } => "before-story",
            Self::AfterStory { .. } => "after-story",
            Self::StoryNotAllowed { .. } => "story-not-allowed",
            Self::StoryCancelled { .. } => "story-cancelled",
            Self::Narrative(_) => "narrative",
            Self::Lifecycle(_) => "lifecycle",
            Self::GivenStories(_) => "given-stories",
            Self::GivenStoryPaths(_) => "given-story-paths",
            Self::BeforeScenario { .. } => "before-scenario",
            Self::ScenarioNotAllowed { .. } => "scenario-not-allowed",
            Self::ScenarioMeta(_) => "scenario-meta",
            Self::AfterScenario => "after-scenario",
            Self::BeforeExamples { .. } => "before-examples",
            Self::Example(_) => "example",
            Self::AfterExamples => "after-examples",
            Self::BeforeStep(_) => "before-step",
            Self::Step(_) => "step",
            Self::PendingMethods(_) => "pending-methods",
            Self::DryRun => "dry-run",
        }
    }

    /// Whether this event is accepted but produces no output.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(
            self,
            Self::GivenStoryPaths(_)
                | Self::ScenarioMeta(_)
                | Self::Example(_)
                | Self::AfterExamples
                | Self::BeforeStep(_)
                | Self::PendingMethods(_)
                | Self::DryRun
        )
    }
}

impl From<StepOutcome> for StoryEvent {
    fn from(outcome: StepOutcome) -> Self {
        Self::Step(outcome)
    }
}
