//! Event dispatcher turning story runner events into AsciiDoc documents.

use std::io::Write;

use storydoc_config::{LineEnding, ReportConfig};

use crate::blocks;
use crate::document::StoryDocument;
use crate::error::ReportError;
use crate::event::{StepOutcome, StoryEvent};
use crate::icon::Icon;
use crate::level::SectionLevel;
use crate::model::Story;
use crate::verdict::Verdict;

/// State of the top-level story being reported.
///
/// Given stories render into the same state; it is replaced wholesale once
/// the top-level story has been flushed.
#[derive(Debug)]
struct RenderState {
    document: StoryDocument,
    level: SectionLevel,
    verdict: Verdict,
    /// Scenarios started in each open story, outermost first.
    scenario_counts: Vec<usize>,
}

impl RenderState {
    fn new(base_level: usize) -> Self {
        Self {
            document: StoryDocument::new(),
            level: SectionLevel::new(base_level),
            verdict: Verdict::Success,
            scenario_counts: Vec::new(),
        }
    }

    fn escalate(&mut self, severity: Verdict) {
        self.verdict = self.verdict.merge(severity);
    }

    fn open_stories(&self) -> usize {
        self.scenario_counts.len()
    }

    /// Count a new scenario in the innermost open story and return its ordinal.
    fn next_scenario(&mut self) -> usize {
        match self.scenario_counts.last_mut() {
            Some(count) => {
                *count += 1;
                *count
            }
            None => 1,
        }
    }
}

/// Renders story runner events into one AsciiDoc document per top-level story.
///
/// Each top-level story is buffered until its end, then written to the sink
/// with a single `write_all` call. The verdict banner at the top of the story
/// reflects every outcome reported for it, including those of given stories.
///
/// # Example
///
/// ```
/// use storydoc_report::{StepOutcome, Story, StoryEvent, StoryReporter};
///
/// let mut reporter = StoryReporter::new(Vec::new());
/// reporter
///     .handle_all([
///         StoryEvent::BeforeStory { story: Story::new("loan.story"), given_story: false },
///         StoryEvent::BeforeScenario { title: "Borrow".to_owned() },
///         StepOutcome::Successful { step: "Given I have $50".to_owned() }.into(),
///         StoryEvent::AfterScenario,
///         StoryEvent::AfterStory { given_story: false },
///     ])
///     .unwrap();
///
/// let output = String::from_utf8(reporter.into_inner()).unwrap();
/// assert!(output.starts_with("[[loan.story]]\n== loan.story\n"));
/// assert!(output.contains("*Given* I have $50"));
/// ```
#[derive(Debug)]
pub struct StoryReporter<W: Write> {
    sink: W,
    base_level: usize,
    line_ending: LineEnding,
    state: RenderState,
}

impl<W: Write> StoryReporter<W> {
    /// Create a reporter writing to `sink` with base level 0 and LF line endings.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            base_level: 0,
            line_ending: LineEnding::Lf,
            state: RenderState::new(0),
        }
    }

    /// Create a reporter using the `[report]` configuration section.
    #[must_use]
    pub fn from_config(config: &ReportConfig, sink: W) -> Self {
        Self::new(sink)
            .with_initial_level(config.initial_level)
            .with_line_ending(config.line_ending)
    }

    /// Nest all stories under `level`, for embedding in a larger document.
    ///
    /// Discards any story in progress; call before reporting.
    #[must_use]
    pub fn with_initial_level(mut self, level: usize) -> Self {
        self.base_level = level;
        self.state = RenderState::new(level);
        self
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Current section depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state.level.depth()
    }

    /// Verdict of the story in progress so far.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.state.verdict
    }

    /// Whether no story is open.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.open_stories() == 0
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Handle events in order, stopping at the first error.
    pub fn handle_all<I>(&mut self, events: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = StoryEvent>,
    {
        events.into_iter().try_for_each(|event| self.handle(event))
    }

    /// Handle a single event.
    ///
    /// # Errors
    ///
    /// - [`ReportError::UnexpectedEvent`] for a rendered event while no story is open
    /// - [`ReportError::MissingCause`] for a failed or restarted step without a cause
    /// - [`ReportError::Io`] if writing a finished story fails
    ///
    /// Nothing is rendered for an event that returns an error.
    pub fn handle(&mut self, event: StoryEvent) -> Result<(), ReportError> {
        let name = event.name();
        let opens_story = matches!(event, StoryEvent::BeforeStory { .. });
        if self.is_idle() && !opens_story && !event.is_ignored() {
            return Err(ReportError::UnexpectedEvent { event: name });
        }

        match event {
            StoryEvent::BeforeStory { story, given_story } => self.before_story(&story, given_story),
            StoryEvent::AfterStory { given_story } => return self.after_story(given_story),
            StoryEvent::StoryNotAllowed { story, filter } => {
                self.state.escalate(Verdict::Warning);
                self.push(&blocks::story_not_allowed(&story, &filter));
            }
            StoryEvent::StoryCancelled { story, timeout } => {
                self.state.escalate(Verdict::Warning);
                self.push(&blocks::story_cancelled(&story, timeout));
            }
            StoryEvent::Narrative(narrative) => self.push_opt(blocks::narrative(&narrative)),
            StoryEvent::Lifecycle(lifecycle) => {
                self.push_opt(blocks::lifecycle_steps(&lifecycle.before, &lifecycle.after));
            }
            StoryEvent::GivenStories(stories) => self.push_opt(blocks::given_stories(&stories)),
            StoryEvent::BeforeScenario { title } => self.before_scenario(&title),
            StoryEvent::ScenarioNotAllowed { title, filter } => {
                self.state.escalate(Verdict::Warning);
                self.push(&blocks::scenario_not_allowed(&title, &filter));
            }
            StoryEvent::AfterScenario => {
                self.state.level.exit();
            }
            StoryEvent::BeforeExamples { steps, table } => {
                self.push(&blocks::examples(&steps, &table));
            }
            StoryEvent::Step(outcome) => return self.step(&outcome),
            StoryEvent::GivenStoryPaths(_)
            | StoryEvent::ScenarioMeta(_)
            | StoryEvent::Example(_)
            | StoryEvent::AfterExamples
            | StoryEvent::BeforeStep(_)
            | StoryEvent::PendingMethods(_)
            | StoryEvent::DryRun => {
                tracing::trace!(event = name, "Event not rendered");
            }
        }
        Ok(())
    }

    fn before_story(&mut self, story: &Story, given_story: bool) {
        if !given_story && !self.is_idle() {
            tracing::warn!(story = %story.name, "Top-level story started inside another story");
        }
        self.state.scenario_counts.push(0);
        let depth = self.state.level.enter();
        tracing::debug!(story = %story.name, given_story, depth, "Story started");

        let heading = self.state.level.heading();
        self.push(&blocks::story_heading(&story.name, &heading, given_story));
        if !given_story && self.state.document.reserve_verdict() {
            self.push("\n\n");
        }
        self.push_opt(blocks::description(story.description.as_deref()));
        self.push_opt(blocks::meta(&story.meta));
    }

    fn after_story(&mut self, given_story: bool) -> Result<(), ReportError> {
        self.state.level.exit();
        self.state.scenario_counts.pop();

        if !self.is_idle() {
            if !given_story {
                tracing::warn!(
                    open = self.state.open_stories(),
                    "Top-level story ended inside another story"
                );
            }
            self.push(blocks::GIVEN_STORY_SEPARATOR);
            return Ok(());
        }
        if given_story {
            tracing::warn!("Given story ended with no enclosing story");
        }

        let state = std::mem::replace(&mut self.state, RenderState::new(self.base_level));
        let verdict = state.verdict;
        let document = with_line_ending(state.document.resolve(verdict), self.line_ending);
        self.sink.write_all(document.as_bytes())?;
        self.sink.flush()?;
        tracing::debug!(%verdict, bytes = document.len(), "Story flushed");
        Ok(())
    }

    fn before_scenario(&mut self, title: &str) {
        let ordinal = self.state.next_scenario();
        self.state.level.enter();
        let heading = self.state.level.heading();
        let fragment = if title.trim().is_empty() {
            blocks::scenario_heading(&ordinal.to_string(), &heading)
        } else {
            blocks::scenario_heading(title, &heading)
        };
        self.push(&fragment);
    }

    fn step(&mut self, outcome: &StepOutcome) -> Result<(), ReportError> {
        let fragment = match outcome {
            StepOutcome::Successful { step } => blocks::step(step, Icon::Successful),
            StepOutcome::Pending { step } => blocks::step(step, Icon::Pending),
            StepOutcome::NotPerformed { step } => blocks::step(step, Icon::NotPerformed),
            StepOutcome::Ignorable { step } => blocks::step(step, Icon::Ignorable),
            StepOutcome::Failed { step, cause } => {
                blocks::failed_step(step, require_cause(step, cause.as_deref())?)
            }
            StepOutcome::Restarted { step, cause } => {
                blocks::restarted_step(step, require_cause(step, cause.as_deref())?)
            }
            StepOutcome::FailedOutcomes { step, table } => blocks::failed_outcomes(step, table),
        };
        if let Some(severity) = outcome.severity() {
            self.state.escalate(severity);
        }
        self.push(&fragment);
        Ok(())
    }

    fn push(&mut self, markup: &str) {
        self.state.document.push(markup);
    }

    fn push_opt(&mut self, markup: Option<String>) {
        if let Some(markup) = markup {
            self.push(&markup);
        }
    }
}

fn require_cause<'a>(step: &str, cause: Option<&'a str>) -> Result<&'a str, ReportError> {
    cause.ok_or_else(|| ReportError::MissingCause {
        step: step.to_owned(),
    })
}

/// Normalize line breaks to the configured line ending.
///
/// LF output is passed through unchanged.
fn with_line_ending(text: String, line_ending: LineEnding) -> String {
    if line_ending == LineEnding::Lf {
        return text;
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect::<Vec<_>>()
        .join(line_ending.as_str())
}
