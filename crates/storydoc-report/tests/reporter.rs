//! End-to-end rendering of story event streams.

use std::time::Duration;

use pretty_assertions::assert_eq;
use storydoc_report::{
    ExamplesTable, GivenStory, Lifecycle, LineEnding, Meta, Narrative, Outcome, OutcomesTable,
    ReportError, StepOutcome, Story, StoryEvent, StoryReporter, Verdict,
};

const STORY: &str = "/path/to/story";

fn before_story(story: Story) -> StoryEvent {
    StoryEvent::BeforeStory {
        story,
        given_story: false,
    }
}

fn before_given_story(name: &str) -> StoryEvent {
    StoryEvent::BeforeStory {
        story: Story::new(name),
        given_story: true,
    }
}

fn after_story() -> StoryEvent {
    StoryEvent::AfterStory { given_story: false }
}

fn after_given_story() -> StoryEvent {
    StoryEvent::AfterStory { given_story: true }
}

fn scenario(title: &str) -> StoryEvent {
    StoryEvent::BeforeScenario {
        title: title.to_owned(),
    }
}

fn successful(step: &str) -> StoryEvent {
    StepOutcome::Successful {
        step: step.to_owned(),
    }
    .into()
}

fn render(events: Vec<StoryEvent>) -> String {
    render_with(StoryReporter::new(Vec::new()), events)
}

fn render_with(mut reporter: StoryReporter<Vec<u8>>, events: Vec<StoryEvent>) -> String {
    reporter.handle_all(events).unwrap();
    assert!(reporter.is_idle());
    String::from_utf8(reporter.into_inner()).unwrap()
}

fn loan_story() -> Story {
    Story::new(STORY)
        .with_description("An interesting story")
        .with_meta(Meta::new().with_property("author", "Mauro"))
}

fn loan_narrative() -> StoryEvent {
    StoryEvent::Narrative(Narrative::new(
        "renovate my house",
        "customer",
        "get a loan",
    ))
}

#[test]
fn test_successful_story() {
    let output = render(vec![
        before_story(loan_story()),
        loan_narrative(),
        scenario("I ask for a loan"),
        StoryEvent::BeforeStep("Given I have a balance of $50".to_owned()),
        successful("Given I have a balance of $50"),
        successful("When I request $20"),
        successful("When I ask Liz for a loan of $100 \u{FF5F}with fees\u{FF60}"),
        StepOutcome::Ignorable {
            step: "!-- A comment".to_owned(),
        }
        .into(),
        StoryEvent::AfterScenario,
        after_story(),
    ]);

    assert_eq!(
        output,
        r#"[[_path_to_story]]
== /path/to/story

[.lead]
icon:rocket[size=2x, role="green"] This story is ready to be shipped.

.Description
----
An interesting story
----

.Meta
----
+author+: Mauro
----

.Narrative
****
*In Order To* renovate my house

*As a* customer

*I Want To* get a loan

****

=== Scenario: I ask for a loan

*Given* I have a balance of $50 icon:thumbs-up[role="green"]

*When* I request $20 icon:thumbs-up[role="green"]

*When* I ask Liz for a loan of $100 (with fees) icon:thumbs-up[role="green"]

*!--* A comment icon:volume-off[role="black"]

"#
    );
}

#[test]
fn test_pending_story_is_shipped_with_caution() {
    let output = render(vec![
        before_story(Story::new(STORY)),
        scenario("I ask for a loan"),
        successful("Given I have a balance of $50"),
        StepOutcome::Pending {
            step: "Then I should have a balance of $30".to_owned(),
        }
        .into(),
        StepOutcome::NotPerformed {
            step: "Then I should have $20".to_owned(),
        }
        .into(),
        StoryEvent::AfterScenario,
        after_story(),
    ]);

    assert_eq!(
        output,
        r#"[[_path_to_story]]
== /path/to/story

[.lead]
icon:truck[size=2x, flip="horizontal" role="orange"] This story can be shipped with caution.

=== Scenario: I ask for a loan

*Given* I have a balance of $50 icon:thumbs-up[role="green"]

*Then* I should have a balance of $30 icon:spinner[role="black"]

*Then* I should have $20 icon:unlink[role="black"]

"#
    );
}

#[test]
fn test_failed_story() {
    let outcomes = OutcomesTable::new(vec![Outcome::new(
        "I don't return all",
        "100.0",
        "<50.0>",
        false,
    )]);

    let output = render(vec![
        before_story(Story::new(STORY)),
        scenario("I ask for a loan"),
        successful("Given I have a balance of $50"),
        StepOutcome::Failed {
            step: "Then I should have a balance of $30".to_owned(),
            cause: Some("Expected <30> but was <50>".to_owned()),
        }
        .into(),
        StepOutcome::NotPerformed {
            step: "Then I should have $20".to_owned(),
        }
        .into(),
        StepOutcome::FailedOutcomes {
            step: "Then I don't return loan".to_owned(),
            table: outcomes,
        }
        .into(),
        StepOutcome::Restarted {
            step: "When I retry".to_owned(),
            cause: Some("Lock timeout".to_owned()),
        }
        .into(),
        StoryEvent::AfterScenario,
        after_story(),
    ]);

    assert_eq!(
        output,
        r#"[[_path_to_story]]
== /path/to/story

[.lead]
icon:ambulance[size=2x, flip="horizontal" role="red"] This story contains errors and should not be shipped.

=== Scenario: I ask for a loan

*Given* I have a balance of $50 icon:thumbs-up[role="green"]

*Then* I should have a balance of $30 icon:thumbs-down[role="red"]

[IMPORTANT]
====
Expected <30> but was <50>
====

*Then* I should have $20 icon:unlink[role="black"]

*Then* I don't return loan icon:thumbs-down[role="red"]
[options="header"]
|===
|Description|Value|Matcher|Verified
|I don't return all
|100.0
|<50.0>
|icon:thumbs-down[role="red"]

|===

*When* I retry icon:rotate-right[role="yellow"]

[WARNING]
====
Lock timeout
====

"#
    );
}

#[test]
fn test_examples_and_lifecycle() {
    let table = ExamplesTable::new(["money", "to"])
        .with_row(["$30", "Mauro"])
        .with_row(["$50", "Paul"]);
    let row = |index: usize| table.rows[index].clone();

    let output = render(vec![
        before_story(Story::new("loans.story")),
        StoryEvent::Lifecycle(Lifecycle {
            before: vec!["Given a clean ledger".to_owned()],
            after: vec![],
        }),
        scenario("Multiple loans"),
        StoryEvent::BeforeExamples {
            steps: vec![
                "Given I have <money>".to_owned(),
                "Then I lend to <to>".to_owned(),
            ],
            table: table.clone(),
        },
        StoryEvent::Example(row(0)),
        successful("Given I have $30"),
        StoryEvent::Example(row(1)),
        successful("Given I have $50"),
        StoryEvent::AfterExamples,
        StoryEvent::AfterScenario,
        after_story(),
    ]);

    assert_eq!(
        output,
        r#"[[loans.story]]
== loans.story

[.lead]
icon:rocket[size=2x, role="green"] This story is ready to be shipped.

.Lifecycle
****
.Before
----
Given a clean ledger
----

****

=== Scenario: Multiple loans

.Examples
****
.Steps
----
Given I have <money>
Then I lend to <to>
----

[options="header"]
.Examples
|===
|money|to
|$30
|Mauro

|$50
|Paul

|===

****

*Given* I have $30 icon:thumbs-up[role="green"]

*Given* I have $50 icon:thumbs-up[role="green"]

"#
    );
}

#[test]
fn test_given_story_renders_inside_parent() {
    let output = render(vec![
        before_story(Story::new("/path/to/parent.story")),
        StoryEvent::GivenStories(vec![GivenStory::new("/path/to/given.story")]),
        StoryEvent::GivenStoryPaths(vec!["/path/to/given.story".to_owned()]),
        before_given_story("/path/to/given.story"),
        scenario("Setup"),
        successful("Given a customer"),
        StoryEvent::AfterScenario,
        after_given_story(),
        scenario("Main"),
        successful("Then done"),
        StoryEvent::AfterScenario,
        after_story(),
    ]);

    assert_eq!(
        output,
        r#"[[_path_to_parent.story]]
== /path/to/parent.story

[.lead]
icon:rocket[size=2x, role="green"] This story is ready to be shipped.

.Given Stories
[NOTE]
====
<<given.story, /path/to/given.story>>
====

[[_path_to_given.story]]
=== /path/to/given.story [GivenStory]

==== Scenario: Setup

*Given* a customer icon:thumbs-up[role="green"]

'''

=== Scenario: Main

*Then* done icon:thumbs-up[role="green"]

"#
    );
}

#[test]
fn test_given_story_failure_marks_parent() {
    let output = render(vec![
        before_story(Story::new("parent.story")),
        before_given_story("given.story"),
        scenario("Setup"),
        StepOutcome::Failed {
            step: "Given a customer".to_owned(),
            cause: Some("no customer".to_owned()),
        }
        .into(),
        StoryEvent::AfterScenario,
        after_given_story(),
        scenario("Main"),
        successful("Then done"),
        StoryEvent::AfterScenario,
        after_story(),
    ]);

    assert!(output.contains(Verdict::Failure.sentence()));
    assert_eq!(output.matches("[.lead]").count(), 1);
}

#[test]
fn test_story_not_allowed() {
    let output = render(vec![
        before_story(Story::new(STORY)),
        StoryEvent::StoryNotAllowed {
            story: STORY.to_owned(),
            filter: "-theme slow".to_owned(),
        },
        after_story(),
    ]);

    assert_eq!(
        output,
        r#"[[_path_to_story]]
== /path/to/story

[.lead]
icon:truck[size=2x, flip="horizontal" role="orange"] This story can be shipped with caution.

[WARNING]
.Story Not Allowed [-theme slow]
====
/path/to/story icon:minus-sign[role="orange"]
====

"#
    );
}

#[test]
fn test_scenario_not_allowed_and_cancelled_story() {
    let output = render(vec![
        before_story(Story::new(STORY)),
        StoryEvent::ScenarioNotAllowed {
            title: "Slow scenario".to_owned(),
            filter: "-skip".to_owned(),
        },
        StoryEvent::StoryCancelled {
            story: STORY.to_owned(),
            timeout: Duration::from_secs(2),
        },
        after_story(),
    ]);

    assert!(output.contains(Verdict::Warning.sentence()));
    assert!(output.contains(
        "[WARNING]\n.Scenario Not Allowed [-skip]\n====\nSlow scenario icon:minus-sign[role=\"orange\"]\n====\n\n"
    ));
    assert!(output.ends_with(
        "[WARNING]\n.Story Cancelled with Timeout [2 sec.]\n====\n/path/to/story icon:remove-circle[role=\"orange\"]\n====\n\n"
    ));
}

#[test]
fn test_placeholder_like_step_text_is_preserved() {
    let output = render(vec![
        before_story(Story::new(STORY)),
        scenario("Formats"),
        successful("Then the rate is 100% with %s and {{VERDICT}}"),
        StoryEvent::AfterScenario,
        after_story(),
    ]);

    assert!(output.contains("*Then* the rate is 100% with %s and {{VERDICT}} icon:thumbs-up"));
    assert_eq!(output.matches("This story").count(), 1);
}

#[test]
fn test_consecutive_stories_are_independent() {
    let output = render(vec![
        before_story(Story::new("first.story")),
        scenario("One"),
        StepOutcome::Failed {
            step: "Then it breaks".to_owned(),
            cause: Some("boom".to_owned()),
        }
        .into(),
        StoryEvent::AfterScenario,
        after_story(),
        before_story(Story::new("second.story")),
        scenario("Two"),
        successful("Then it works"),
        StoryEvent::AfterScenario,
        after_story(),
    ]);

    let (first, second) = output.split_once("[[second.story]]").unwrap();
    assert!(first.contains(Verdict::Failure.sentence()));
    assert!(second.starts_with("\n== second.story\n\n[.lead]\nicon:rocket"));
    assert!(second.contains("=== Scenario: Two\n"));
    assert!(!second.contains("boom"));
}

#[test]
fn test_initial_level_and_crlf() {
    let reporter = StoryReporter::new(Vec::new())
        .with_initial_level(1)
        .with_line_ending(LineEnding::Crlf);

    let output = render_with(
        reporter,
        vec![
            before_story(Story::new("loan.story")),
            scenario("Borrow"),
            successful("Given money"),
            StoryEvent::AfterScenario,
            after_story(),
        ],
    );

    assert!(output.starts_with("[[loan.story]]\r\n=== loan.story\r\n\r\n[.lead]\r\n"));
    assert!(output.contains("\r\n==== Scenario: Borrow\r\n\r\n"));
    assert!(!output.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_missing_cause_leaves_story_open() {
    let mut reporter = StoryReporter::new(Vec::new());
    reporter.handle(before_story(Story::new(STORY))).unwrap();

    let err = reporter
        .handle(
            StepOutcome::Failed {
                step: "Then x".to_owned(),
                cause: None,
            }
            .into(),
        )
        .unwrap_err();

    assert!(
        matches!(err, ReportError::MissingCause { .. }),
        "Expected ReportError::MissingCause, got {err:?}"
    );
    assert_eq!(err.to_string(), "missing cause for step \"Then x\"");
    assert!(!reporter.is_idle());

    reporter.handle(after_story()).unwrap();
    let output = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(output.contains(Verdict::Success.sentence()));
    assert!(!output.contains("Then x"));
}

#[test]
fn test_step_without_story_is_rejected() {
    let mut reporter = StoryReporter::new(Vec::new());

    let err = reporter.handle(successful("Given nothing")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "unexpected step event: no story is open"
    );
    assert!(reporter.get_ref().is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn test_replay_serialized_events() {
    let events = vec![
        before_story(loan_story()),
        loan_narrative(),
        scenario("I ask for a loan"),
        StepOutcome::Failed {
            step: "Then I should have a balance of $30".to_owned(),
            cause: Some("Expected <30> but was <50>".to_owned()),
        }
        .into(),
        StoryEvent::StoryCancelled {
            story: STORY.to_owned(),
            timeout: Duration::from_secs(5),
        },
        StoryEvent::AfterScenario,
        after_story(),
    ];

    let json = serde_json::to_string(&events).unwrap();
    let replayed: Vec<StoryEvent> = serde_json::from_str(&json).unwrap();

    assert_eq!(replayed, events);
    assert_eq!(render(replayed), render(events));
}
