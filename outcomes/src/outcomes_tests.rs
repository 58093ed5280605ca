use crate::outcome::{TestOutcome, TestStep, TestTag, UserStory};
use crate::outcomes::TestOutcomes;
use crate::result::TestResult;

fn outcome(name: &str, result: TestResult, story: Option<&str>, duration_ms: u64) -> TestOutcome {
    let mut o = TestOutcome::new(name.to_uppercase(), name, result);
    o.duration_ms = duration_ms;
    o.user_story = story.map(|s| UserStory {
        id: format!("stories.{s}"),
        name: s.to_owned(),
        path: None,
    });
    o
}

fn sample() -> TestOutcomes {
    let mut tagged = outcome("search", TestResult::Failure, Some("Search"), 40);
    tagged.tags.push(TestTag {
        name: "smoke".to_owned(),
        tag_type: "tag".to_owned(),
    });
    tagged.steps.push(TestStep {
        description: "type query".to_owned(),
        result: TestResult::Failure,
        duration_ms: 40,
        children: vec![],
    });

    TestOutcomes::of(vec![
        outcome("login", TestResult::Success, Some("Accounts"), 10),
        tagged,
        outcome("logout", TestResult::Success, Some("Accounts"), 5),
        outcome("export", TestResult::Pending, None, 0),
        outcome("import", TestResult::Ignored, None, 0),
        outcome("upload", TestResult::Error, Some("Files"), 100),
    ])
}

#[test]
fn test_empty_outcomes() {
    let outcomes = TestOutcomes::of(Vec::new());
    assert!(outcomes.is_empty());
    assert_eq!(outcomes.total(), 0);
    assert_eq!(outcomes.total_duration_ms(), 0);
    assert_eq!(outcomes.overall_result(), TestResult::Undefined);
    assert!(outcomes.by_user_story().is_empty());
}

#[test]
fn test_counts_by_result() {
    let outcomes = sample();
    assert_eq!(outcomes.total(), 6);
    assert_eq!(outcomes.successful_count(), 2);
    assert_eq!(outcomes.failure_count(), 1);
    assert_eq!(outcomes.error_count(), 1);
    assert_eq!(outcomes.pending_count(), 1);
    assert_eq!(outcomes.skipped_count(), 1);
}

#[test]
fn test_totals() {
    let outcomes = sample();
    assert_eq!(outcomes.total_duration_ms(), 155);
    assert_eq!(outcomes.total_steps(), 1);
    assert_eq!(outcomes.overall_result(), TestResult::Error);
}

#[test]
fn test_with_result_keeps_load_order() {
    let passed = sample().with_result(TestResult::Success);
    let names: Vec<&str> = passed.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["login", "logout"]);
}

#[test]
fn test_with_tag() {
    let smoke = sample().with_tag("SMOKE");
    assert_eq!(smoke.total(), 1);
    assert_eq!(smoke.outcomes()[0].name, "search");
}

#[test]
fn test_filtering_does_not_change_original() {
    let outcomes = sample();
    let _ = outcomes.with_result(TestResult::Failure);
    assert_eq!(outcomes.total(), 6);
}

#[test]
fn test_by_user_story_groups() {
    let outcomes = sample();
    let groups = outcomes.by_user_story();

    let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["", "Accounts", "Files", "Search"]);

    let accounts: Vec<&str> = groups["Accounts"].iter().map(|o| o.name.as_str()).collect();
    assert_eq!(accounts, vec!["login", "logout"]);
    assert_eq!(groups[""].len(), 2);
}

#[test]
fn test_iterates_by_reference() {
    let outcomes = sample();
    let mut seen = 0;
    for outcome in &outcomes {
        assert!(!outcome.name.is_empty());
        seen += 1;
    }
    assert_eq!(seen, outcomes.total());
}
