use std::str::FromStr;

use crate::outcome::{TestOutcome, TestStep, TestTag, UserStory};
use crate::result::TestResult;

fn step(description: &str, result: TestResult, children: Vec<TestStep>) -> TestStep {
    TestStep {
        description: description.to_owned(),
        result,
        duration_ms: 5,
        children,
    }
}

#[test]
fn test_result_parses_case_insensitively() {
    assert_eq!(TestResult::from_str("SUCCESS").unwrap(), TestResult::Success);
    assert_eq!(TestResult::from_str("failure").unwrap(), TestResult::Failure);
    assert_eq!(TestResult::from_str(" Pending ").unwrap(), TestResult::Pending);
}

#[test]
fn test_result_rejects_unknown_name() {
    let err = TestResult::from_str("BROKEN").unwrap_err();
    assert_eq!(err.name, "BROKEN");
    assert!(err.to_string().contains("Unknown test result"));
}

#[test]
fn test_result_display_matches_persisted_name() {
    for result in TestResult::ALL {
        assert_eq!(TestResult::from_str(&result.to_string()).unwrap(), result);
    }
}

#[test]
fn test_overall_result_takes_most_severe() {
    use TestResult::{Error, Failure, Ignored, Pending, Success, Undefined};

    assert_eq!(TestResult::overall(Vec::<TestResult>::new()), Undefined);
    assert_eq!(TestResult::overall([Success, Ignored]), Success);
    assert_eq!(TestResult::overall([Success, Pending]), Pending);
    assert_eq!(TestResult::overall([Pending, Failure, Success]), Failure);
    assert_eq!(TestResult::overall([Failure, Error]), Error);
}

#[test]
fn test_step_count_counts_leaves() {
    let mut outcome = TestOutcome::new("Checkout", "checkout", TestResult::Success);
    outcome.steps = vec![
        step("open shop", TestResult::Success, vec![]),
        step(
            "buy item",
            TestResult::Success,
            vec![
                step("select", TestResult::Success, vec![]),
                step("pay", TestResult::Success, vec![]),
            ],
        ),
    ];
    assert_eq!(outcome.step_count(), 3);
}

#[test]
fn test_outcome_without_steps_has_zero_steps() {
    let outcome = TestOutcome::new("Empty", "empty", TestResult::Pending);
    assert_eq!(outcome.step_count(), 0);
    assert!(!outcome.is_successful());
}

#[test]
fn test_has_tag_ignores_case() {
    let mut outcome = TestOutcome::new("Login", "login", TestResult::Success);
    outcome.tags.push(TestTag {
        name: "Smoke".to_owned(),
        tag_type: "tag".to_owned(),
    });
    assert!(outcome.has_tag("smoke"));
    assert!(!outcome.has_tag("regression"));
}

#[test]
fn test_story_name_defaults_to_empty() {
    let mut outcome = TestOutcome::new("Login", "login", TestResult::Success);
    assert_eq!(outcome.story_name(), "");
    outcome.user_story = Some(UserStory {
        id: "accounts.Login".to_owned(),
        name: "Login".to_owned(),
        path: None,
    });
    assert_eq!(outcome.story_name(), "Login");
}

#[test]
fn test_outcome_serializes_result_upper_case() {
    let outcome = TestOutcome::new("Login", "login", TestResult::Failure);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["result"], "FAILURE");
    assert!(json.get("tags").is_none(), "empty tags should be omitted");
}
