//! BDD step definitions for poll cycle feature

use cucumber::{given, then, when};

use homework_bot::error::HttpError;
use homework_bot::status::ReviewStatus;
use homework_bot::CycleOutcome;

use crate::world::HomeworkWorld;

fn verdict(status: &str) -> &'static str {
    ReviewStatus::from_code(status)
        .unwrap_or_else(|| panic!("Unknown status: {}", status))
        .verdict()
}

#[given(expr = "the poll loop starts from watermark {int}")]
fn loop_starts_from(world: &mut HomeworkWorld, watermark: i64) {
    world.initial_watermark = Some(watermark);
}

#[given(expr = "the API responds with no homeworks and current date {int}")]
fn api_responds_empty(world: &mut HomeworkWorld, current_date: i64) {
    let body = format!(r#"{{"homeworks": [], "current_date": {}}}"#, current_date);
    world.http().push_body(200, &body);
}

#[given(expr = "the API responds with homework {string} in status {string} and current date {int}")]
fn api_responds_homework(world: &mut HomeworkWorld, name: String, status: String, current_date: i64) {
    let body = serde_json::json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": current_date
    });
    world.http().push_body(200, &body.to_string());
}

#[given(expr = "the API responds with body {string}")]
fn api_responds_body(world: &mut HomeworkWorld, body: String) {
    world.http().push_body(200, &body);
}

#[given(expr = "the API responds with HTTP status {int}")]
fn api_responds_status(world: &mut HomeworkWorld, status: u16) {
    world.http().push_body(status, "");
}

#[given(expr = "the API is unreachable for {int} cycle(s)")]
fn api_unreachable(world: &mut HomeworkWorld, cycles: usize) {
    let http = world.http();
    for _ in 0..cycles {
        http.push_get(Err(HttpError("connection refused".to_string())));
    }
}

#[when("one poll cycle runs")]
async fn one_cycle(world: &mut HomeworkWorld) {
    let outcome = world.poll_loop().run_cycle().await;
    world.outcomes.push(outcome);
}

#[when(expr = "{int} poll cycles run")]
async fn many_cycles(world: &mut HomeworkWorld, cycles: usize) {
    for _ in 0..cycles {
        let outcome = world.poll_loop().run_cycle().await;
        world.outcomes.push(outcome);
    }
}

#[then("no message should have been sent")]
fn no_message(world: &mut HomeworkWorld) {
    let sent = world.http().sent_texts();
    assert!(sent.is_empty(), "unexpected messages: {:?}", sent);
}

#[then(expr = "{int} message(s) should have been sent")]
fn messages_sent(world: &mut HomeworkWorld, count: usize) {
    let sent = world.http().sent_texts();
    assert_eq!(sent.len(), count, "messages: {:?}", sent);
}

#[then(expr = "message {int} should mention {string} and the verdict for {string}")]
fn message_mentions(world: &mut HomeworkWorld, index: usize, name: String, status: String) {
    let sent = world.http().sent_texts();
    let message = sent
        .get(index - 1)
        .unwrap_or_else(|| panic!("message {} was not sent: {:?}", index, sent));
    assert!(message.contains(&format!("\"{}\"", name)), "{}", message);
    assert!(message.contains(verdict(&status)), "{}", message);
}

#[then(expr = "message {int} should start with {string}")]
fn message_starts_with(world: &mut HomeworkWorld, index: usize, prefix: String) {
    let sent = world.http().sent_texts();
    let message = sent
        .get(index - 1)
        .unwrap_or_else(|| panic!("message {} was not sent: {:?}", index, sent));
    assert!(message.starts_with(&prefix), "{}", message);
}

#[then(expr = "the watermark should be {int}")]
fn watermark_is(world: &mut HomeworkWorld, expected: i64) {
    let poll_loop = world.poll_loop.as_ref().expect("poll loop not built");
    assert_eq!(poll_loop.state().watermark.as_secs(), expected);
}

#[then(expr = "the cycle should fail with {string}")]
fn cycle_fails_with(world: &mut HomeworkWorld, expected: String) {
    match world.last_outcome() {
        CycleOutcome::Failed { error, .. } => {
            assert!(
                error.to_string().contains(&expected),
                "error '{}' does not contain '{}'",
                error,
                expected
            );
        }
        other => panic!("expected a failed cycle, got {:?}", other),
    }
}

#[then(expr = "the API should have been asked for changes since {int}")]
fn asked_since(world: &mut HomeworkWorld, since: i64) {
    let from_dates = world.http().from_dates();
    assert_eq!(
        from_dates.last().map(String::as_str),
        Some(since.to_string().as_str()),
        "from_date history: {:?}",
        from_dates
    );
}
