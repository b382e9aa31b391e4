use super::*;
use std::cell::Cell;

#[test]
fn should_retry_respects_attempt_budget() {
    let policy = RetryPolicy::default();
    let err = ApiError::Transport("reset".into());
    assert!(policy.should_retry(1, &err));
    assert!(policy.should_retry(2, &err));
    assert!(!policy.should_retry(3, &err));
}

#[test]
fn should_retry_skips_auth_failures() {
    let policy = RetryPolicy::default();
    assert!(!policy.should_retry(1, &ApiError::Unauthorized));
    assert!(!policy.should_retry(1, &ApiError::Forbidden { message: String::new() }));
}

#[tokio::test]
async fn run_retries_until_success() {
    let calls = Cell::new(0);
    let result = RetryPolicy::default()
        .run("test", || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { if n < 3 { Err(ApiError::Transport("flaky".into())) } else { Ok(n) } }
        })
        .await;
    assert_eq!(result, Ok(3));
    assert_eq!(calls.get(), 3);
}

#[tokio::test]
async fn run_gives_up_after_three_attempts() {
    let calls = Cell::new(0);
    let result: Result<(), ApiError> = RetryPolicy::default()
        .run("test", || {
            calls.set(calls.get() + 1);
            async { Err(ApiError::Status { status: 503, message: "down".into() }) }
        })
        .await;
    assert!(result.is_err());
    assert_eq!(calls.get(), 3);
}

#[tokio::test]
async fn run_never_retries_unauthorized() {
    let calls = Cell::new(0);
    let result: Result<(), ApiError> = RetryPolicy::default()
        .run("test", || {
            calls.set(calls.get() + 1);
            async { Err(ApiError::Unauthorized) }
        })
        .await;
    assert_eq!(result, Err(ApiError::Unauthorized));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn none_policy_runs_once() {
    let calls = Cell::new(0);
    let _: Result<(), ApiError> = RetryPolicy::none()
        .run("test", || {
            calls.set(calls.get() + 1);
            async { Err(ApiError::Transport("x".into())) }
        })
        .await;
    assert_eq!(calls.get(), 1);
}
