use redis_store::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_lpush_command() {
    let env = TestEnv::new();

    env.exec_command_immediate_success_response(
        TestUtils::lpush_command("letters", &["x", "y"]),
        &TestUtils::expected_integer(2),
    )
    .await;

    env.exec_command_immediate_success_response(
        TestUtils::lrange_command("letters", 0, -1),
        &TestUtils::expected_bulk_string_array(&["y", "x"]),
    )
    .await;

    env.exec_command_immediate_success_response(
        TestUtils::lpush_command("letters", &["a", "b", "c"]),
        &TestUtils::expected_integer(5),
    )
    .await;

    env.exec_command_immediate_success_response(
        TestUtils::lrange_command("letters", 0, -1),
        &TestUtils::expected_bulk_string_array(&["c", "b", "a", "y", "x"]),
    )
    .await;
}

#[tokio::test]
async fn test_handle_lpush_command_invalid() {
    let env = TestEnv::new();

    env.exec_command_immediate_error_response(
        TestUtils::command("LPUSH", &["letters"]),
        CommandError::WrongNumberOfArguments("LPUSH".to_string()),
    )
    .await;
}
