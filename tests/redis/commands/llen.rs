use redis_store::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_llen_command() {
    let env = TestEnv::new();

    env.exec_command_immediate_success_response(
        TestUtils::llen_command("grape"),
        &TestUtils::expected_integer(0),
    )
    .await;

    env.exec_command_immediate_success_response(
        TestUtils::rpush_command("grape", &["mango", "raspberry", "apple"]),
        &TestUtils::expected_integer(3),
    )
    .await;

    env.exec_command_immediate_success_response(
        TestUtils::llen_command("grape"),
        &TestUtils::expected_integer(3),
    )
    .await;
}

#[tokio::test]
async fn test_handle_llen_command_invalid() {
    let env = TestEnv::new();

    env.exec_command_immediate_error_response(
        TestUtils::command("LLEN", &[]),
        CommandError::WrongNumberOfArguments("LLEN".to_string()),
    )
    .await;
}
