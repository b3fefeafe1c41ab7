use redis_store::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_set_command() {
    let env = TestEnv::new();

    env.exec_command_immediate_success_response(
        TestUtils::set_command("grape", "mango"),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;

    assert_eq!(env.keyspace.strings.get("grape"), Some("mango".to_string()));

    env.exec_command_immediate_success_response(
        TestUtils::set_command("grape", "apple"),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;

    assert_eq!(env.keyspace.strings.get("grape"), Some("apple".to_string()));
}

#[tokio::test]
async fn test_handle_set_command_with_expiration() {
    let env = TestEnv::new();

    env.exec_command_immediate_success_response(
        TestUtils::set_command_with_expiration("grape", "mango", 100),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;

    assert_eq!(env.keyspace.strings.get("grape"), Some("mango".to_string()));

    TestUtils::sleep_ms(150).await;

    assert_eq!(env.keyspace.strings.get("grape"), None);
}

#[tokio::test]
async fn test_handle_set_command_invalid() {
    let env = TestEnv::new();

    let test_cases = vec![
        (
            TestUtils::command("SET", &["grape"]),
            CommandError::WrongNumberOfArguments("SET".to_string()),
        ),
        (
            TestUtils::command("SET", &["grape", "mango", "px", "soon"]),
            CommandError::InvalidSetExpireTime,
        ),
        (
            TestUtils::command("SET", &["grape", "mango", "px", "0"]),
            CommandError::InvalidSetExpireTime,
        ),
        (
            TestUtils::command("SET", &["grape", "mango", "ex", "10"]),
            CommandError::InvalidSetSyntax,
        ),
        (
            TestUtils::command("SET", &["grape", "mango", "px"]),
            CommandError::InvalidSetSyntax,
        ),
    ];

    for (command, expected_error) in test_cases {
        env.exec_command_immediate_error_response(command, expected_error)
            .await;
    }

    assert!(env.keyspace.strings.is_empty());
}
