use redis_store::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_rpush_command() {
    let env = TestEnv::new();

    let test_cases = vec![
        (vec!["mango"], 1, vec!["mango"]),
        (vec!["raspberry", "apple"], 3, vec!["mango", "raspberry", "apple"]),
        (vec!["pear"], 4, vec!["mango", "raspberry", "apple", "pear"]),
    ];

    for (values, expected_length, expected_list) in test_cases {
        env.exec_command_immediate_success_response(
            TestUtils::rpush_command("grape", &values),
            &TestUtils::expected_integer(expected_length),
        )
        .await;

        assert_eq!(env.keyspace.lists.lrange("grape", 0, -1), expected_list);
    }
}

#[tokio::test]
async fn test_handle_rpush_command_invalid() {
    let env = TestEnv::new();

    env.exec_command_immediate_error_response(
        TestUtils::command("RPUSH", &["grape"]),
        CommandError::WrongNumberOfArguments("RPUSH".to_string()),
    )
    .await;

    assert!(!env.keyspace.lists.exists("grape"));
}
