use redis_store::{
    commands::CommandError,
    store::{StreamId, StreamIdError},
};

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_xadd_command() {
    let env = TestEnv::new();
    let stream_id = "1526919030474-0";

    env.exec_command_immediate_success_response(
        TestUtils::xadd_command(
            "fruits",
            stream_id,
            &["mango", "apple", "raspberry", "pear"],
        ),
        &TestUtils::expected_bulk_string(stream_id),
    )
    .await;

    let entries = env
        .keyspace
        .streams
        .range("fruits", StreamId::MIN, StreamId::MAX);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, StreamId::new(1526919030474, 0));
    assert_eq!(
        entries[0].fields,
        vec![
            ("mango".to_string(), "apple".to_string()),
            ("raspberry".to_string(), "pear".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_handle_xadd_command_monotonic_ids() {
    let env = TestEnv::new();

    let test_cases = vec![
        ("5-1", Ok(TestUtils::expected_bulk_string("5-1"))),
        (
            "5-1",
            Err(CommandError::InvalidStreamId(StreamIdError::NotGreaterThanTop)),
        ),
        ("5-*", Ok(TestUtils::expected_bulk_string("5-2"))),
        ("6-*", Ok(TestUtils::expected_bulk_string("6-0"))),
        (
            "4-9",
            Err(CommandError::InvalidStreamId(StreamIdError::NotGreaterThanTop)),
        ),
        (
            "0-0",
            Err(CommandError::InvalidStreamId(StreamIdError::NotGreaterThanZero)),
        ),
        (
            "6-x",
            Err(CommandError::InvalidStreamId(StreamIdError::Invalid)),
        ),
    ];

    for (stream_id, expected) in test_cases {
        assert_eq!(
            env.exec_command(TestUtils::xadd_command("sensor", stream_id, &["a", "1"]))
                .await,
            expected,
            "XADD sensor {}",
            stream_id
        );
    }

    assert_eq!(
        env.keyspace.streams.last_id("sensor"),
        Some(StreamId::new(6, 0))
    );
}

#[tokio::test]
async fn test_handle_xadd_command_zero_millisecond_sequence_starts_at_one() {
    let env = TestEnv::new();

    env.exec_command_immediate_success_response(
        TestUtils::xadd_command("sensor", "0-*", &["a", "1"]),
        &TestUtils::expected_bulk_string("0-1"),
    )
    .await;
}

#[tokio::test]
async fn test_handle_xadd_command_auto_id() {
    let env = TestEnv::new();

    let first = env
        .exec_command(TestUtils::xadd_command("sensor", "*", &["a", "1"]))
        .await
        .unwrap();
    let second = env
        .exec_command(TestUtils::xadd_command("sensor", "*", &["a", "2"]))
        .await
        .unwrap();

    assert_ne!(first, second);

    let ids: Vec<StreamId> = env
        .keyspace
        .streams
        .range("sensor", StreamId::MIN, StreamId::MAX)
        .iter()
        .map(|entry| entry.id)
        .collect();

    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);
    assert!(first.ends_with(&format!("{}\r\n", ids[0])));
}

#[tokio::test]
async fn test_handle_xadd_command_rejected_id_creates_nothing() {
    let env = TestEnv::new();

    env.exec_command_immediate_error_response(
        TestUtils::xadd_command("sensor", "0-0", &["a", "1"]),
        CommandError::InvalidStreamId(StreamIdError::NotGreaterThanZero),
    )
    .await;

    env.exec_command_immediate_success_response(
        TestUtils::type_command("sensor"),
        &TestUtils::expected_simple_string("none"),
    )
    .await;
}

#[tokio::test]
async fn test_handle_xadd_command_invalid() {
    let env = TestEnv::new();

    let test_cases = vec![
        TestUtils::command("XADD", &[]),
        TestUtils::command("XADD", &["sensor", "1-1"]),
        TestUtils::command("XADD", &["sensor", "1-1", "temperature"]),
        TestUtils::command("XADD", &["sensor", "1-1", "temperature", "36", "humidity"]),
    ];

    for command in test_cases {
        env.exec_command_immediate_error_response(
            command,
            CommandError::WrongNumberOfArguments("XADD".to_string()),
        )
        .await;
    }
}
