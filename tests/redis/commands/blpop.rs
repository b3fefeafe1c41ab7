use std::time::{Duration, Instant};

use redis_store::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_blpop_command_direct_response() {
    let env = TestEnv::new();

    env.exec_command_immediate_success_response(
        TestUtils::rpush_command("grape", &["mango", "raspberry", "apple"]),
        &TestUtils::expected_integer(3),
    )
    .await;

    env.exec_command_immediate_success_response(
        TestUtils::blpop_command("grape", "0"),
        &TestUtils::expected_bulk_string_array(&["grape", "mango"]),
    )
    .await;
}

#[tokio::test]
async fn test_handle_blpop_command_timeout() {
    let env = TestEnv::new();
    let started = Instant::now();

    env.exec_command_immediate_success_response(
        TestUtils::blpop_command("grape", "0.1"),
        &TestUtils::expected_null(),
    )
    .await;

    assert!(started.elapsed() >= Duration::from_millis(100));
    assert_eq!(env.keyspace.lists.waiting("grape"), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blpop_is_woken_by_push() {
    let env = TestEnv::new();

    let client_task = TestUtils::spawn_blpop_task(&env, "queue", "2");
    TestUtils::wait_for_list_waiters(&env, "queue", 1).await;

    env.exec_command_immediate_success_response(
        TestUtils::rpush_command("queue", &["item1"]),
        &TestUtils::expected_integer(1),
    )
    .await;

    let client_result = TestUtils::wait_for_completion(client_task, Duration::from_secs(3)).await;

    assert_eq!(
        client_result,
        Ok(TestUtils::expected_bulk_string_array(&["queue", "item1"]))
    );

    // The element went straight to the waiter and was never visible.
    env.exec_command_immediate_success_response(
        TestUtils::llen_command("queue"),
        &TestUtils::expected_integer(0),
    )
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blpop_waiters_are_served_first_come_first_served() {
    let env = TestEnv::new();

    let first_client = TestUtils::spawn_blpop_task(&env, "queue", "0");
    TestUtils::wait_for_list_waiters(&env, "queue", 1).await;

    let second_client = TestUtils::spawn_blpop_task(&env, "queue", "0");
    TestUtils::wait_for_list_waiters(&env, "queue", 2).await;

    env.exec_command_immediate_success_response(
        TestUtils::rpush_command("queue", &["v1", "v2"]),
        &TestUtils::expected_integer(2),
    )
    .await;

    assert_eq!(
        TestUtils::wait_for_completion(first_client, Duration::from_secs(3)).await,
        Ok(TestUtils::expected_bulk_string_array(&["queue", "v1"]))
    );
    assert_eq!(
        TestUtils::wait_for_completion(second_client, Duration::from_secs(3)).await,
        Ok(TestUtils::expected_bulk_string_array(&["queue", "v2"]))
    );
    assert!(!env.keyspace.lists.exists("queue"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blpop_each_element_is_delivered_once() {
    let env = TestEnv::new();
    let client_count = 20;

    let clients: Vec<_> = (0..client_count)
        .map(|_| TestUtils::spawn_blpop_task(&env, "queue", "5"))
        .collect();
    TestUtils::wait_for_list_waiters(&env, "queue", client_count).await;

    let values: Vec<String> = (0..client_count).map(|i| format!("item{}", i)).collect();
    let pushers: Vec<_> = values
        .iter()
        .map(|value| {
            let keyspace = std::sync::Arc::clone(&env.keyspace);
            let value = value.clone();
            tokio::spawn(async move { keyspace.lists.rpush("queue", vec![value]) })
        })
        .collect();

    for pusher in pushers {
        pusher.await.unwrap();
    }

    let mut received = Vec::new();
    for client in clients {
        let reply = TestUtils::wait_for_completion(client, Duration::from_secs(3))
            .await
            .unwrap();
        received.push(reply);
    }

    let mut expected: Vec<String> = values
        .iter()
        .map(|value| TestUtils::expected_bulk_string_array(&["queue", value.as_str()]))
        .collect();

    received.sort();
    expected.sort();

    assert_eq!(received, expected);
    assert_eq!(env.keyspace.lists.llen("queue"), 0);
}

#[tokio::test]
async fn test_handle_blpop_command_invalid() {
    let env = TestEnv::new();

    let test_cases = vec![
        (
            TestUtils::command("BLPOP", &["queue"]),
            CommandError::WrongNumberOfArguments("BLPOP".to_string()),
        ),
        (
            TestUtils::command("BLPOP", &["queue", "other", "0"]),
            CommandError::WrongNumberOfArguments("BLPOP".to_string()),
        ),
        (
            TestUtils::blpop_command("queue", "-1"),
            CommandError::InvalidBlpopTimeout,
        ),
        (
            TestUtils::blpop_command("queue", "soon"),
            CommandError::InvalidBlpopTimeout,
        ),
    ];

    for (command, expected_error) in test_cases {
        env.exec_command_immediate_error_response(command, expected_error)
            .await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blpop_with_zero_timeout_waits_until_pushed() {
    let env = TestEnv::new();

    let client_task = TestUtils::spawn_blpop_task(&env, "queue", "0");
    TestUtils::wait_for_list_waiters(&env, "queue", 1).await;

    TestUtils::sleep_ms(200).await;
    assert!(!client_task.is_finished(), "BLPOP with timeout 0 returned before any push");

    env.exec_command_immediate_success_response(
        TestUtils::lpush_command("queue", &["late"]),
        &TestUtils::expected_integer(1),
    )
    .await;

    let client_result = TestUtils::wait_for_completion(client_task, Duration::from_secs(2)).await;

    assert_eq!(
        client_result,
        Ok(TestUtils::expected_bulk_string_array(&["queue", "late"]))
    );
}
