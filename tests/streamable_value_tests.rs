use futures::StreamExt;
use objstream::Error;
use objstream::core::StreamableValue;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_each_update_is_observed_when_the_reader_keeps_up() {
    let (writer, value) = StreamableValue::new();
    let mut reader = value.subscribe();

    writer.update(1);
    assert_eq!(reader.recv().await, Some(Ok(1)));
    writer.update(2);
    assert_eq!(reader.recv().await, Some(Ok(2)));
    writer.done();
    assert_eq!(reader.recv().await, None);
}

#[tokio::test]
async fn test_a_slow_reader_only_sees_the_latest_value() {
    let (writer, value) = StreamableValue::new();
    let mut reader = value.subscribe();

    for i in 1..=5 {
        writer.update(i);
    }
    assert_eq!(reader.recv().await, Some(Ok(5)));
    writer.done();
    assert_eq!(reader.recv().await, None);
}

#[tokio::test]
async fn test_a_late_subscriber_starts_from_the_current_value() {
    let (writer, value) = StreamableValue::new();
    writer.update("early");
    writer.update("current");

    let mut reader = value.subscribe();
    assert_eq!(reader.recv().await, Some(Ok("current")));

    writer.update("next");
    assert_eq!(reader.recv().await, Some(Ok("next")));
    writer.done();
    assert_eq!(reader.recv().await, None);
}

#[tokio::test]
async fn test_done_ends_every_traversal_after_the_final_value() {
    let (writer, value) = StreamableValue::new();
    let mut reader = value.subscribe();

    writer.update("final");
    writer.done();

    assert_eq!(reader.recv().await, Some(Ok("final")));
    assert_eq!(reader.recv().await, None);
    assert_eq!(reader.recv().await, None);

    // A traversal opened after completion still starts from the held value.
    let mut late = value.subscribe();
    assert_eq!(late.recv().await, Some(Ok("final")));
    assert_eq!(late.recv().await, None);
}

#[tokio::test]
async fn test_fail_is_delivered_once_per_reader() {
    let (writer, value) = StreamableValue::new();
    let mut first = value.subscribe();
    let mut second = value.subscribe();

    writer.update("partial");
    writer.fail(Error::ProviderError("upstream died".to_string()));

    // An unseen value is still delivered ahead of the failure.
    assert_eq!(first.recv().await, Some(Ok("partial")));
    match first.recv().await {
        Some(Err(Error::ProviderError(_))) => {}
        other => panic!("Expected ProviderError, got {other:?}"),
    }
    assert_eq!(first.recv().await, None);
    assert_eq!(first.recv().await, None);

    assert_eq!(second.recv().await, Some(Ok("partial")));
    match second.recv().await {
        Some(Err(Error::ProviderError(_))) => {}
        other => panic!("Expected ProviderError, got {other:?}"),
    }
    assert_eq!(second.recv().await, None);
}

#[tokio::test]
async fn test_failing_before_any_update_delivers_only_the_error() {
    let (writer, value) = StreamableValue::<String>::new();
    let mut reader = value.subscribe();

    writer.fail(Error::ProviderError("nothing was produced".to_string()));

    match reader.recv().await {
        Some(Err(Error::ProviderError(_))) => {}
        other => panic!("Expected ProviderError, got {other:?}"),
    }
    assert_eq!(reader.recv().await, None);
}

#[tokio::test]
async fn test_a_snapshot_sequence_is_delivered_in_write_order() {
    let (writer, value) = StreamableValue::new();
    let mut reader = value.subscribe();

    let snapshots = [
        serde_json::json!({"items": ["A"]}),
        serde_json::json!({"items": ["A", "B"]}),
        serde_json::json!({"items": ["A", "B", "C"]}),
    ];

    for snapshot in &snapshots {
        writer.update(snapshot.clone());
        assert_eq!(reader.recv().await, Some(Ok(snapshot.clone())));
    }
    writer.done();
    assert_eq!(reader.recv().await, None);
}

#[tokio::test]
async fn test_dropping_the_writer_mid_stream_surfaces_an_abort() {
    let (writer, value) = StreamableValue::new();
    let mut reader = value.subscribe();

    writer.update(42);
    drop(writer);

    assert_eq!(reader.recv().await, Some(Ok(42)));
    match reader.recv().await {
        Some(Err(Error::StreamAborted(_))) => {}
        other => panic!("Expected StreamAborted, got {other:?}"),
    }
    assert_eq!(reader.recv().await, None);
}

#[tokio::test]
async fn test_readers_hold_independent_cursors() {
    let (writer, value) = StreamableValue::new();
    let mut eager = value.subscribe();
    let mut lazy = value.subscribe();

    writer.update("a");
    assert_eq!(eager.recv().await, Some(Ok("a")));
    writer.update("b");
    assert_eq!(eager.recv().await, Some(Ok("b")));

    // The other cursor never saw "a" and now coalesces to "b".
    assert_eq!(lazy.recv().await, Some(Ok("b")));

    writer.done();
    assert_eq!(eager.recv().await, None);
    assert_eq!(lazy.recv().await, None);
}

#[tokio::test]
async fn test_a_parked_reader_is_woken_by_each_update() {
    let (writer, value) = StreamableValue::<String>::new();
    let mut reader = value.subscribe();
    let (tx, mut rx) = mpsc::channel(1);

    // The forwarder acknowledges each value through the channel, so the
    // writer below never advances until the reader has consumed the
    // previous update.
    let forwarder = tokio::spawn(async move {
        while let Some(item) = reader.recv().await {
            if tx.send(item).await.is_err() {
                return;
            }
        }
    });

    writer.update("one".to_string());
    assert_eq!(rx.recv().await, Some(Ok("one".to_string())));
    writer.update("two".to_string());
    assert_eq!(rx.recv().await, Some(Ok("two".to_string())));
    writer.done();
    assert_eq!(rx.recv().await, None);

    forwarder.await.unwrap();
}

#[tokio::test]
async fn test_abandoning_a_reader_does_not_disturb_the_writer() {
    let (writer, value) = StreamableValue::new();
    let mut reader = value.subscribe();

    writer.update(1);
    assert_eq!(reader.recv().await, Some(Ok(1)));
    drop(reader);

    // The writer keeps going and the cell stays usable for new readers.
    writer.update(2);
    assert!(!writer.is_closed());
    writer.done();

    let mut fresh = value.subscribe();
    assert_eq!(fresh.recv().await, Some(Ok(2)));
    assert_eq!(fresh.recv().await, None);
}

#[tokio::test]
async fn test_latest_reflects_the_current_slot() {
    let (writer, value) = StreamableValue::new();
    assert_eq!(value.latest(), None);

    writer.update(7);
    assert_eq!(value.latest(), Some(7));
    writer.update(8);
    assert_eq!(value.latest(), Some(8));

    writer.done();
    assert_eq!(value.latest(), Some(8));
    assert!(value.is_closed());
}

#[tokio::test]
async fn test_a_reader_can_be_driven_as_a_stream() {
    let (writer, value) = StreamableValue::new();
    let mut stream = value.subscribe().into_stream();

    writer.update(10);
    assert_eq!(stream.next().await, Some(Ok(10)));
    writer.update(20);
    assert_eq!(stream.next().await, Some(Ok(20)));
    writer.done();
    assert_eq!(stream.next().await, None);
}
