#[path = "helpers/mod.rs"]
mod helpers;

use helpers::{file_names, setup_test_provider, TEST_KEY};
use mockito::Matcher;
use vidshift_core::models::{BatchItemOutcome, TransformOutcome, TransformOutput};
use vidshift_provider::Provider;

#[tokio::test]
async fn test_batch_isolates_upstream_failure() {
    let mut server = mockito::Server::new_async().await;
    let ok_alpha = server
        .mock("POST", "/")
        .match_body(Matcher::Regex("alpha-style".to_string()))
        .with_status(200)
        .with_body("alpha video")
        .expect(1)
        .create_async()
        .await;
    let broken = server
        .mock("POST", "/")
        .match_body(Matcher::Regex("broken-style".to_string()))
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create_async()
        .await;
    let ok_gamma = server
        .mock("POST", "/")
        .match_body(Matcher::Regex("gamma-style".to_string()))
        .with_status(200)
        .with_body("gamma video")
        .expect(1)
        .create_async()
        .await;

    let test = setup_test_provider(server.url(), Some(TEST_KEY)).await;
    let request = test.batch(&["alpha-style", "broken-style", "gamma-style"], "landscape");
    let job = test.provider.submit(&request).unwrap();

    let output = match test.provider.poll(&job.handle, Some(&request)).await {
        TransformOutcome::Succeeded {
            output: TransformOutput::Batch(output),
        } => output,
        other => panic!("expected batch success, got {:?}", other),
    };

    assert_eq!(output.total_processed, 3);
    assert_eq!(output.success_count, 2);
    assert_eq!(output.failure_count, 1);
    assert_eq!(output.width, 1280);
    assert_eq!(output.height, 704);

    let rows: Vec<usize> = output.results.iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![1, 2, 3]);
    assert_eq!(
        output.results[1].outcome,
        BatchItemOutcome::Failure {
            reason: "API request failed: 500 - internal error".to_string()
        }
    );
    match &output.results[2].outcome {
        BatchItemOutcome::Success {
            output_name,
            location,
        } => {
            assert_eq!(output_name, "output_002.mp4");
            assert!(location.starts_with("/static/videos/batch_"));
        }
        other => panic!("expected success, got {:?}", other),
    }

    assert_eq!(
        file_names(&test.output_dir),
        vec!["output_001.mp4", "output_002.mp4"]
    );
    assert_eq!(
        std::fs::read(test.output_dir.join("output_002.mp4")).unwrap(),
        b"gamma video"
    );

    ok_alpha.assert_async().await;
    broken.assert_async().await;
    ok_gamma.assert_async().await;
}

#[tokio::test]
async fn test_batch_all_failed_is_still_succeeded() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let test = setup_test_provider(server.url(), Some(TEST_KEY)).await;
    let request = test.batch(&["one", "two"], "portrait");
    let job = test.provider.submit(&request).unwrap();

    match test.provider.poll(&job.handle, Some(&request)).await {
        TransformOutcome::Succeeded {
            output: TransformOutput::Batch(output),
        } => {
            assert!(output.all_failed());
            assert_eq!(output.failure_count, 2);
        }
        other => panic!("expected batch success, got {:?}", other),
    }
    assert!(file_names(&test.output_dir).is_empty());
}

#[tokio::test]
async fn test_batch_missing_source_fails_job() {
    let server = mockito::Server::new_async().await;
    let test = setup_test_provider(server.url(), Some(TEST_KEY)).await;
    let request = test.batch(&["one"], "landscape");
    let job = test.provider.submit(&request).unwrap();

    std::fs::remove_file(&test.source_path).unwrap();

    match test.provider.poll(&job.handle, Some(&request)).await {
        TransformOutcome::Failed { error } => {
            assert!(error.starts_with("Failed to read source video"), "{}", error)
        }
        other => panic!("expected failure, got {:?}", other),
    }
}
