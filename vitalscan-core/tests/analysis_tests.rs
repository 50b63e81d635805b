//! HTTP behavior of the analysis client against a local one-shot responder

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use vitalscan_core::{AnalysisBackend, AnalysisClientConfig, Frame, HttpAnalysisClient, VitalScanError};

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Serve exactly one HTTP exchange: drain the request, send a canned reply.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if let Some(head_end) = find_subslice(&request, b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
    });

    format!("http://{addr}")
}

fn client_for(base_url: String) -> HttpAnalysisClient {
    HttpAnalysisClient::new(AnalysisClientConfig {
        base_url,
        request_timeout: Duration::from_secs(5),
        // Keep the pacing floor short; its timing semantics are covered by
        // the paced-clock unit tests in the analysis module.
        demo_pacing: Duration::from_millis(50),
    })
    .unwrap()
}

#[tokio::test]
async fn analyze_parses_a_success_response() {
    let base = serve_once(
        "200 OK",
        r#"{"success": true, "heart_rate": 74, "hrv": 41, "risk_level": "Low",
           "risk_score": 22, "recommendations": ["Stay active"],
           "waveform_data": [40.0, 60.0, 50.0]}"#,
    )
    .await;

    let frames = vec![Frame::new(vec![0xFF, 0xD8]), Frame::new(vec![0xFF, 0xD9])];
    let result = client_for(base).analyze(&frames).await.unwrap();

    assert!(result.success);
    assert_eq!(result.heart_rate, 74.0);
    assert_eq!(result.recommendations, vec!["Stay active".to_string()]);
}

#[tokio::test]
async fn analyze_maps_non_2xx_to_network_error() {
    let base = serve_once("500 Internal Server Error", "{}").await;

    let err = client_for(base)
        .analyze(&[Frame::new(vec![0xFF])])
        .await
        .unwrap_err();

    match err {
        VitalScanError::Network { reason } => assert!(reason.contains("500")),
        other => panic!("expected Network error, got {other:?}"),
    }
}

#[tokio::test]
async fn analyze_passes_server_reported_failure_through() {
    // `success: false` is an analysis outcome, not a transport error; the
    // renderer is the layer that surfaces it.
    let base = serve_once("200 OK", r#"{"success": false, "error": "no face detected"}"#).await;

    let result = client_for(base)
        .analyze(&[Frame::new(vec![0xFF])])
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("no face detected"));
}

#[tokio::test]
async fn analyze_rejects_malformed_bodies() {
    let base = serve_once("200 OK", "not json at all").await;

    let err = client_for(base)
        .analyze(&[Frame::new(vec![0xFF])])
        .await
        .unwrap_err();

    assert!(matches!(err, VitalScanError::Network { .. }));
}

#[tokio::test]
async fn demo_parses_a_response_without_a_success_field() {
    // The demo endpoint omits `success`; absence means success.
    let base = serve_once(
        "200 OK",
        r#"{"heart_rate": 70, "hrv": 33, "risk_level": "Moderate", "risk_score": 35,
           "recommendations": [], "waveform_data": [50.0, 55.0], "is_demo": true}"#,
    )
    .await;

    let started = tokio::time::Instant::now();
    let result = client_for(base).demo().await.unwrap();

    assert!(result.success);
    assert_eq!(result.risk_level, "Moderate");
    assert!(started.elapsed() >= Duration::from_millis(50));
}
