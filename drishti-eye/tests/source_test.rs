//! Integration tests for the camera source adapters, against a local HTTP
//! frame server and temp files.

use axum::{http::StatusCode, routing::get, Router};
use drishti_eye::codec::encode_depth;
use drishti_eye::config::{DualStreamConfig, FileConfig, SingleStreamConfig};
use drishti_eye::error::CameraError;
use drishti_eye::frame::DepthMap;
use drishti_eye::source::{DualServerSource, FileSource, FrameSource, ServerSource};
use std::io::Cursor;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageOutputFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn depth_bytes() -> Vec<u8> {
    encode_depth(&DepthMap::new(2, 2, vec![100, 200, 300, 400]).unwrap())
}

fn both_bytes() -> Vec<u8> {
    let color = png_bytes();
    let mut out = Vec::new();
    out.extend_from_slice(&(color.len() as u64).to_be_bytes());
    out.extend_from_slice(&color);
    out.extend_from_slice(&depth_bytes());
    out
}

/// Serve the router on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("{}", addr)
}

fn single_config(addr: &str, path: &str, stream: &str, aligned: bool) -> SingleStreamConfig {
    let (host, port) = addr.rsplit_once(':').unwrap();
    SingleStreamConfig {
        host: host.to_string(),
        port: port.parse().unwrap(),
        path: path.to_string(),
        stream: stream.to_string(),
        aligned,
        calibration: None,
    }
}

#[tokio::test]
async fn test_single_stream_color() {
    let addr = serve(Router::new().route("/color", get(|| async { png_bytes() }))).await;
    let source = ServerSource::new(&single_config(&addr, "color", "color", false)).unwrap();
    assert!(!source.is_aligned());
    let (pair, _release) = source.next().await.unwrap();
    assert!(pair.depth.is_none());
    assert_eq!(pair.color.unwrap().pixel(0, 0), [1, 2, 3]);
}

#[tokio::test]
async fn test_single_stream_depth_synthesizes_preview() {
    let addr = serve(Router::new().route("/depth", get(|| async { depth_bytes() }))).await;
    let source = ServerSource::new(&single_config(&addr, "depth", "depth", false)).unwrap();
    assert!(source.is_aligned());
    let (pair, _release) = source.next().await.unwrap();
    assert!(pair.aligned);
    assert_eq!(pair.depth.unwrap().get(1, 1), 400);
    assert!(pair.color.is_some());
}

#[tokio::test]
async fn test_single_stream_both() {
    let addr = serve(Router::new().route("/both", get(|| async { both_bytes() }))).await;
    let source = ServerSource::new(&single_config(&addr, "both", "both", true)).unwrap();
    let (pair, _release) = source.next().await.unwrap();
    assert!(pair.aligned);
    assert!(pair.color.is_some());
    assert!(pair.depth.is_some());
}

#[tokio::test]
async fn test_single_stream_wraps_failing_url() {
    let addr = serve(Router::new()).await;
    let source = ServerSource::new(&single_config(&addr, "gone", "color", false)).unwrap();
    let err = source.next().await.unwrap_err();
    match err {
        CameraError::Transport { url, .. } => assert!(url.contains("/gone")),
        other => panic!("expected transport error, got {other}"),
    }
}

#[tokio::test]
async fn test_dual_stream_pairs_both_legs() {
    let addr = serve(
        Router::new()
            .route("/color", get(|| async { png_bytes() }))
            .route("/depth", get(|| async { depth_bytes() })),
    )
    .await;
    let source = DualServerSource::new(&DualStreamConfig {
        color_url: format!("http://{addr}/color"),
        depth_url: format!("http://{addr}/depth"),
        aligned: true,
        calibration: None,
    })
    .unwrap();
    assert!(source.is_aligned());
    let (pair, _release) = source.next().await.unwrap();
    assert_eq!(pair.color.unwrap().pixel(1, 1), [1, 2, 3]);
    assert_eq!(pair.depth.unwrap().get(0, 0), 100);
}

#[tokio::test]
async fn test_dual_stream_depth_leg_failure_yields_no_pair() {
    // The color leg succeeds, then the depth leg fails: the call must
    // surface a single error naming the depth endpoint, with no partial
    // frame observable.
    let addr = serve(
        Router::new()
            .route("/color", get(|| async { png_bytes() }))
            .route("/depth", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
    )
    .await;
    let source = DualServerSource::new(&DualStreamConfig {
        color_url: format!("http://{addr}/color"),
        depth_url: format!("http://{addr}/depth"),
        aligned: true,
        calibration: None,
    })
    .unwrap();
    let err = source.next().await.unwrap_err();
    match err {
        CameraError::Transport { url, .. } => assert!(url.contains("/depth")),
        other => panic!("expected transport error for depth leg, got {other}"),
    }
}

#[tokio::test]
async fn test_file_source_is_restartable() {
    let dir = tempfile::tempdir().unwrap();
    let color_path = dir.path().join("color.png");
    let depth_path = dir.path().join("depth.bin");
    std::fs::write(&color_path, png_bytes()).unwrap();
    std::fs::write(&depth_path, depth_bytes()).unwrap();

    let source = FileSource::new(&FileConfig {
        color: color_path,
        depth: depth_path,
        aligned: true,
        calibration: None,
    })
    .unwrap();

    // Finite but restartable: every call re-reads the same files.
    for _ in 0..2 {
        let (pair, _release) = source.next().await.unwrap();
        assert!(pair.aligned);
        assert_eq!(pair.depth.unwrap().get(1, 0), 200);
    }
}

#[tokio::test]
async fn test_file_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(&FileConfig {
        color: dir.path().join("missing.png"),
        depth: dir.path().join("missing.bin"),
        aligned: false,
        calibration: None,
    })
    .unwrap();
    assert!(matches!(
        source.next().await,
        Err(CameraError::Io(_))
    ));
}
