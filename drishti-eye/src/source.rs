//! Camera source adapters
//!
//! Polymorphic frame acquisition over backend variants: one HTTP endpoint
//! serving color/depth/combined payloads, two HTTP endpoints (one per
//! modality), local files, or a fixed in-memory frame. Network variants own
//! a pooled HTTP client per source; every acquisition is one awaited fetch,
//! so dropping the `next()` future cancels the request in flight.

use crate::codec::{decode_both, decode_color, decode_depth};
use crate::config::{DualStreamConfig, FileConfig, SingleStreamConfig, StreamKind};
use crate::error::CameraError;
use crate::frame::FramePair;
use async_trait::async_trait;
use tracing::debug;

/// Handle returned alongside each frame. Releasing is currently a no-op;
/// the handle reserves a place for pooled frame buffers.
#[derive(Debug)]
pub struct ReleaseGuard;

impl ReleaseGuard {
    pub fn release(self) {}
}

/// A lazy sequence of calibrated frame pairs, uniform across backends.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Acquire the next frame. Blocking I/O happens here; the returned
    /// future is cancel-safe, so callers abort acquisition by dropping it.
    async fn next(&self) -> Result<(FramePair, ReleaseGuard), CameraError>;

    /// True only when color and depth grids are guaranteed to share pixel
    /// correspondence without a warp step.
    fn is_aligned(&self) -> bool {
        false
    }

    /// Release pooled connections. Idempotent, never blocks. The pooled
    /// HTTP client drops its idle connections when the source is dropped;
    /// callers that want an explicit release point call this first.
    fn close(&self) {}
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, CameraError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CameraError::transport(url, e))?
        .error_for_status()
        .map_err(|e| CameraError::transport(url, e))?;
    let body = response
        .bytes()
        .await
        .map_err(|e| CameraError::transport(url, e))?;
    debug!(url, bytes = body.len(), "fetched frame payload");
    Ok(body.to_vec())
}

/// Streams color/depth/combined data from one external endpoint.
pub struct ServerSource {
    client: reqwest::Client,
    url: String,
    stream: StreamKind,
    aligned: bool,
}

impl ServerSource {
    /// An unknown stream kind in the config is fatal here, before the
    /// source is ever polled.
    pub fn new(config: &SingleStreamConfig) -> Result<Self, CameraError> {
        let stream = config.stream_kind()?;
        Ok(Self {
            client: reqwest::Client::new(),
            url: config.url(),
            stream,
            aligned: config.aligned,
        })
    }
}

#[async_trait]
impl FrameSource for ServerSource {
    async fn next(&self) -> Result<(FramePair, ReleaseGuard), CameraError> {
        let data = fetch_bytes(&self.client, &self.url).await?;
        let pair = match self.stream {
            StreamKind::Color => FramePair::color_only(decode_color(&data)?),
            StreamKind::Depth => FramePair::from_depth(decode_depth(&data)?),
            StreamKind::Both => decode_both(&data, self.aligned)?,
        };
        Ok((pair, ReleaseGuard))
    }

    fn is_aligned(&self) -> bool {
        match self.stream {
            StreamKind::Color => false,
            // The grayscale preview is synthesized from the depth grid, so
            // the pair is aligned by construction.
            StreamKind::Depth => true,
            StreamKind::Both => self.aligned,
        }
    }
}

/// Fetches color and depth from two separate endpoints and pairs them.
pub struct DualServerSource {
    client: reqwest::Client,
    color_url: String,
    depth_url: String,
    aligned: bool,
}

impl DualServerSource {
    pub fn new(config: &DualStreamConfig) -> Result<Self, CameraError> {
        config.validate()?;
        Ok(Self {
            client: reqwest::Client::new(),
            color_url: config.color_url.clone(),
            depth_url: config.depth_url.clone(),
            aligned: config.aligned,
        })
    }
}

#[async_trait]
impl FrameSource for DualServerSource {
    /// Either leg failing fails the whole acquisition; a pair is only built
    /// once both payloads have decoded.
    async fn next(&self) -> Result<(FramePair, ReleaseGuard), CameraError> {
        let color_data = fetch_bytes(&self.client, &self.color_url).await?;
        let color = decode_color(&color_data)?;

        let depth_data = fetch_bytes(&self.client, &self.depth_url).await?;
        let depth = decode_depth(&depth_data)?;

        let pair = FramePair::new(Some(color), Some(depth), self.aligned)?;
        Ok((pair, ReleaseGuard))
    }

    fn is_aligned(&self) -> bool {
        self.aligned
    }
}

/// Reads a color and a depth file on every acquisition. The sequence is
/// finite but restartable: each `next` re-reads the same files.
pub struct FileSource {
    color_path: std::path::PathBuf,
    depth_path: std::path::PathBuf,
    aligned: bool,
}

impl FileSource {
    pub fn new(config: &FileConfig) -> Result<Self, CameraError> {
        config.validate()?;
        Ok(Self {
            color_path: config.color.clone(),
            depth_path: config.depth.clone(),
            aligned: config.aligned,
        })
    }
}

#[async_trait]
impl FrameSource for FileSource {
    async fn next(&self) -> Result<(FramePair, ReleaseGuard), CameraError> {
        let color_data = tokio::fs::read(&self.color_path).await?;
        let color = decode_color(&color_data)?;
        let depth_data = tokio::fs::read(&self.depth_path).await?;
        let depth = decode_depth(&depth_data)?;
        let pair = FramePair::new(Some(color), Some(depth), self.aligned)?;
        Ok((pair, ReleaseGuard))
    }

    fn is_aligned(&self) -> bool {
        self.aligned
    }
}

/// Wraps one pre-decoded frame as a constant sequence.
pub struct StaticSource {
    pair: FramePair,
}

impl StaticSource {
    pub fn new(pair: FramePair) -> Self {
        Self { pair }
    }
}

#[async_trait]
impl FrameSource for StaticSource {
    async fn next(&self) -> Result<(FramePair, ReleaseGuard), CameraError> {
        Ok((self.pair.clone(), ReleaseGuard))
    }

    fn is_aligned(&self) -> bool {
        self.pair.aligned
    }
}
