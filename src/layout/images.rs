use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::RecipeError;

/// Intrinsic size of a loaded image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Final state of one card image
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageLoad {
    /// Loaded; dimensions are known only when the loader could read them
    Loaded(Option<Dimensions>),
    Failed,
    /// The card has no image
    Absent,
}

/// Something that can tell when an image has finished loading
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, src: &str) -> ImageLoad;
}

/// Loads images over HTTP; any 2xx response counts as loaded and the body is
/// sniffed for its intrinsic size
pub struct HttpImageLoader {
    client: Client,
}

impl HttpImageLoader {
    pub fn new() -> Result<Self, RecipeError> {
        let client = Client::builder()
            .user_agent(concat!("recipe-cards/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, src: &str) -> ImageLoad {
        match self.client.get(src).send().await {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(body) => {
                    let dimensions = measure(&body);
                    debug!("Loaded image {} ({:?})", src, dimensions);
                    ImageLoad::Loaded(dimensions)
                }
                Err(e) => {
                    debug!("Image {} body failed: {}", src, e);
                    ImageLoad::Failed
                }
            },
            Ok(response) => {
                debug!("Image {} returned {}", src, response.status());
                ImageLoad::Failed
            }
            Err(e) => {
                debug!("Image {} failed: {}", src, e);
                ImageLoad::Failed
            }
        }
    }
}

/// Width and height from the image header; `None` for unreadable formats
fn measure(body: &[u8]) -> Option<Dimensions> {
    match imagesize::blob_size(body) {
        Ok(size) => Some(Dimensions {
            width: u32::try_from(size.width).ok()?,
            height: u32::try_from(size.height).ok()?,
        }),
        Err(e) => {
            debug!("Could not read image size: {}", e);
            None
        }
    }
}

/// Wait until every image has loaded or failed.
///
/// Loads run concurrently; the result keeps the order of `sources`.
pub async fn wait_all(loader: Arc<dyn ImageLoader>, sources: &[Option<String>]) -> Vec<ImageLoad> {
    let mut results: Vec<ImageLoad> = sources
        .iter()
        .map(|src| {
            if src.is_some() {
                ImageLoad::Failed
            } else {
                ImageLoad::Absent
            }
        })
        .collect();

    let mut pending = JoinSet::new();
    for (index, src) in sources.iter().enumerate() {
        if let Some(src) = src.clone() {
            let loader = Arc::clone(&loader);
            pending.spawn(async move { (index, loader.load(&src).await) });
        }
    }

    while let Some(joined) = pending.join_next().await {
        match joined {
            Ok((index, load)) => results[index] = load,
            Err(e) => warn!("Image load task failed: {}", e),
        }
    }

    results
}
