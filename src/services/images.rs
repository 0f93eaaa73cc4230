//! Background keyframe image loading
//!
//! Thumbnails are fetched over HTTP, decoded off the event loop, and turned
//! into a terminal graphics protocol. Results come back over a channel keyed
//! by image URL; the App keeps the protocol states in a runtime map.

use image::imageops::FilterType;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::RetrievalClient;

const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

// Large keyframes are downscaled before protocol encoding; thumbnails never
// need more resolution than a terminal cell grid can show
const MAX_DECODE_WIDTH: u32 = 1600;
const MAX_DECODE_HEIGHT: u32 = 1000;

pub enum ImageState {
    Loading,
    Ready { protocol: StatefulProtocol },
    Failed { error: String },
}

impl std::fmt::Debug for ImageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageState::Loading => write!(f, "ImageState::Loading"),
            ImageState::Ready { .. } => f
                .debug_struct("ImageState::Ready")
                .field("protocol", &"<StatefulProtocol>")
                .finish(),
            ImageState::Failed { error } => f
                .debug_struct("ImageState::Failed")
                .field("error", error)
                .finish(),
        }
    }
}

/// Fetch and decode one image in the background; the result is sent as
/// `(url, state)` on the channel
pub fn spawn_image_fetch(
    client: RetrievalClient,
    url: String,
    picker: Picker,
    tx: mpsc::UnboundedSender<(String, ImageState)>,
) {
    tokio::spawn(async move {
        let state = load_image(&client, &url, picker).await;
        let _ = tx.send((url, state));
    });
}

async fn load_image(client: &RetrievalClient, url: &str, picker: Picker) -> ImageState {
    let bytes = match client.fetch_image(url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(url, error = %e, "image fetch failed");
            return ImageState::Failed {
                error: e.to_string(),
            };
        }
    };

    if bytes.len() > MAX_IMAGE_BYTES {
        return ImageState::Failed {
            error: "Image too large".to_string(),
        };
    }

    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await;

    let img = match decoded {
        Ok(Ok(img)) => img,
        Ok(Err(e)) => {
            return ImageState::Failed {
                error: format!("Decode error: {}", e),
            }
        }
        Err(e) => {
            return ImageState::Failed {
                error: format!("Task error: {}", e),
            }
        }
    };

    let img = if img.width() > MAX_DECODE_WIDTH || img.height() > MAX_DECODE_HEIGHT {
        img.resize(MAX_DECODE_WIDTH, MAX_DECODE_HEIGHT, FilterType::Triangle)
    } else {
        img
    };

    ImageState::Ready {
        protocol: picker.new_resize_protocol(img),
    }
}
