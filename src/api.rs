use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// One keyframe of a video as the backend lists it
#[derive(Debug, Clone, Deserialize)]
pub struct KeyframeRef {
    // older backend deployments name this field "frame"
    #[serde(alias = "frame")]
    pub keyframe_id: String,
    pub frame_index: u32,
}

/// Single-query search hit
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(alias = "video")]
    pub video_id: String,
    #[serde(alias = "frame")]
    pub keyframe_id: String,
    #[serde(alias = "keyframe_index")]
    pub frame_index: u32,
}

/// Keyframes matching one sub-query of a temporal search
#[derive(Debug, Clone, Deserialize)]
pub struct TemporalQueryHits {
    pub query: String,
    pub keyframes: Vec<KeyframeRef>,
}

/// Temporal search hit: one video with per-sub-query keyframes
#[derive(Debug, Clone, Deserialize)]
pub struct TemporalVideoHit {
    #[serde(alias = "video")]
    pub video_id: String,
    pub query_results: Vec<TemporalQueryHits>,
}

/// Per-video playback metadata
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub fps: f64,
    #[serde(default)]
    pub watch_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedSubmission {
    pub path: String,
}

#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct KeyframesResponse {
    keyframes: Vec<KeyframeRef>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Filter block of a search request
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchFilters {
    pub keyword: String,
    pub object: String,
    pub packs: Vec<String>,
    pub videos: Vec<String>,
    pub excluded_videos: Vec<String>,
    // the backend's wire name for the free-text filter
    #[serde(rename = "vietnamese_query")]
    pub free_text: String,
}

/// Search request payload
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub queries: Vec<String>,
    pub retriever: String,
    pub filters: SearchFilters,
    pub top_k_per_query: u32,
    pub top_k: u32,
}

#[derive(Clone)]
pub struct RetrievalClient {
    base_url: String,
    client: Client,
}

impl RetrievalClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check readiness; a non-2xx answer means the backend is still warming up
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach health endpoint")?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let health: HealthResponse = response.json().await.context("Failed to parse health")?;
        Ok(health.status == "ready")
    }

    async fn search_raw(&self, request: &SearchRequest) -> Result<reqwest::Response> {
        let url = format!("{}/api/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Search request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Search failed: {} - {}", status, text);
        }

        Ok(response)
    }

    /// Search with a single query; the caller decided the response shape
    /// by the number of non-empty queries it submits
    pub async fn search_single(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let response = self.search_raw(request).await?;
        let envelope: ResultsEnvelope<SearchHit> = response
            .json()
            .await
            .context("Failed to parse search results")?;
        Ok(envelope.results)
    }

    /// Search with multiple ordered sub-queries (temporal shape)
    pub async fn search_temporal(&self, request: &SearchRequest) -> Result<Vec<TemporalVideoHit>> {
        let response = self.search_raw(request).await?;
        let envelope: ResultsEnvelope<TemporalVideoHit> = response
            .json()
            .await
            .context("Failed to parse temporal search results")?;
        Ok(envelope.results)
    }

    pub async fn video_info(&self, video_id: &str) -> Result<VideoInfo> {
        let url = format!(
            "{}/api/video_info/{}",
            self.base_url,
            urlencoding::encode(video_id)
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch video info")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Video info failed: {} - {}", status, text);
        }

        response.json().await.context("Failed to parse video info")
    }

    pub async fn video_keyframes(&self, video_id: &str) -> Result<Vec<KeyframeRef>> {
        let url = format!(
            "{}/api/video_keyframes/{}",
            self.base_url,
            urlencoding::encode(video_id)
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch keyframes")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Keyframe list failed: {} - {}", status, text);
        }

        let data: KeyframesResponse = response
            .json()
            .await
            .context("Failed to parse keyframe list")?;
        Ok(data.keyframes)
    }

    pub async fn objects(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/objects", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch object tags")?;

        response.json().await.context("Failed to parse object tags")
    }

    pub async fn packs(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/packs", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch packs")?;

        response.json().await.context("Failed to parse packs")
    }

    pub async fn videos_in_packs(&self, packs: &[String]) -> Result<Vec<String>> {
        let url = format!("{}/api/videos_in_packs", self.base_url);

        #[derive(Serialize)]
        struct PacksRequest<'a> {
            packs: &'a [String],
        }

        let response = self
            .client
            .post(&url)
            .json(&PacksRequest { packs })
            .send()
            .await
            .context("Failed to fetch videos in packs")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Videos-in-packs failed: {} - {}", status, text);
        }

        response.json().await.context("Failed to parse video list")
    }

    /// Persist the submission buffer server-side under the given name
    pub async fn save_submission(&self, filename: &str, content: &str) -> Result<SavedSubmission> {
        let url = format!("{}/api/save_submission", self.base_url);

        #[derive(Serialize)]
        struct SaveRequest<'a> {
            filename: &'a str,
            content: &'a str,
        }

        let response = self
            .client
            .post(&url)
            .json(&SaveRequest { filename, content })
            .send()
            .await
            .context("Failed to save submission")?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Save failed: {} - {}", status, text);
        }

        response.json().await.context("Failed to parse save response")
    }

    /// Fetch raw image bytes (keyframe thumbnails)
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch image")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Image fetch failed: {}", status);
        }

        let bytes = response.bytes().await.context("Failed to read image body")?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = RetrievalClient::new("http://localhost:8000/".to_string());
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_keyframe_accepts_legacy_field_name() {
        let kf: KeyframeRef =
            serde_json::from_str(r#"{"frame": "0042", "frame_index": 1234}"#).unwrap();
        assert_eq!(kf.keyframe_id, "0042");
        assert_eq!(kf.frame_index, 1234);

        let kf: KeyframeRef =
            serde_json::from_str(r#"{"keyframe_id": "0042", "frame_index": 1234}"#).unwrap();
        assert_eq!(kf.keyframe_id, "0042");
    }

    #[test]
    fn test_search_hit_accepts_both_variants() {
        let hit: SearchHit = serde_json::from_str(
            r#"{"video_id": "L01_V001", "keyframe_id": "001", "keyframe_index": 50}"#,
        )
        .unwrap();
        assert_eq!(hit.frame_index, 50);

        let hit: SearchHit =
            serde_json::from_str(r#"{"video_id": "L01_V001", "frame": "001", "frame_index": 50}"#)
                .unwrap();
        assert_eq!(hit.keyframe_id, "001");
    }
}
