use std::collections::{HashSet, VecDeque};

use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::debug;

use crate::api::{
    KeyframeRef, RetrievalClient, SavedSubmission, SearchHit, SearchRequest, TemporalVideoHit,
    VideoInfo,
};

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,   // user-initiated actions (search, playback metadata, save)
    Medium, // overlay content (keyframe browser)
    Low,    // catalogs, health probe
}

/// Why a keyframe list was requested; responses route differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyframePurpose {
    Browser,
    Player,
}

/// Unique identifier for tracking in-flight requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RequestKey {
    Search { seq: u64 },
    VideoInfo { video_id: String },
    VideoKeyframes { video_id: String, purpose: KeyframePurpose },
    Objects,
    Packs,
    VideosInPacks,
    SaveSubmission { seq: u64 },
    Health,
}

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Search; `seq` is the monotonic sequence used to discard stale
    /// responses, `temporal` selects the response shape
    Search {
        seq: u64,
        temporal: bool,
        body: SearchRequest,
    },

    /// Per-video playback metadata (fps, optional external watch URL)
    GetVideoInfo { video_id: String },

    /// Full ordered keyframe list for one video
    GetVideoKeyframes {
        video_id: String,
        purpose: KeyframePurpose,
    },

    /// Object tag catalog
    GetObjects,

    /// Pack catalog
    GetPacks,

    /// Videos contained in the given packs
    GetVideosInPacks { packs: Vec<String> },

    /// Persist the submission buffer server-side
    SaveSubmission { filename: String, content: String },

    /// Backend readiness probe
    GetHealth,
}

impl ApiRequest {
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::Search { .. } => Priority::High,
            ApiRequest::GetVideoInfo { .. } => Priority::High,
            ApiRequest::SaveSubmission { .. } => Priority::High,
            ApiRequest::GetVideoKeyframes {
                purpose: KeyframePurpose::Player,
                ..
            } => Priority::High,
            ApiRequest::GetVideoKeyframes { .. } => Priority::Medium,
            ApiRequest::GetVideosInPacks { .. } => Priority::Medium,
            ApiRequest::GetObjects | ApiRequest::GetPacks | ApiRequest::GetHealth => Priority::Low,
        }
    }

    fn key(&self, save_counter: u64) -> RequestKey {
        match self {
            ApiRequest::Search { seq, .. } => RequestKey::Search { seq: *seq },
            ApiRequest::GetVideoInfo { video_id } => RequestKey::VideoInfo {
                video_id: video_id.clone(),
            },
            ApiRequest::GetVideoKeyframes { video_id, purpose } => RequestKey::VideoKeyframes {
                video_id: video_id.clone(),
                purpose: *purpose,
            },
            ApiRequest::GetObjects => RequestKey::Objects,
            ApiRequest::GetPacks => RequestKey::Packs,
            ApiRequest::GetVideosInPacks { .. } => RequestKey::VideosInPacks,
            ApiRequest::SaveSubmission { .. } => RequestKey::SaveSubmission { seq: save_counter },
            ApiRequest::GetHealth => RequestKey::Health,
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    SearchSingle {
        seq: u64,
        hits: Result<Vec<SearchHit>, anyhow::Error>,
    },

    SearchTemporal {
        seq: u64,
        hits: Result<Vec<TemporalVideoHit>, anyhow::Error>,
    },

    VideoInfoResult {
        video_id: String,
        info: Result<VideoInfo, anyhow::Error>,
    },

    VideoKeyframesResult {
        video_id: String,
        purpose: KeyframePurpose,
        keyframes: Result<Vec<KeyframeRef>, anyhow::Error>,
    },

    ObjectsResult {
        objects: Result<Vec<String>, anyhow::Error>,
    },

    PacksResult {
        packs: Result<Vec<String>, anyhow::Error>,
    },

    VideosInPacksResult {
        packs: Vec<String>,
        videos: Result<Vec<String>, anyhow::Error>,
    },

    SubmissionSaved {
        result: Result<SavedSubmission, anyhow::Error>,
    },

    HealthResult {
        ready: bool,
    },
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestKey),
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: RetrievalClient,
    request_queue: VecDeque<(ApiRequest, Priority)>,
    in_flight: HashSet<RequestKey>,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
    save_counter: u64,
}

impl ApiService {
    pub fn new(
        client: RetrievalClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            response_tx,
            completion_tx,
            max_concurrent: 8,
            save_counter: 0,
        }
    }

    /// Insert based on priority, high priority at the front
    fn enqueue(&mut self, request: ApiRequest) {
        let priority = request.priority();
        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, p)| *p > priority)
            .unwrap_or(self.request_queue.len());
        self.request_queue.insert(insert_pos, (request, priority));
    }

    async fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return; // at capacity, wait for some to complete
        }

        let Some((request, _)) = self.request_queue.pop_front() else {
            return;
        };

        self.save_counter += 1;
        let key = request.key(self.save_counter);
        self.in_flight.insert(key.clone());

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let response = Self::execute_request(&client, request).await;
            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed(key));
        });
    }

    async fn execute_request(client: &RetrievalClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::Search {
                seq,
                temporal,
                body,
            } => {
                if temporal {
                    let hits = client.search_temporal(&body).await;
                    ApiResponse::SearchTemporal { seq, hits }
                } else {
                    let hits = client.search_single(&body).await;
                    ApiResponse::SearchSingle { seq, hits }
                }
            }

            ApiRequest::GetVideoInfo { video_id } => {
                let info = client.video_info(&video_id).await;
                ApiResponse::VideoInfoResult { video_id, info }
            }

            ApiRequest::GetVideoKeyframes { video_id, purpose } => {
                let keyframes = client.video_keyframes(&video_id).await;
                ApiResponse::VideoKeyframesResult {
                    video_id,
                    purpose,
                    keyframes,
                }
            }

            ApiRequest::GetObjects => ApiResponse::ObjectsResult {
                objects: client.objects().await,
            },

            ApiRequest::GetPacks => ApiResponse::PacksResult {
                packs: client.packs().await,
            },

            ApiRequest::GetVideosInPacks { packs } => {
                let videos = client.videos_in_packs(&packs).await;
                ApiResponse::VideosInPacksResult { packs, videos }
            }

            ApiRequest::SaveSubmission { filename, content } => ApiResponse::SubmissionSaved {
                result: client.save_submission(&filename, &content).await,
            },

            ApiRequest::GetHealth => ApiResponse::HealthResult {
                ready: client.health().await.unwrap_or(false),
            },
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: RetrievalClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                Some(request) = request_rx.recv() => {
                    service.enqueue(request);
                }

                Some(InternalMessage::Completed(key)) = completion_rx.recv() => {
                    service.in_flight.remove(&key);
                    if !service.in_flight.is_empty() {
                        debug!(in_flight = service.in_flight.len(), "request completed");
                    }
                }

                _ = tick.tick() => {
                    // drain a few queue slots per tick
                    for _ in 0..5 {
                        if service.request_queue.is_empty() {
                            break;
                        }
                        service.process_next().await;
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_search_outranks_catalogs() {
        let search = ApiRequest::Search {
            seq: 1,
            temporal: false,
            body: SearchRequest {
                queries: vec![],
                retriever: "clip".to_string(),
                filters: Default::default(),
                top_k_per_query: 10,
                top_k: 100,
            },
        };
        assert!(search.priority() < ApiRequest::GetObjects.priority());
    }
}
