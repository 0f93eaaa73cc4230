//! API Response Handler
//!
//! Applies background service responses to app state. Search responses are
//! checked against the latest issued sequence first: a slow response from a
//! superseded request must never overwrite newer state.

use tracing::debug;

use crate::logic;
use crate::model::PlayerSource;
use crate::services::api::{ApiResponse, KeyframePurpose};
use crate::App;

pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::SearchSingle { seq, hits } => {
            if !app.model.results.accepts(seq) {
                debug!(seq, "discarding stale single-query response");
                return;
            }
            app.model.results.finish(seq);
            match hits {
                Ok(hits) => {
                    let cards = logic::results::single_cards(
                        hits,
                        app.client.base_url(),
                        &app.keyframe_base,
                    );
                    app.model.results.set_single(cards);
                }
                Err(e) => {
                    // failed search degrades to an empty result set
                    debug!(error = %e, "search failed");
                    app.model.results.clear();
                }
            }
            app.reset_result_selection();
        }

        ApiResponse::SearchTemporal { seq, hits } => {
            if !app.model.results.accepts(seq) {
                debug!(seq, "discarding stale temporal response");
                return;
            }
            app.model.results.finish(seq);
            match hits {
                Ok(hits) => {
                    let cards = logic::results::temporal_cards(
                        hits,
                        app.client.base_url(),
                        &app.keyframe_base,
                    );
                    app.model.results.set_temporal(cards);
                }
                Err(e) => {
                    debug!(error = %e, "temporal search failed");
                    app.model.results.clear();
                }
            }
            app.reset_result_selection();
        }

        ApiResponse::VideoInfoResult { video_id, info } => match info {
            Ok(info) => {
                if let Some(player) = app.model.modals.find_player_mut(&video_id) {
                    player.fps = Some(info.fps);
                    player.current_time =
                        logic::player::time_for_frame(player.start_frame, info.fps);
                    player.source = Some(match info.watch_url {
                        Some(url) => match logic::player::parse_watch_id(&url) {
                            Ok(id) => PlayerSource::Embed { watch_id: id },
                            Err(e) => PlayerSource::Failed {
                                error: e.to_string(),
                            },
                        },
                        None => PlayerSource::Native {
                            stream_url: player.video_url.clone(),
                        },
                    });
                    player.loading = false;
                }
                app.ensure_player_image();
            }
            Err(e) => {
                if let Some(player) = app.model.modals.find_player_mut(&video_id) {
                    player.loading = false;
                    player.source = Some(PlayerSource::Failed {
                        error: e.to_string(),
                    });
                }
                app.model.show_toast(format!("Error: {}", e));
            }
        },

        ApiResponse::VideoKeyframesResult {
            video_id,
            purpose: KeyframePurpose::Player,
            keyframes,
        } => match keyframes {
            Ok(keyframes) => {
                if let Some(player) = app.model.modals.find_player_mut(&video_id) {
                    player.keyframes = keyframes;
                }
                app.ensure_player_image();
            }
            Err(e) => {
                app.model.show_toast(format!("Error: {}", e));
            }
        },

        ApiResponse::VideoKeyframesResult {
            video_id,
            purpose: KeyframePurpose::Browser,
            keyframes,
        } => match keyframes {
            Ok(keyframes) => {
                if let Some(browser) = app.model.modals.find_browser_mut(&video_id) {
                    browser.keyframes = keyframes;
                    browser.loading = false;
                    browser.error = None;
                    browser.selected = 0;
                }
                app.ensure_browser_images();
            }
            Err(e) => {
                if let Some(browser) = app.model.modals.find_browser_mut(&video_id) {
                    browser.loading = false;
                    browser.error = Some(e.to_string());
                }
            }
        },

        ApiResponse::ObjectsResult { objects } => match objects {
            Ok(objects) => app.model.catalogs.objects = objects,
            Err(e) => debug!(error = %e, "object catalog fetch failed"),
        },

        ApiResponse::PacksResult { packs } => match packs {
            Ok(packs) => app.model.catalogs.packs = packs,
            Err(e) => debug!(error = %e, "pack catalog fetch failed"),
        },

        ApiResponse::VideosInPacksResult { packs, videos } => {
            // the selection may have changed while the request was in flight
            if packs != app.model.filters.packs {
                debug!("discarding videos-in-packs response for stale selection");
                return;
            }
            app.model.catalogs.videos_loading = false;
            match videos {
                Ok(videos) => app.model.catalogs.videos = videos,
                Err(e) => {
                    debug!(error = %e, "videos-in-packs fetch failed");
                    app.model.catalogs.videos.clear();
                }
            }
        }

        ApiResponse::SubmissionSaved { result } => match result {
            Ok(saved) => app.model.show_toast(format!("Saved to {}", saved.path)),
            Err(e) => app.model.show_toast(format!("Error: {}", e)),
        },

        ApiResponse::HealthResult { ready } => {
            app.model.ui.backend_ready = Some(ready);
        }
    }
}
