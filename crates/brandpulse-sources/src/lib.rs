//! Source providers and fan-out orchestration for BrandPulse.
//!
//! Each provider searches one platform for mentions of a brand and returns
//! validated [`RawMention`](brandpulse_core::RawMention) records. Provider
//! failures never cross the fan-out boundary: the orchestrator converts
//! errors and timeouts into empty batches so one misbehaving platform cannot
//! abort a collection pass.

mod error;
mod forum;
mod news;
mod orchestrator;
mod provider;
mod social;
mod tech_news;
mod video;

use std::sync::Arc;

use brandpulse_core::AppConfig;

pub use error::SourceError;
pub use forum::ForumProvider;
pub use news::NewsProvider;
pub use orchestrator::{fetch_all, SourceBatch};
pub use provider::SourceProvider;
pub use social::SocialProvider;
pub use tech_news::TechNewsProvider;
pub use video::VideoProvider;

/// All five providers, in the invocation order used for monitor-start.
#[must_use]
pub fn full_provider_set(
    client: &reqwest::Client,
    config: &AppConfig,
) -> Vec<Arc<dyn SourceProvider>> {
    vec![
        Arc::new(ForumProvider::new(client.clone(), &config.user_agent)),
        Arc::new(TechNewsProvider::new(client.clone())),
        Arc::new(NewsProvider::new(client.clone(), config.news_api_key.clone())),
        Arc::new(VideoProvider::new(client.clone(), config.video_api_key.clone())),
        Arc::new(SocialProvider::new(client.clone(), &config.user_agent)),
    ]
}

/// The two cheapest providers, used by the periodic refresh.
///
/// Deliberate load shedding: the news and video APIs are rate limited and
/// the social scrape is best effort, so only forum and tech-news search are
/// re-polled every cycle.
#[must_use]
pub fn refresh_provider_set(
    client: &reqwest::Client,
    config: &AppConfig,
) -> Vec<Arc<dyn SourceProvider>> {
    vec![
        Arc::new(ForumProvider::new(client.clone(), &config.user_agent)),
        Arc::new(TechNewsProvider::new(client.clone())),
    ]
}
