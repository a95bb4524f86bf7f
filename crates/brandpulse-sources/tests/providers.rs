//! Integration tests for the source providers using wiremock HTTP mocks.

use std::sync::Arc;
use std::time::Duration;

use brandpulse_core::Source;
use brandpulse_sources::{
    fetch_all, ForumProvider, NewsProvider, SocialProvider, SourceProvider, TechNewsProvider,
    VideoProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UA: &str = "brandpulse-tests/0.1";

#[tokio::test]
async fn forum_provider_parses_search_listing() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": {
            "children": [
                {
                    "data": {
                        "title": "Acme is great",
                        "selftext": "been using it for a year",
                        "author": "happy_user",
                        "created_utc": 1_750_000_000.0,
                        "permalink": "/r/gadgets/comments/1/acme/",
                        "score": 12,
                        "num_comments": 4
                    }
                },
                {
                    // Missing created_utc: must be dropped.
                    "data": {
                        "title": "Half a record",
                        "permalink": "/r/gadgets/comments/2/broken/"
                    }
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "Acme"))
        .and(query_param("sort", "new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = ForumProvider::with_base_url(reqwest::Client::new(), UA, &server.uri());
    let mentions = provider.fetch("Acme").await.expect("fetch should succeed");

    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].source, Source::Forum);
    assert_eq!(mentions[0].text, "Acme is great - been using it for a year");
    assert_eq!(mentions[0].engagement, 16);
    assert_eq!(
        mentions[0].url,
        "https://reddit.com/r/gadgets/comments/1/acme/"
    );
}

#[tokio::test]
async fn forum_provider_errors_on_server_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = ForumProvider::with_base_url(reqwest::Client::new(), UA, &server.uri());
    assert!(provider.fetch("Acme").await.is_err());
}

#[tokio::test]
async fn tech_news_provider_parses_hits() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "hits": [
            {
                "title": "Acme ships a rewrite",
                "author": "builder",
                "created_at": "2025-06-01T12:00:00Z",
                "url": null,
                "objectID": "99001",
                "points": 250,
                "num_comments": 140
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "Acme"))
        .and(query_param("tags", "story"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = TechNewsProvider::with_base_url(reqwest::Client::new(), &server.uri());
    let mentions = provider.fetch("Acme").await.expect("fetch should succeed");

    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].engagement, 390);
    assert_eq!(
        mentions[0].url,
        "https://news.ycombinator.com/item?id=99001"
    );
}

#[tokio::test]
async fn news_provider_requires_api_key() {
    let provider = NewsProvider::new(reqwest::Client::new(), None);
    assert!(provider.fetch("Acme").await.is_err());
}

#[tokio::test]
async fn news_provider_parses_articles_and_caps_at_ten() {
    let server = MockServer::start().await;

    let article = serde_json::json!({
        "title": "Acme in the news",
        "description": "Coverage",
        "author": "Jo Reporter",
        "publishedAt": "2025-06-02T09:00:00Z",
        "url": "https://news.example/acme",
        "source": { "name": "Example News" }
    });
    let mut articles: Vec<serde_json::Value> = Vec::new();
    for i in 0..15 {
        let mut a = article.clone();
        a["url"] = serde_json::json!(format!("https://news.example/acme/{i}"));
        articles.push(a);
    }

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "Acme"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "articles": articles })),
        )
        .mount(&server)
        .await;

    let provider = NewsProvider::with_base_url(
        reqwest::Client::new(),
        Some("test-key".to_string()),
        &server.uri(),
    );
    let mentions = provider.fetch("Acme").await.expect("fetch should succeed");
    assert_eq!(mentions.len(), 10);
}

#[tokio::test]
async fn video_provider_parses_items() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "id": { "videoId": "abc123" },
                "snippet": {
                    "title": "Acme teardown",
                    "description": "What is inside",
                    "publishedAt": "2025-05-20T16:45:00Z",
                    "channelTitle": "Teardowns"
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("q", "Acme"))
        .and(query_param("key", "video-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = VideoProvider::with_base_url(
        reqwest::Client::new(),
        Some("video-key".to_string()),
        &server.uri(),
    );
    let mentions = provider.fetch("Acme").await.expect("fetch should succeed");

    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].url, "https://youtube.com/watch?v=abc123");
}

#[tokio::test]
async fn social_provider_falls_through_to_working_instance() {
    let dead = MockServer::start().await;
    let live = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&dead)
        .await;

    let html = r#"<div class="timeline-item">
        <a class="username">@observer</a>
        <div class="tweet-content">Trying out Acme today</div>
    </div>"#;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&live)
        .await;

    let provider = SocialProvider::with_instances(
        reqwest::Client::new(),
        UA,
        vec![dead.uri(), live.uri()],
    );
    let mentions = provider.fetch("Acme").await.expect("second instance works");

    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].author, "@observer");
}

#[tokio::test]
async fn social_provider_errors_when_every_instance_fails() {
    let dead = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&dead)
        .await;

    let provider =
        SocialProvider::with_instances(reqwest::Client::new(), UA, vec![dead.uri()]);
    assert!(provider.fetch("Acme").await.is_err());
}

#[tokio::test]
async fn fan_out_mixes_live_and_failing_providers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hits": [
                {
                    "title": "Acme story",
                    "created_at": "2025-06-01T12:00:00Z",
                    "url": "https://blog.example/acme",
                    "objectID": "1",
                    "points": 1,
                    "num_comments": 0
                }
            ]
        })))
        .mount(&server)
        .await;

    let providers: Vec<Arc<dyn SourceProvider>> = vec![
        Arc::new(TechNewsProvider::with_base_url(
            reqwest::Client::new(),
            &server.uri(),
        )),
        // No API key configured: must degrade to an empty batch.
        Arc::new(NewsProvider::new(reqwest::Client::new(), None)),
    ];

    let batches = fetch_all(&providers, "Acme", Duration::from_secs(10)).await;
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].source, Source::TechNews);
    assert_eq!(batches[0].mentions.len(), 1);
    assert_eq!(batches[1].source, Source::News);
    assert!(batches[1].mentions.is_empty());
}
