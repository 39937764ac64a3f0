use std::sync::{Mutex, Once};
use std::time::Duration;

use doodles_engine::{
    run_submission, Delay, FetchSettings, IndexNowConfig, PipelineError, ReqwestFetcher,
    ReqwestSubmitter, RetryPolicy, SubmissionEngine, SubmitError, UrlSource,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(doodles_logging::initialize_for_tests);
}

#[derive(Default)]
struct RecordingDelay {
    waits: Mutex<Vec<Duration>>,
}

#[async_trait::async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

fn config_for(server: &MockServer) -> IndexNowConfig {
    IndexNowConfig {
        sitemap_url: format!("{}/sitemap.xml", server.uri()),
        endpoint: format!("{}/indexnow", server.uri()),
        retry: RetryPolicy::new(3, Duration::from_millis(7500)),
        ..IndexNowConfig::default()
    }
}

struct Harness {
    fetcher: ReqwestFetcher,
    submitter: ReqwestSubmitter,
    delay: RecordingDelay,
}

impl Harness {
    fn new() -> Self {
        Self {
            fetcher: ReqwestFetcher::new(FetchSettings::default()),
            submitter: ReqwestSubmitter::new(&FetchSettings::default()).unwrap(),
            delay: RecordingDelay::default(),
        }
    }

    async fn run(
        &self,
        config: &IndexNowConfig,
        args: &[&str],
    ) -> Result<doodles_engine::SubmissionReport, PipelineError> {
        run_submission(config, args, &self.fetcher, &self.submitter, &self.delay).await
    }

    fn waits(&self) -> Vec<Duration> {
        self.delay.waits.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn cli_url_skips_sitemap_and_submits_exactly_that_url() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .and(body_json(serde_json::json!({
            "host": "www.sonnydoodles.com",
            "key": "54bb180f2d54c9f46767bd867f4f6565",
            "keyLocation": "https://www.sonnydoodles.com/54bb180f2d54c9f46767bd867f4f6565.txt",
            "urlList": ["https://www.sonnydoodles.com/products"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new();
    let report = harness
        .run(&config_for(&server), &["https://www.sonnydoodles.com/products"])
        .await
        .expect("submission accepted");

    assert_eq!(report.source, UrlSource::Cli);
    assert_eq!(
        report.urls,
        vec!["https://www.sonnydoodles.com/products".to_string()]
    );
    assert_eq!(report.host_mismatches, 0);
    assert_eq!(report.response.status, 200);
}

#[tokio::test]
async fn sitemap_entries_are_filtered_to_web_schemes() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://www.sonnydoodles.com/</loc></url>
  <url><loc>https://www.sonnydoodles.com/products</loc></url>
  <url><loc>ftp://www.sonnydoodles.com/archive</loc></url>
</urlset>"#,
            "application/xml",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new();
    let report = harness
        .run(&config_for(&server), &[])
        .await
        .expect("submission accepted");

    assert_eq!(report.source, UrlSource::Sitemap);
    assert_eq!(
        report.urls,
        vec![
            "https://www.sonnydoodles.com/".to_string(),
            "https://www.sonnydoodles.com/products".to_string(),
        ]
    );

    let requests = server.received_requests().await.unwrap();
    let submitted = requests
        .iter()
        .find(|request| request.method.as_str() == "POST")
        .expect("submission request");
    let body: serde_json::Value = serde_json::from_slice(&submitted.body).unwrap();
    assert_eq!(body["urlList"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_cli_urls_fall_back_to_sitemap() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<loc>https://www.sonnydoodles.com/faq</loc>"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let harness = Harness::new();
    let report = harness
        .run(&config_for(&server), &["not a url", "   "])
        .await
        .unwrap();

    assert_eq!(report.source, UrlSource::Sitemap);
    assert_eq!(report.urls, vec!["https://www.sonnydoodles.com/faq".to_string()]);
}

#[tokio::test]
async fn empty_sitemap_is_fatal_and_nothing_is_submitted() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<urlset></urlset>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let harness = Harness::new();
    let err = harness.run(&config_for(&server), &[]).await.unwrap_err();

    assert!(matches!(err, PipelineError::NoUrls));
    assert_eq!(err.to_string(), "No URLs found to submit.");
}

#[tokio::test]
async fn sitemap_exhaustion_reports_url_and_attempts() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let harness = Harness::new();
    let err = harness.run(&config, &[]).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("Failed to fetch {} after 3 attempts", config.sitemap_url)
    );
    assert!(matches!(
        err,
        PipelineError::SitemapUnavailable { attempts: 3, .. }
    ));
    assert_eq!(harness.waits(), vec![Duration::from_millis(7500); 2]);
}

#[tokio::test]
async fn foreign_hosts_warn_but_are_still_submitted() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new();
    let report = harness
        .run(
            &config_for(&server),
            &[
                "https://www.sonnydoodles.com/",
                "https://shop.example.com/dog-food",
            ],
        )
        .await
        .unwrap();

    assert_eq!(report.urls.len(), 2);
    assert_eq!(report.host_mismatches, 1);
    assert_eq!(report.response.body, "accepted");
}

#[tokio::test]
async fn submission_rejection_propagates() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Unprocessable Entity"))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new();
    let err = harness
        .run(&config_for(&server), &["https://www.sonnydoodles.com/"])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Submit(SubmitError::Rejected { status: 422, .. })
    ));
    assert_eq!(
        err.to_string(),
        "IndexNow submit failed with status 422: Unprocessable Entity"
    );
}

#[tokio::test]
async fn engine_wires_production_components() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let engine = SubmissionEngine::new(&config).unwrap();
    let args = vec!["https://www.sonnydoodles.com/faq".to_string()];

    let report = engine.run(&config, &args).await.unwrap();
    assert_eq!(report.source, UrlSource::Cli);
}
