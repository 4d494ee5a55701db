//! Integration tests for the enrichment pipeline
//!
//! These tests use wiremock to stand in for both the suggestion API and the company
//! websites. Site hostnames are mapped to the mock server with a `reqwest` resolve
//! override, so email domains and page URLs line up like they would in production.

use async_trait::async_trait;
use company_enricher::config::{Config, OutputConfig, ScraperConfig, SuggestionConfig};
use company_enricher::crawler::{EmailExtractor, HttpFetcher, SiteScraper};
use company_enricher::dns::MxCheck;
use company_enricher::output::{read_table, write_enriched};
use company_enricher::pipeline::{EmailFinder, SiteResolver};
use company_enricher::state::{EmailSource, LookupOutcome, MatchRule};
use company_enricher::suggest::SuggestionClient;
use company_enricher::{CompanyRecord, Pipeline, ScrapeOutcome, SuffixList};
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Accepts every domain, so tests never depend on real DNS
struct AlwaysMx;

#[async_trait]
impl MxCheck for AlwaysMx {
    async fn has_mx(&self, _email: &str) -> bool {
        true
    }
}

/// Resolves names from a fixed table
struct StaticResolver(HashMap<String, String>);

#[async_trait]
impl SiteResolver for StaticResolver {
    async fn resolve(&self, company_name: &str) -> LookupOutcome {
        match self.0.get(company_name) {
            Some(url) => LookupOutcome::Matched {
                url: url.clone(),
                rule: MatchRule::Domain,
            },
            None => LookupOutcome::NoMatch,
        }
    }
}

/// Sends `https://<host>` websites to the plain-HTTP mock server port
struct PlainHttp<F> {
    inner: F,
    port: u16,
}

#[async_trait]
impl<F: EmailFinder> EmailFinder for PlainHttp<F> {
    async fn find_email(&self, website: Option<&str>) -> ScrapeOutcome {
        let rewritten = website.map(|w| {
            format!(
                "http://{}:{}/",
                w.trim_start_matches("https://").trim_end_matches('/'),
                self.port
            )
        });
        self.inner.find_email(rewritten.as_deref()).await
    }
}

/// Builds a scraper whose HTTP client sends the given hosts to the mock server
fn scraper_for(server: &MockServer, hosts: &[&str]) -> SiteScraper<HttpFetcher, AlwaysMx> {
    let mut builder = reqwest::Client::builder();
    for host in hosts {
        builder = builder.resolve(host, *server.address());
    }
    let client = builder.build().expect("Failed to build client");

    let suffixes = Arc::new(SuffixList::embedded().expect("Failed to load suffix list"));
    SiteScraper::new(
        HttpFetcher::with_client(client),
        AlwaysMx,
        EmailExtractor::new(suffixes, 50),
        &ScraperConfig::default(),
    )
}

fn suggestion_client(server: &MockServer) -> SuggestionClient {
    let config = SuggestionConfig {
        endpoint: format!("{}/v1/companies/suggest", server.uri()),
        ..SuggestionConfig::default()
    };
    SuggestionClient::with_client(reqwest::Client::new(), &config)
        .expect("Failed to build suggestion client")
}

#[tokio::test]
async fn test_csv_to_csv_end_to_end() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/companies/suggest"))
        .and(query_param("query", "Acme Corp"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"domain":"acme.test","name":"Acme","logo":null}]"#,
            "application/json",
        ))
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/companies/suggest"))
        .and(query_param("query", "Globex"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&api)
        .await;

    let sites = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a href="/about">About</a><a href="/contact">Contact</a></body></html>"#,
        ))
        .expect(1)
        .mount(&sites)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<p>Reach sales [at] acme.test or press@elsewhere.org</p>",
        ))
        .expect(1)
        .mount(&sites)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("companies.csv");
    std::fs::write(&input, "Company Name,Country\nAcme Corp,DE\nGlobex,US\n,FR\n").unwrap();

    let config = Config::default();
    let table = read_table(&input, &config.input.name_column).unwrap();

    let finder = PlainHttp {
        inner: scraper_for(&sites, &["acme.test"]),
        port: sites.address().port(),
    };
    let pipeline = Pipeline::new(Arc::new(suggestion_client(&api)), Arc::new(finder));
    let report = pipeline.run(&table.records()).await;

    assert_eq!(
        report.lookups,
        vec![
            LookupOutcome::Matched {
                url: "https://acme.test".to_string(),
                rule: MatchRule::Domain,
            },
            LookupOutcome::NoMatch,
            LookupOutcome::EmptyName,
        ]
    );
    assert_eq!(
        report.scrapes[0],
        ScrapeOutcome::Verified {
            email: "sales@acme.test".to_string(),
            source: EmailSource::SecondaryPage,
        }
    );
    assert_eq!(report.scrapes[1], ScrapeOutcome::NoWebsite);

    let output = dir.path().join("out").join("companies_complete.csv");
    write_enriched(&output, &table, &report.records, &OutputConfig::default()).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "Company Name,Country,Website,Email\n\
         Acme Corp,DE,https://acme.test,sales@acme.test\n\
         Globex,US,,\n\
         ,FR,,\n"
    );
}

#[tokio::test]
async fn test_scrape_uses_final_url_after_redirect() {
    let sites = MockServer::start().await;
    let port = sites.address().port();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("http://newbrand.test:{}/home", port).as_str()),
        )
        .mount(&sites)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("info@oldbrand.test hello@newbrand.test"),
        )
        .mount(&sites)
        .await;

    let scraper = scraper_for(&sites, &["oldbrand.test", "newbrand.test"]);
    let outcome = scraper
        .scrape(Some(format!("http://oldbrand.test:{}/", port).as_str()))
        .await;

    assert_eq!(outcome.email(), Some("hello@newbrand.test"));
}

#[tokio::test]
async fn test_unreachable_homepage_fetches_nothing_else() {
    let sites = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("contact@acme.test"))
        .expect(0)
        .mount(&sites)
        .await;

    // Nothing listens on this port
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let resolver = StaticResolver(
        [(
            "Acme".to_string(),
            format!("http://127.0.0.1:{}/", port),
        )]
        .into_iter()
        .collect(),
    );
    let pipeline = Pipeline::new(
        Arc::new(resolver),
        Arc::new(scraper_for(&sites, &["acme.test"])),
    );

    let report = pipeline.run(&[CompanyRecord::new("Acme")]).await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].url, Some(format!("http://127.0.0.1:{}/", port)));
    assert_eq!(report.records[0].email, None);
    assert!(matches!(
        report.scrapes[0],
        ScrapeOutcome::Unreachable { .. }
    ));
}

#[tokio::test]
async fn test_error_status_pages_are_still_scanned() {
    let sites = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Blocked? Mail ops@acme.test"))
        .mount(&sites)
        .await;

    let scraper = scraper_for(&sites, &["acme.test"]);
    let outcome = scraper
        .scrape(Some(format!("http://acme.test:{}/", sites.address().port()).as_str()))
        .await;

    assert_eq!(
        outcome,
        ScrapeOutcome::Verified {
            email: "ops@acme.test".to_string(),
            source: EmailSource::Homepage,
        }
    );
}
