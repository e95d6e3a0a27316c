//! Replays search fixtures against a running search service.
//!
//! Usage: `control-module [fixtures.json]`. Without an argument the path comes
//! from `FIXTURES_PATH`, then falls back to `fixtures/cases.json` resolved
//! against the working directory, so run it from `control-module/` or pass a
//! path.

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

const DEFAULT_SEARCH_SERVICE_URL: &str = "http://0.0.0.0:7003";
const DEFAULT_FIXTURES_PATH: &str = "fixtures/cases.json";
const DEFAULT_LOG_FILTER: &str = "control_module=info";
const READY_ATTEMPTS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MatchResult {
    identifier: String,
    page: u32,
    line: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    search_term: Value,
    results: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
struct Expectation {
    results: Option<Vec<MatchResult>>,
    count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureCase {
    name: String,
    #[serde(default)]
    search_term: Value,
    #[serde(default)]
    books: Value,
    expected: Expectation,
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Pass,
    Fail { expected: String, received: String },
}

/// Compares a service response with what the fixture expects. The echoed
/// term is always checked; results are compared in full when listed,
/// otherwise only their count.
fn evaluate(case: &FixtureCase, response: &SearchResponse) -> Outcome {
    if response.search_term != case.search_term {
        return Outcome::Fail {
            expected: format!("searchTerm {}", case.search_term),
            received: format!("searchTerm {}", response.search_term),
        };
    }

    if let Some(ref expected) = case.expected.results {
        if *expected != response.results {
            return Outcome::Fail {
                expected: format!("{:?}", expected),
                received: format!("{:?}", response.results),
            };
        }
    }

    if let Some(count) = case.expected.count {
        if count != response.results.len() {
            return Outcome::Fail {
                expected: count.to_string(),
                received: response.results.len().to_string(),
            };
        }
    }

    Outcome::Pass
}

fn load_cases(path: &str) -> Result<Vec<FixtureCase>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read fixtures from {}: {}", path, e))?;
    let cases: Vec<FixtureCase> = serde_json::from_str(&content)?;
    Ok(cases)
}

struct ControlModule {
    client: Client,
    search_service_url: String,
}

impl ControlModule {
    fn new(search_service_url: String) -> Self {
        Self {
            client: Client::new(),
            search_service_url,
        }
    }

    async fn wait_for_service(&self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Waiting for search service to be ready...");

        let url = format!("{}/status", self.search_service_url);

        for attempt in 1..=READY_ATTEMPTS {
            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("Search service is ready");
                    return Ok(());
                }
                Ok(response) => {
                    warn!(
                        "Search service responded with status: {} (attempt {})",
                        response.status(),
                        attempt
                    );
                }
                Err(e) => {
                    warn!("Search service not ready: {} (attempt {})", e, attempt);
                }
            }
            sleep(Duration::from_secs(2)).await;
        }

        Err(format!("Search service at {} never became ready", self.search_service_url).into())
    }

    async fn run_search(
        &self,
        case: &FixtureCase,
    ) -> Result<SearchResponse, Box<dyn std::error::Error>> {
        let url = format!("{}/search", self.search_service_url);
        let body = json!({
            "searchTerm": case.search_term,
            "books": case.books,
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error_msg = format!("Search for '{}' failed: {}", case.name, response.status());
            error!("{}", error_msg);
            Err(error_msg.into())
        }
    }

    /// Runs every case and returns how many failed.
    async fn run_cases(&self, cases: &[FixtureCase]) -> usize {
        info!("Running {} fixture cases", cases.len());

        let mut failures = 0;

        for (n, case) in cases.iter().enumerate() {
            let outcome = match self.run_search(case).await {
                Ok(response) => evaluate(case, &response),
                Err(e) => Outcome::Fail {
                    expected: "a search response".to_string(),
                    received: e.to_string(),
                },
            };

            match outcome {
                Outcome::Pass => info!("PASS: Test {} ({})", n + 1, case.name),
                Outcome::Fail { expected, received } => {
                    failures += 1;
                    error!("FAIL: Test {} ({})", n + 1, case.name);
                    error!("Expected: {}", expected);
                    error!("Received: {}", received);
                }
            }
        }

        failures
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_filter =
        std::env::var("LOG_FILTER").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter.as_str())
        .init();

    let search_service_url = std::env::var("SEARCH_SERVICE_URL")
        .unwrap_or_else(|_| DEFAULT_SEARCH_SERVICE_URL.to_string());

    // A fixtures path on the command line wins over the environment
    let fixtures_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FIXTURES_PATH").ok())
        .unwrap_or_else(|| DEFAULT_FIXTURES_PATH.to_string());

    let cases = load_cases(&fixtures_path)?;
    info!("Loaded {} cases from {}", cases.len(), fixtures_path);

    let control = ControlModule::new(search_service_url);
    control.wait_for_service().await?;

    let failures = control.run_cases(&cases).await;

    info!(
        "Fixture run finished at {}: {} passed, {} failed",
        Utc::now().to_rfc3339(),
        cases.len() - failures,
        failures
    );

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
