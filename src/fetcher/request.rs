use crate::config::DownloadConfig;
use crate::error::AttributionError;
use crate::retry::{AttemptOutcome, RetryPolicy};
use log::{debug, warn};
use reqwest::blocking::Client;
use std::thread::sleep;

/// Result of fetching a single URL.
#[derive(Debug)]
pub enum Download {
    Body(Vec<u8>),
    /// Still throttled after the last attempt.
    GaveUp { attempts: u32 },
    /// Non-throttling status or transport error; not retried.
    Failed(String),
}

pub struct RequestFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl RequestFetcher {
    pub fn new(config: &DownloadConfig) -> Result<Self, AttributionError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            policy: RetryPolicy::new(config.max_attempts, config.base_delay()),
        })
    }

    /// GETs `url`, backing off and retrying while the server throttles us.
    pub fn fetch(&self, url: &str) -> Download {
        let mut attempt = 1u32;
        loop {
            debug!(
                "Downloading {} (attempt {}/{})",
                url, attempt, self.policy.max_attempts
            );

            let response = match self.client.get(url).send() {
                Ok(response) => response,
                Err(e) => return Download::Failed(e.to_string()),
            };

            let status = response.status();
            match AttemptOutcome::from_status(status) {
                AttemptOutcome::Success => {
                    return match response.bytes() {
                        Ok(body) => Download::Body(body.to_vec()),
                        Err(e) => Download::Failed(e.to_string()),
                    };
                }
                AttemptOutcome::Failed => return Download::Failed(format!("HTTP {}", status)),
                AttemptOutcome::Throttled => match self.policy.backoff(attempt) {
                    Some(delay) => {
                        warn!(
                            "Rate limited ({}). Waiting {:.1}s before retrying...",
                            status.as_u16(),
                            delay.as_secs_f64()
                        );
                        sleep(delay);
                        attempt += 1;
                    }
                    None => return Download::GaveUp { attempts: attempt },
                },
            }
        }
    }
}
