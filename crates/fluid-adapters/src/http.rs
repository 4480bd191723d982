//! Blocking HTTP adapter using `ureq`.

use std::io::Read;
use std::time::Duration;

use fluid_core::{
    application::{
        ApplicationError,
        ports::{FetchResponse, HttpFetcher},
    },
    error::{FluidError, FluidResult},
};
use tracing::debug;

const USER_AGENT: &str = concat!("fluid/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Production fetcher. A fresh agent is configured per call so that each
/// request carries its own overall timeout.
#[derive(Debug, Clone, Default)]
pub struct UreqFetcher;

impl UreqFetcher {
    pub fn new() -> Self {
        Self
    }

    fn agent(timeout: Duration) -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .user_agent(USER_AGENT)
            .build()
            .into()
    }
}

fn network_error(url: &str, e: impl std::fmt::Display) -> FluidError {
    ApplicationError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    }
    .into()
}

impl HttpFetcher for UreqFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> FluidResult<FetchResponse> {
        let mut response = Self::agent(timeout)
            .get(url)
            .header("Accept", ACCEPT)
            .call()
            .map_err(|e| network_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| network_error(url, e))?;

        debug!(url, status, bytes = body.len(), "Fetched");
        Ok(FetchResponse { status, body })
    }

    fn open(&self, url: &str, timeout: Duration) -> FluidResult<Box<dyn Read + Send>> {
        let response = Self::agent(timeout)
            .get(url)
            .call()
            .map_err(|e| network_error(url, e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(network_error(url, format!("unexpected status {status}")));
        }

        debug!(url, "Streaming download");
        Ok(Box::new(response.into_body().into_reader()))
    }
}
