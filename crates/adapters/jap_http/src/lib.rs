//! # avdash-adapter-jap-http
//!
//! Device adapter for Just Add Power transmitters and receivers, built on
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Wire protocol
//!
//! | Operation | Request | Timeouts |
//! |-----------|---------|----------|
//! | Reboot | `POST http://{ip}/cgi-bin/api/command/cli`, `text/plain` body `reboot` | 3 s overall |
//! | Probe | `HEAD http://{ip}/`, redirects not followed | 1 s connect, 2 s overall |
//!
//! Plain HTTP, no TLS, no authentication, no proxy. The units often answer
//! commands with error status codes while executing them, so this adapter
//! never interprets status codes: it reports what came back and leaves the
//! policy to the dispatcher.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `avdash-app` and `avdash-domain`.

mod config;
mod error;

pub use config::JapHttpConfig;
pub use error::JapError;

use std::net::IpAddr;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;

use avdash_app::ports::DeviceControl;
use avdash_domain::dispatch::TransportOutcome;

/// [`DeviceControl`] implementation speaking the devices' HTTP API.
#[derive(Debug, Clone)]
pub struct JapHttpClient {
    config: JapHttpConfig,
    command: Client,
    probe: Client,
}

impl JapHttpClient {
    /// Build the command and probe clients from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`JapError::ClientBuild`] if reqwest cannot initialise a client.
    pub fn new(config: JapHttpConfig) -> Result<Self, JapError> {
        let command = Client::builder()
            .timeout(Duration::from_millis(config.reboot_timeout_ms))
            .no_proxy()
            .build()
            .map_err(JapError::ClientBuild)?;
        let probe = Client::builder()
            .connect_timeout(Duration::from_millis(config.probe_connect_timeout_ms))
            .timeout(Duration::from_millis(config.probe_timeout_ms))
            .redirect(Policy::none())
            .no_proxy()
            .build()
            .map_err(JapError::ClientBuild)?;
        Ok(Self {
            config,
            command,
            probe,
        })
    }

    /// `http://host[:port]` for `ip`, bracketing IPv6 and omitting port 80.
    fn origin(&self, ip: IpAddr) -> String {
        let host = match ip {
            IpAddr::V4(ip) => ip.to_string(),
            IpAddr::V6(ip) => format!("[{ip}]"),
        };
        if self.config.port == 80 {
            format!("http://{host}")
        } else {
            format!("http://{host}:{}", self.config.port)
        }
    }
}

fn outcome_of(result: Result<reqwest::Response, reqwest::Error>) -> TransportOutcome {
    match result {
        Ok(response) => TransportOutcome::Responded {
            status: response.status().as_u16(),
        },
        Err(err) => TransportOutcome::Failed {
            reason: err.to_string(),
        },
    }
}

impl DeviceControl for JapHttpClient {
    async fn send_reboot(&self, ip: IpAddr) -> TransportOutcome {
        let url = format!("{}{}", self.origin(ip), self.config.command_path);
        tracing::debug!(%url, "sending reboot command");
        let result = self
            .command
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(self.config.reboot_command.clone())
            .send()
            .await;
        outcome_of(result)
    }

    async fn probe(&self, ip: IpAddr) -> TransportOutcome {
        let url = format!("{}/", self.origin(ip));
        outcome_of(self.probe.head(&url).send().await)
    }
}
