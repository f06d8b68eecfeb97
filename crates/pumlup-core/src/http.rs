//! Blocking HTTP GET over libcurl (via the `curl` crate).
//!
//! Redirects are followed. No timeouts are configured, so a stalled server
//! blocks the run; this tool is meant for manual or cron use.

use std::io::{self, Write};

use crate::error::{Result, SyncError};

const MAX_REDIRECTS: u32 = 10;

/// The only network operations a sync run needs.
pub trait HttpClient {
    /// GET `url` and return the whole body.
    fn get(&self, url: &str) -> Result<Vec<u8>>;

    /// GET `url` and stream the body into `dest`. Returns the bytes written.
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64>;
}

/// [`HttpClient`] backed by a fresh `curl::easy::Easy` per request.
///
/// GitHub rejects API requests without a `User-Agent`, so one is always sent.
#[derive(Debug, Clone)]
pub struct CurlClient {
    user_agent: String,
}

impl CurlClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn handle(&self, url: &str) -> Result<curl::easy::Easy> {
        let err = |e: curl::Error| SyncError::transport(url)(e);
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(err)?;
        easy.follow_location(true).map_err(err)?;
        easy.max_redirections(MAX_REDIRECTS).map_err(err)?;
        easy.useragent(&self.user_agent).map_err(err)?;
        Ok(easy)
    }
}

impl HttpClient for CurlClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.download(url, &mut body)?;
        Ok(body)
    }

    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        let mut easy = self.handle(url)?;
        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| match dest.write_all(data) {
                    Ok(()) => {
                        written += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        write_err = Some(e);
                        Ok(0) // abort transfer
                    }
                })
                .map_err(SyncError::transport(url))?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(SyncError::Io {
                action: "write body of",
                path: url.into(),
                source: e,
            });
        }
        performed.map_err(SyncError::transport(url))?;

        let status = easy.response_code().map_err(SyncError::transport(url))?;
        if !(200..300).contains(&status) {
            return Err(SyncError::Http {
                url: url.to_string(),
                status,
            });
        }
        tracing::debug!(url, status, bytes = written, "GET complete");
        Ok(written)
    }
}
