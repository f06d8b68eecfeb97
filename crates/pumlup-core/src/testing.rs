//! In-memory [`HttpClient`] for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use crate::error::{Result, SyncError};
use crate::http::HttpClient;

/// Serves canned bodies by exact URL; anything else is a 404. Records every request.
#[derive(Default)]
pub(crate) struct FakeClient {
    routes: HashMap<String, (u32, Vec<u8>)>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.to_string(), (200, body.into()));
        self
    }

    pub fn status(mut self, url: &str, status: u32) -> Self {
        self.routes.insert(url.to_string(), (status, Vec::new()));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl HttpClient for FakeClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.download(url, &mut body)?;
        Ok(body)
    }

    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        self.requests.borrow_mut().push(url.to_string());
        match self.routes.get(url) {
            Some((200, body)) => {
                dest.write_all(body).map_err(|e| SyncError::Io {
                    action: "write body of",
                    path: url.into(),
                    source: e,
                })?;
                Ok(body.len() as u64)
            }
            Some((status, _)) => Err(SyncError::Http {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(SyncError::Http {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
