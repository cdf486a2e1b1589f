use std::future::Future;

use log::debug;
use reqwest::Client;

use crate::RemoteError;
use crate::wire::{RemoteRequest, RemoteResponse};

/// A service that can compute layouts on behalf of the local engine
pub trait RemoteSolver: Send + Sync {
    fn solve(
        &self,
        request: &RemoteRequest,
    ) -> impl Future<Output = Result<RemoteResponse, RemoteError>> + Send;
}

/// Remote solver reachable over HTTP, the request is POSTed as JSON
#[derive(Clone, Debug)]
pub struct HttpSolver {
    client: Client,
    url: String,
}

impl HttpSolver {
    pub fn new(url: impl Into<String>) -> Self {
        HttpSolver {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteSolver for HttpSolver {
    async fn solve(&self, request: &RemoteRequest) -> Result<RemoteResponse, RemoteError> {
        debug!("[REMOTE] POST {} ({} shapes)", self.url, request.shapes.len());
        let response = self.client.post(&self.url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().to_string()));
        }
        Ok(response.json::<RemoteResponse>().await?)
    }
}
