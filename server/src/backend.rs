// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::marker::PhantomData;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use board::{BoardRemote, ExpenseSource};
use common::{Expense, StatusUpdatePayload};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the REST backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid backend URL {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Backend URL {} cannot hold a path", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// A typed view on one collection, e.g. `tasks` or `events`.
    pub fn resource<I>(&self, name: &'static str) -> HttpResource<I> {
        HttpResource {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            name,
            _item: PhantomData,
        }
    }
}

/// `base` with `segments` appended, each one percent-encoded.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("Backend URL {} cannot hold a path", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl ExpenseSource for HttpBackend {
    async fn expenses_for_event(&self, event_id: &str) -> Result<Vec<Expense>> {
        let url = endpoint(&self.base_url, &["events", event_id, "expenses"])?;
        debug!("GET {}", url);

        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach backend for expenses of event {}", event_id))?
            .error_for_status()
            .with_context(|| format!("Backend refused expenses of event {}", event_id))?
            .json::<Vec<Expense>>()
            .await
            .with_context(|| format!("Invalid expenses payload for event {}", event_id))
    }
}

/// One backend collection, deserialized into `I`.
#[derive(Debug)]
pub struct HttpResource<I> {
    client: Client,
    base_url: Url,
    name: &'static str,
    _item: PhantomData<fn() -> I>,
}

#[async_trait]
impl<I> BoardRemote<I> for HttpResource<I>
where
    I: DeserializeOwned + Send + 'static,
{
    async fn fetch_all(&self) -> Result<Vec<I>> {
        let url = endpoint(&self.base_url, &[self.name])?;
        debug!("GET {}", url);

        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach backend for {}", self.name))?
            .error_for_status()
            .with_context(|| format!("Backend refused to list {}", self.name))?
            .json::<Vec<I>>()
            .await
            .with_context(|| format!("Invalid {} payload", self.name))
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<I> {
        let url = endpoint(&self.base_url, &[self.name, id])?;
        debug!("PATCH {} status={:?}", url, status);

        self.client
            .patch(url)
            .json(&StatusUpdatePayload {
                status: status.to_string(),
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach backend to update {}", id))?
            .error_for_status()
            .with_context(|| format!("Backend refused status {:?} for {}", status, id))?
            .json::<I>()
            .await
            .with_context(|| format!("Invalid payload after updating {}", id))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = endpoint(&self.base_url, &[self.name, id])?;
        debug!("DELETE {}", url);

        self.client
            .delete(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach backend to delete {}", id))?
            .error_for_status()
            .with_context(|| format!("Backend refused to delete {}", id))?;
        Ok(())
    }
}
