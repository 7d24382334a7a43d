//! HTTP client for the external category taxonomy service

use crate::config::CategorySourceConfig;
use crate::contract::{CategorySnapshot, SubCategorySnapshot};
use crate::domain::repository::CategorySource;
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

const API_KEY_HEADER: &str = "X-Api-Key";

/// Response envelope of `GET {base_url}/categories`
#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    success: bool,
    #[serde(default)]
    categories: Vec<RemoteMainCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteMainCategory {
    #[serde(deserialize_with = "external_id")]
    id: String,
    title: String,
    #[serde(default)]
    sub_categories: Vec<RemoteSubCategory>,
}

#[derive(Debug, Deserialize)]
struct RemoteSubCategory {
    #[serde(deserialize_with = "external_id")]
    id: String,
    title: String,
}

/// Remote ids come as either numbers or strings
fn external_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(n) => n.to_string(),
        Id::Text(s) => s,
    })
}

impl From<RemoteMainCategory> for CategorySnapshot {
    fn from(main: RemoteMainCategory) -> Self {
        Self {
            external_id: main.id,
            title: main.title,
            sub_categories: main
                .sub_categories
                .into_iter()
                .map(|sub| SubCategorySnapshot {
                    external_id: sub.id,
                    title: sub.title,
                })
                .collect(),
        }
    }
}

/// `CategorySource` backed by the taxonomy service's REST API
pub struct HttpCategorySource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpCategorySource {
    pub fn new(config: &CategorySourceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build category source HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CategorySource for HttpCategorySource {
    async fn fetch(&self) -> anyhow::Result<Vec<CategorySnapshot>> {
        let url = format!("{}/categories", self.base_url);
        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("category source unreachable at {}", url))?
            .error_for_status()
            .context("category source rejected the request")?;

        let body: CategoriesResponse = response
            .json()
            .await
            .context("category source returned an unreadable body")?;

        if !body.success {
            bail!("category source reported failure");
        }

        tracing::debug!(count = body.categories.len(), "fetched main categories");
        Ok(body.categories.into_iter().map(CategorySnapshot::from).collect())
    }
}
