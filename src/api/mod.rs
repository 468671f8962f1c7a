#[cfg(test)]
mod fake;
mod fetch;
mod models;
mod retry;
#[cfg(test)]
pub(crate) use self::fake::FakeSource;
pub(crate) use self::fetch::*;
pub(crate) use self::models::*;
pub(crate) use self::retry::{Cancellation, RetryPolicy};
use crate::config::ApiConfig;
use crate::dates::format_ymd;
use crate::period::DateRange;
use reqwest::{
    blocking::{Client, ClientBuilder},
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    StatusCode, Url,
};
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;
use time::Date;
use tracing::debug;

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("API token cannot be sent in an HTTP header")]
    InvalidToken,
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("could not reach {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    fn from_reqwest(url: &str, source: reqwest::Error) -> ApiError {
        if source.is_timeout() {
            ApiError::Timeout {
                url: url.to_owned(),
            }
        } else {
            ApiError::Network {
                url: url.to_owned(),
                source,
            }
        }
    }
}

/// Where the summary panel gets its numbers from.  Implementations should
/// give up early once `cancel` fires.
pub(crate) trait SummarySource: fmt::Debug + Send + Sync {
    fn health(&self, cancel: &Cancellation) -> Result<(), ApiError>;

    /// Returns `None` if the backend has no record of `date`
    fn date_summary(
        &self,
        date: Date,
        cancel: &Cancellation,
    ) -> Result<Option<DateSummary>, ApiError>;

    fn period_totals(
        &self,
        range: DateRange,
        cancel: &Cancellation,
    ) -> Result<PeriodTotals, ApiError>;

    fn category_expenses(
        &self,
        range: DateRange,
        cancel: &Cancellation,
    ) -> Result<Vec<CategoryExpense>, ApiError>;
}

/// Blocking client for the finance backend.  Every call is retried
/// according to the configured [`RetryPolicy`].
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl ApiClient {
    pub(crate) fn new(config: &ApiConfig) -> Result<ApiClient, ApiError> {
        ApiClient::with_builder(config, Client::builder())
    }

    fn with_builder(config: &ApiConfig, builder: ClientBuilder) -> Result<ApiClient, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_owned();
        if let Err(e) = Url::parse(&base_url) {
            return Err(ApiError::InvalidUrl {
                url: base_url,
                reason: e.to_string(),
            });
        }
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(ref token) = config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let client = builder
            .timeout(config.timeout())
            .default_headers(headers)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(ApiError::Client)?;
        Ok(ApiClient {
            client,
            base_url,
            retry: config.retry.policy(),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs a GET request for `path` (which must start with a slash),
    /// retrying on failure.  An empty or `null` body decodes as
    /// `T::default()`.
    fn get<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        cancel: &Cancellation,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        self.retry.run(
            cancel,
            |attempt| {
                debug!(%url, attempt, "sending request");
                self.get_once(&url)
            },
            std::thread::sleep,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_once<T: DeserializeOwned + Default>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ApiError::from_reqwest(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_owned(),
                status,
            });
        }
        let body = response
            .text()
            .map_err(|e| ApiError::from_reqwest(url, e))?;
        decode_body(&body).map_err(|source| ApiError::Decode {
            url: url.to_owned(),
            source,
        })
    }
}

impl SummarySource for ApiClient {
    fn health(&self, cancel: &Cancellation) -> Result<(), ApiError> {
        self.get::<serde_json::Value>("/health", cancel).map(|_| ())
    }

    fn date_summary(
        &self,
        date: Date,
        cancel: &Cancellation,
    ) -> Result<Option<DateSummary>, ApiError> {
        let path = format!("/financial/date/{}", format_ymd(date));
        let value = self.get::<serde_json::Value>(&path, cancel)?;
        DateSummary::from_json(value).map_err(|source| ApiError::Decode {
            url: self.url(&path),
            source,
        })
    }

    fn period_totals(
        &self,
        range: DateRange,
        cancel: &Cancellation,
    ) -> Result<PeriodTotals, ApiError> {
        self.get(&format!("/financial/period?{}", period_query(range)), cancel)
    }

    fn category_expenses(
        &self,
        range: DateRange,
        cancel: &Cancellation,
    ) -> Result<Vec<CategoryExpense>, ApiError> {
        self.get(&format!("/financial/categories?{}", period_query(range)), cancel)
    }
}

/// Query string selecting the dates of `range`
pub(crate) fn period_query(range: DateRange) -> String {
    format!(
        "start_date={}&end_date={}",
        format_ymd(range.start()),
        format_ymd(range.end())
    )
}

fn decode_body<T: DeserializeOwned + Default>(body: &str) -> Result<T, serde_json::Error> {
    if body.trim().is_empty() {
        Ok(T::default())
    } else {
        serde_json::from_str::<Option<T>>(body).map(Option::unwrap_or_default)
    }
}
