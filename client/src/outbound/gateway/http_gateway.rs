//! Reqwest-backed gateway adapter.
//!
//! This adapter owns transport details only: URL resolution, request
//! serialisation, timeout and HTTP error mapping, and JSON decoding into
//! domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    CreatePersonRequest, CreateTransactionRequest, PersonDto, TotalsDto, TransactionDto,
};
use crate::domain::ports::{GatewayError, LedgerGateway};
use crate::domain::{AggregateTotals, NewPerson, NewTransaction, Person, PersonId, Transaction};

const PEOPLE_PATH: &str = "person-list";
const PERSON_PATH: &str = "person";
const TRANSACTIONS_PATH: &str = "transaction-list";
const TRANSACTION_PATH: &str = "transaction";
const TOTALS_PATH: &str = "totals";

/// Gateway adapter issuing JSON requests relative to one base URL.
pub struct HttpLedgerGateway {
    client: Client,
    base_url: Url,
}

impl HttpLedgerGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// A base URL with a path prefix (`http://host/api`) keeps the prefix;
    /// endpoint paths are appended to it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Base URL every endpoint path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url.join(path).map_err(|error| {
            GatewayError::invalid_request(format!("cannot resolve {path}: {error}"))
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.endpoint(path)?;
        let body = send(self.client.get(url)).await?;
        decode(path, &body)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl LedgerGateway for HttpLedgerGateway {
    async fn list_people(&self) -> Result<Vec<Person>, GatewayError> {
        let people: Vec<PersonDto> = self.fetch(PEOPLE_PATH).await?;
        people
            .into_iter()
            .map(PersonDto::into_domain)
            .collect::<Result<_, _>>()
            .map_err(GatewayError::decode)
    }

    async fn create_person(&self, person: &NewPerson) -> Result<(), GatewayError> {
        let url = self.endpoint(PERSON_PATH)?;
        let request = self
            .client
            .post(url)
            .json(&CreatePersonRequest::from(person));
        send(request).await.map(drop)
    }

    async fn delete_person(&self, id: &PersonId) -> Result<(), GatewayError> {
        let url = self.endpoint(PERSON_PATH)?;
        let request = self.client.delete(url).query(&[("id", id.as_ref())]);
        send(request).await.map(drop)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, GatewayError> {
        let transactions: Vec<TransactionDto> = self.fetch(TRANSACTIONS_PATH).await?;
        transactions
            .into_iter()
            .map(TransactionDto::into_domain)
            .collect::<Result<_, _>>()
            .map_err(GatewayError::decode)
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), GatewayError> {
        let url = self.endpoint(TRANSACTION_PATH)?;
        let request = self
            .client
            .post(url)
            .json(&CreateTransactionRequest::from(transaction));
        send(request).await.map(drop)
    }

    async fn fetch_totals(&self) -> Result<AggregateTotals, GatewayError> {
        let totals: TotalsDto = self.fetch(TOTALS_PATH).await?;
        totals.into_domain().map_err(GatewayError::decode)
    }
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status();
    let url = response.url().clone();
    let body = response.bytes().await.map_err(map_transport_error)?;
    debug!(%url, status = status.as_u16(), bytes = body.len(), "gateway responded");
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|error| {
        GatewayError::decode(format!("invalid JSON payload from {path}: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::timeout(error.to_string())
    } else {
        GatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => GatewayError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::timeout(message),
        StatusCode::NOT_FOUND => GatewayError::not_found(message),
        _ if status.is_client_error() => GatewayError::rejected(message),
        _ if status.is_server_error() => GatewayError::server(message),
        _ => GatewayError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
        format!("{preview}...")
    } else {
        compact
    }
}
