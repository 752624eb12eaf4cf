//! Request dispatch: HTTP method + resource address -> store operation.
//!
//! ## Method table
//!
//! | Method | Target id | Action |
//! |---|---|---|
//! | `GET` | either | list the filtered collection, or the single match |
//! | `POST` | must be absent | append with the next id, `201` + `Location` |
//! | `PUT` / `PATCH` | required | replace the record with that id, `204` / `404` |
//! | `DELETE` | required | remove every addressed record, `204` / `404` |
//!
//! Anything else is answered with "invalid REST method".

mod error;
mod response;

pub use error::ApiError;
pub use response::{ApiResponse, ResponseBody, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};

use std::sync::Arc;

use axum::http::{header, Method, StatusCode};
use serde_json::Value;

use crate::address::{resolve, ResourceAddress};
use crate::record::{next_id, Record};
use crate::store::CollectionStore;

/// Which status code client errors get.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Method/id mismatches, array bodies and malformed JSON answer `400`.
    #[default]
    Strict,
    /// Every error answers `404`, for clients written against older mock
    /// servers that never sent `400`.
    Legacy,
}

/// Turns API requests into collection store operations.
pub struct Dispatcher {
    store: Arc<CollectionStore>,
    prefix: String,
    policy: StatusPolicy,
}

impl Dispatcher {
    pub fn new(store: Arc<CollectionStore>, prefix: impl Into<String>) -> Self {
        Dispatcher {
            store,
            prefix: prefix.into(),
            policy: StatusPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    /// Whether `path` belongs to the API rather than the static site.
    pub fn is_api_path(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Handle one request. `body` must be the complete, drained request body.
    pub async fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> ApiResponse {
        match self.route(method, path, body).await {
            Ok(response) => response,
            Err(err) => {
                let status = err.status_code(self.policy);
                tracing::warn!("{} {} -> {}: {}", method, path, status.as_u16(), err);
                ApiResponse::text(status, err.to_string())
            }
        }
    }

    async fn route(
        &self,
        method: &Method,
        path: &str,
        body: &[u8],
    ) -> Result<ApiResponse, ApiError> {
        let address = resolve(path, &self.prefix)?;

        match *method {
            Method::GET => self.get(&address).await,
            Method::POST => {
                if address.target_id.is_some() {
                    return Err(ApiError::validation("POST must not have an ID"));
                }
                let record = decode_object(body, "POST")?;
                self.create(&address, record).await
            }
            Method::PUT | Method::PATCH => {
                let Some(id) = address.target_id else {
                    return Err(ApiError::validation("PUT must have an ID"));
                };
                let record = decode_object(body, "PUT/PATCH")?;
                self.replace(&address, id, record).await
            }
            Method::DELETE => {
                if address.target_id.is_none() {
                    return Err(ApiError::validation("DELETE must have an ID"));
                }
                self.delete(&address).await
            }
            _ => Err(ApiError::validation("invalid REST method")),
        }
    }

    async fn get(&self, address: &ResourceAddress) -> Result<ApiResponse, ApiError> {
        let records = self.store.read(&address.collection).await?;
        let mut matches = address.filter.select(&records);

        if address.singular {
            let record = matches
                .next()
                .ok_or_else(|| ApiError::NotFound("invalid ID".into()))?;
            Ok(ApiResponse::json(StatusCode::OK, &record.clone().into_value()))
        } else {
            let list: Vec<Value> = matches.cloned().map(Record::into_value).collect();
            Ok(ApiResponse::json(StatusCode::OK, &Value::Array(list)))
        }
    }

    /// Append `record` with the next id.
    ///
    /// Besides `id`, a nested create also writes the `{parent}_id` field
    /// from the address onto the record, overwriting any value the client
    /// sent, so the new child shows up in its parent's listing.
    async fn create(
        &self,
        address: &ResourceAddress,
        mut record: Record,
    ) -> Result<ApiResponse, ApiError> {
        if let Some(parent) = &address.parent {
            record.insert(parent.field.clone(), parent.id);
        }

        let created = self
            .store
            .try_modify(&address.collection, move |mut records| {
                let id = next_id(&records).ok_or_else(|| {
                    ApiError::Conflict(format!("no ids left in {}", address.collection))
                })?;
                record.set_id(id);
                records.push(record.clone());
                Ok::<_, ApiError>((records, record))
            })
            .await?;

        let id = created.id().unwrap_or_default();
        let location = format!("/{}/{}", address.collection, id);
        tracing::debug!("Created {}", location);

        Ok(
            ApiResponse::json(StatusCode::CREATED, &created.into_value())
                .with_header(header::LOCATION, location),
        )
    }

    async fn replace(
        &self,
        address: &ResourceAddress,
        id: i64,
        mut record: Record,
    ) -> Result<ApiResponse, ApiError> {
        record.set_id(id);

        let replaced = self
            .store
            .atomic_modify(&address.collection, move |mut records| {
                let slot = records.iter_mut().find(|r| r.id() == Some(id));
                let found = slot.is_some();
                if let Some(slot) = slot {
                    *slot = record;
                }
                (records, found)
            })
            .await?;

        Ok(ApiResponse::empty(if replaced {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::NOT_FOUND
        }))
    }

    async fn delete(&self, address: &ResourceAddress) -> Result<ApiResponse, ApiError> {
        let filter = address.filter.clone();

        let removed = self
            .store
            .atomic_modify(&address.collection, move |mut records| {
                let before = records.len();
                records.retain(|r| !filter.matches(r));
                let shrank = records.len() != before;
                (records, shrank)
            })
            .await?;

        Ok(ApiResponse::empty(if removed {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::NOT_FOUND
        }))
    }
}

/// Decode a request body that must be a single JSON object.
fn decode_object(body: &[u8], method: &str) -> Result<Record, ApiError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(fields) => Ok(Record::from(fields)),
        Value::Array(_) => Err(ApiError::validation(format!("{} with array!", method))),
        _ => Err(ApiError::validation(format!(
            "{} body must be a JSON object",
            method
        ))),
    }
}
