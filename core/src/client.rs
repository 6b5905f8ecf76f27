//! Stateless HTTP request builder and response parser for the planner API.
//!
//! # Design
//! `PlannerClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation on the `/posts` collection is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. A [`crate::http::Transport`] executes the
//! round-trip in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DraftForm, PlannerId, PlannerRecord};

const COLLECTION: &str = "posts";

/// Synchronous, stateless client for the planner API.
#[derive(Debug, Clone)]
pub struct PlannerClient {
    base_url: String,
}

impl PlannerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_path(&self) -> String {
        format!("{}/{COLLECTION}", self.base_url)
    }

    fn record_path(&self, id: &PlannerId) -> String {
        format!("{}/{COLLECTION}/{id}", self.base_url)
    }

    pub fn build_list_planners(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_planner(&self, id: &PlannerId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.record_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_planner(&self, draft: &DraftForm) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: json_headers(),
            body: Some(encode(draft)?),
        })
    }

    pub fn build_update_planner(
        &self,
        id: &PlannerId,
        draft: &DraftForm,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.record_path(id),
            headers: json_headers(),
            body: Some(encode(draft)?),
        })
    }

    pub fn build_delete_planner(&self, id: &PlannerId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.record_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_planners(&self, response: HttpResponse) -> Result<Vec<PlannerRecord>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_planner(&self, response: HttpResponse) -> Result<PlannerRecord, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create_planner(&self, response: HttpResponse) -> Result<PlannerRecord, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_update_planner(&self, response: HttpResponse) -> Result<PlannerRecord, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Delete responses carry no contract beyond the status; any body is ignored.
    pub fn parse_delete_planner(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(draft: &DraftForm) -> Result<String, ApiError> {
    serde_json::to_string(draft).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
