//! Stateless HTTP request builder and response parser for the user API.
//!
//! # Design
//! `UserApi` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The round-trip in between belongs to a `Transport`, keeping this layer
//! deterministic and free of I/O.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewPerson, UserRecord};

/// Request builder / response parser for `user/` routes.
#[derive(Debug, Clone)]
pub struct UserApi {
    base_url: String,
}

impl UserApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_user(&self, input: &NewPerson) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/user/", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_get_user(&self, user_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.user_url(user_id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_delete_user(&self, user_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.user_url(user_id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Returns the server-assigned identifier of the created user.
    pub fn parse_create_user(&self, response: HttpResponse) -> Result<String, ApiError> {
        if response.status != 201 {
            return Err(http_error(response));
        }
        let record: UserRecord = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::ProtocolViolation(format!("create response is not a user record: {e}")))?;
        record
            .user_id()
            .ok_or_else(|| ApiError::ProtocolViolation("create response has no `@id`".to_string()))
    }

    pub fn parse_get_user(&self, user_id: &str, response: HttpResponse) -> Result<UserRecord, ApiError> {
        match response.status {
            200 => serde_json::from_str(&response.body)
                .map_err(|e| ApiError::ProtocolViolation(format!("user {user_id} is not a user record: {e}"))),
            404 => Err(not_found(user_id, response)),
            _ => Err(http_error(response)),
        }
    }

    pub fn parse_delete_user(&self, user_id: &str, response: HttpResponse) -> Result<(), ApiError> {
        match response.status {
            200 | 204 => Ok(()),
            404 => Err(not_found(user_id, response)),
            _ => Err(http_error(response)),
        }
    }

    /// The id is percent-encoded so it always addresses a single path segment.
    fn user_url(&self, user_id: &str) -> String {
        format!("{}/user/{}", self.base_url, urlencoding::encode(user_id))
    }
}

fn not_found(user_id: &str, response: HttpResponse) -> ApiError {
    ApiError::NotFound {
        user_id: user_id.to_string(),
        body: response.body,
    }
}

fn http_error(response: HttpResponse) -> ApiError {
    ApiError::HttpError {
        status: response.status,
        body: response.body,
    }
}
