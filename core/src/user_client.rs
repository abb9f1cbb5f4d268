//! The `User` lifecycle client.
//!
//! # Design
//! `UserClient` pairs a `UserApi` (pure request/response mapping) with a
//! `Transport` (the network), and reconciles the server's answer into the
//! caller's `User`. Preconditions are checked before anything is sent, and a
//! failed operation never leaves the local value half-updated.

use tracing::{debug, info, warn};

use crate::client::UserApi;
use crate::config::{AbsentUser, ClientConfig};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewPerson, User};

/// Synchronous client for the auth server's `user/` resource.
#[derive(Debug, Clone)]
pub struct UserClient<T = UreqTransport> {
    api: UserApi,
    transport: T,
    absent_user: AbsentUser,
}

impl UserClient<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config))
    }
}

impl<T: Transport> UserClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            api: UserApi::new(&config.base_url),
            transport,
            absent_user: config.absent_user,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create `user` on the server and store the assigned id in `user.user_id`.
    pub fn create(&self, user: &mut User) -> Result<(), ApiError> {
        let request = self.api.build_create_user(&NewPerson::from(&*user))?;
        let response = self.send(request)?;
        let user_id = self.api.parse_create_user(response).inspect_err(|e| {
            if let ApiError::ProtocolViolation(reason) = e {
                warn!(%reason, "server accepted user without assigning an id");
            }
        })?;
        info!(%user_id, "created user");
        user.user_id = Some(user_id);
        Ok(())
    }

    /// Refresh `name`, `email` and `is_admin` from the server.
    ///
    /// A 404 is reported according to the configured `AbsentUser` mode.
    pub fn get(&self, user: &mut User) -> Result<(), ApiError> {
        let user_id = require_id(user)?.to_string();
        let response = self.send(self.api.build_get_user(&user_id))?;
        match self.api.parse_get_user(&user_id, response) {
            Ok(record) => user.apply_record(record),
            Err(ApiError::NotFound { .. }) if self.absent_user == AbsentUser::Cleared => {
                debug!(%user_id, "user absent on server, clearing local profile");
                user.clear_profile();
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Delete the server record. The local value is left as is; its
    /// `user_id` no longer refers to anything once this returns `Ok`.
    pub fn delete(&self, user: &User) -> Result<(), ApiError> {
        let user_id = require_id(user)?;
        let response = self.send(self.api.build_delete_user(user_id))?;
        self.api.parse_delete_user(user_id, response)?;
        info!(%user_id, "deleted user");
        Ok(())
    }

    pub fn logout(&self, _user: &User) -> Result<(), ApiError> {
        Err(ApiError::NotImplemented("logout"))
    }

    pub fn refresh_token(&self, _user: &mut User) -> Result<(), ApiError> {
        Err(ApiError::NotImplemented("refresh_token"))
    }

    pub fn list_resources(&self, _user: &User) -> Result<Vec<String>, ApiError> {
        Err(ApiError::NotImplemented("list_resources"))
    }

    pub fn list_groups(&self, _user: &User) -> Result<Vec<String>, ApiError> {
        Err(ApiError::NotImplemented("list_groups"))
    }

    pub fn list_policies(&self, _user: &User) -> Result<Vec<String>, ApiError> {
        Err(ApiError::NotImplemented("list_policies"))
    }

    pub fn list_challenges(&self, _user: &User) -> Result<Vec<String>, ApiError> {
        Err(ApiError::NotImplemented("list_challenges"))
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

/// A blank id would address the `user/` collection, so it counts as unset.
fn require_id(user: &User) -> Result<&str, ApiError> {
    user.user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingField("user_id"))
}
