//! Pass-through to the managed auth service. No tokens are minted or
//! verified locally.

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::{check, Backend, BackendError};

pub struct AuthApi<'a> {
    pub(super) backend: &'a Backend,
}

/// Session payload exactly as issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthApi<'_> {
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.session_request("signup", email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.session_request("token?grant_type=password", email, password).await
    }

    /// Resolves a bearer token to the user it was issued for.
    pub async fn get_user(&self, token: &str) -> Result<AuthUser, BackendError> {
        let url = format!("{}/auth/v1/user", self.backend.base_url);
        let resp = self
            .backend
            .http
            .get(url)
            .header("apikey", &self.backend.anon_key)
            .bearer_auth(token)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn session_request(
        &self,
        path_and_query: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let url = format!("{}/auth/v1/{}", self.backend.base_url, path_and_query);
        let resp = self
            .backend
            .http
            .post(url)
            .header("apikey", &self.backend.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }
}
