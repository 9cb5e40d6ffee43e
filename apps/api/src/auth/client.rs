use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::auth::{AuthClientError, AuthProvider, AuthUser, Session, SignUpOutcome};

/// REST client for the managed auth service (GoTrue-compatible `/auth/v1`).
#[derive(Clone)]
pub struct GoTrueClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl GoTrueClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, AuthClientError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    /// Turns a non-2xx response into `Rejected`, keeping the service's message.
    async fn check(response: Response) -> Result<Response, AuthClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AuthClientError::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthClientError> {
        let response = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let body: Value = Self::check(response).await?.json().await?;
        let outcome = parse_sign_up(body)?;
        info!("Signed up user {}", outcome.user.id);
        Ok(outcome)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthClientError> {
        let response = self
            .client
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let session: Session = Self::check(response).await?.json().await?;
        debug!("Password sign-in succeeded for user {}", session.user.id);
        Ok(session)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthClientError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthClientError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        match response.status().as_u16() {
            401 | 403 => Err(AuthClientError::InvalidSession),
            _ => Ok(Self::check(response).await?.json().await?),
        }
    }

    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthClientError> {
        Url::parse_with_params(
            &self.endpoint("authorize"),
            &[("provider", provider), ("redirect_to", redirect_to)],
        )
        .map(String::from)
        .map_err(|e| AuthClientError::InvalidUrl(e.to_string()))
    }
}

/// Sign-up answers either with a session (auto-confirm) or with the bare user.
fn parse_sign_up(body: Value) -> Result<SignUpOutcome, AuthClientError> {
    if body.get("access_token").is_some() {
        let session: Session = serde_json::from_value(body).map_err(|e| AuthClientError::Rejected {
            status: 200,
            message: format!("unexpected sign-up response: {e}"),
        })?;
        return Ok(SignUpOutcome {
            user: session.user.clone(),
            session: Some(session),
        });
    }
    let user: AuthUser = serde_json::from_value(body).map_err(|e| AuthClientError::Rejected {
        status: 200,
        message: format!("unexpected sign-up response: {e}"),
    })?;
    Ok(SignUpOutcome { user, session: None })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.msg.or(e.error_description).or(e.message).or(e.error))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Authentication failed".to_string()
            } else {
                body.to_string()
            }
        })
}
