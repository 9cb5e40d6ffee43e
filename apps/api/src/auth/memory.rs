//! In-memory `AuthProvider` used by tests. Tokens are opaque UUID strings.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::{AuthClientError, AuthProvider, AuthUser, Session, SignUpOutcome};

#[derive(Default)]
struct Accounts {
    /// email -> (user, password)
    users: HashMap<String, (AuthUser, String)>,
    /// token -> user
    sessions: HashMap<String, AuthUser>,
}

#[derive(Default)]
pub struct MemoryAuth {
    accounts: Mutex<Accounts>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a user with an active session; returns the user and token.
    pub fn register(&self, email: &str) -> (AuthUser, String) {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        let token = Uuid::new_v4().to_string();
        let mut accounts = self.accounts.lock().expect("auth lock poisoned");
        accounts
            .users
            .insert(email.to_string(), (user.clone(), "password".to_string()));
        accounts.sessions.insert(token.clone(), user.clone());
        (user, token)
    }

    pub fn is_signed_in(&self, token: &str) -> bool {
        self.accounts
            .lock()
            .expect("auth lock poisoned")
            .sessions
            .contains_key(token)
    }

    fn open_session(accounts: &mut Accounts, user: &AuthUser) -> Session {
        let token = Uuid::new_v4().to_string();
        accounts.sessions.insert(token.clone(), user.clone());
        Session {
            access_token: token,
            refresh_token: None,
            expires_in: Some(3600),
            token_type: Some("bearer".to_string()),
            user: user.clone(),
        }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthClientError> {
        let mut accounts = self.accounts.lock().expect("auth lock poisoned");
        if accounts.users.contains_key(email) {
            return Err(AuthClientError::Rejected {
                status: 422,
                message: "User already registered".to_string(),
            });
        }
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        accounts
            .users
            .insert(email.to_string(), (user.clone(), password.to_string()));
        let session = Self::open_session(&mut accounts, &user);
        Ok(SignUpOutcome {
            user,
            session: Some(session),
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthClientError> {
        let mut accounts = self.accounts.lock().expect("auth lock poisoned");
        let user = match accounts.users.get(email) {
            Some((user, stored)) if stored == password => user.clone(),
            _ => {
                return Err(AuthClientError::Rejected {
                    status: 400,
                    message: "Invalid login credentials".to_string(),
                })
            }
        };
        Ok(Self::open_session(&mut accounts, &user))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthClientError> {
        self.accounts
            .lock()
            .expect("auth lock poisoned")
            .sessions
            .remove(access_token)
            .map(|_| ())
            .ok_or(AuthClientError::InvalidSession)
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthClientError> {
        self.accounts
            .lock()
            .expect("auth lock poisoned")
            .sessions
            .get(access_token)
            .cloned()
            .ok_or(AuthClientError::InvalidSession)
    }

    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthClientError> {
        Ok(format!(
            "https://auth.test/authorize?provider={provider}&redirect_to={redirect_to}"
        ))
    }
}
