//! User service
//!
//! Handles registration, password login, bearer sessions and the startup seeding
//! of roles and default accounts.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{NewSession, NewUser, Role, User};
use crate::domain::ports::UserRepository;
use crate::error::DomainError;

/// Registration data as accepted from the boundary
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub age: i32,
    pub password: String,
    pub confirm_password: String,
}

/// A freshly issued session. The token is only ever shown here.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Accounts created on first start
const DEFAULT_ACCOUNTS: [(&str, &str, &str, i32, Role); 3] = [
    ("admin", "Admin Adminovich", "admin@staffbook.local", 25, Role::Admin),
    (
        "moderator",
        "Moder Moderovich",
        "moderator@staffbook.local",
        24,
        Role::Moderator,
    ),
    ("user", "User Userovich", "user@staffbook.local", 23, Role::User),
];

/// Service for managing users and sessions
pub struct UserService<UR>
where
    UR: UserRepository + ?Sized,
{
    users: Arc<UR>,
    session_ttl: chrono::Duration,
}

impl<UR> UserService<UR>
where
    UR: UserRepository + ?Sized,
{
    pub fn new(users: Arc<UR>, session_ttl: chrono::Duration) -> Self {
        Self { users, session_ttl }
    }

    /// Register a new account with the USER role
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        if registration.password != registration.confirm_password {
            return Err(DomainError::Validation(
                "Password confirmation does not match".to_string(),
            ));
        }

        if self
            .users
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyExists(format!(
                "Username '{}' is already taken",
                registration.username
            )));
        }

        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyExists(format!(
                "Email '{}' is already registered",
                registration.email
            )));
        }

        let user = self
            .users
            .create(&NewUser {
                username: registration.username,
                full_name: registration.full_name,
                email: registration.email,
                age: registration.age,
                password_hash: hash_password(&registration.password)?,
                roles: vec![Role::User],
            })
            .await?;

        tracing::info!(user = %user.username, id = %user.id, "User registered");
        Ok(user)
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginSession, DomainError> {
        let invalid = || DomainError::Unauthorized("Invalid username or password".to_string());

        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(user = %username, "Login for unknown user");
                return Err(invalid());
            }
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(user = %username, "Login with wrong password");
            return Err(invalid());
        }

        self.prune_sessions().await?;

        let token = generate_session_token();
        let expires_at = Utc::now() + self.session_ttl;

        self.users
            .create_session(&NewSession {
                token_hash: hash_token(&token),
                user_id: user.id,
                expires_at,
            })
            .await?;

        tracing::info!(user = %user.username, "User logged in");
        Ok(LoginSession {
            token,
            expires_at,
            user,
        })
    }

    /// Invalidate a bearer token. Returns whether it was live.
    pub async fn logout(&self, token: &str) -> Result<bool, DomainError> {
        self.users.delete_session(&hash_token(token)).await
    }

    /// Resolve a bearer token to its user
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        self.users
            .find_by_session(&hash_token(token), Utc::now())
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Invalid or expired session".to_string()))
    }

    /// Seed the role table, then the default accounts when no user exists yet
    pub async fn bootstrap(&self, default_password: &str) -> Result<(), DomainError> {
        let seeded = self.users.seed_roles(&Role::ALL).await?;
        if seeded > 0 {
            tracing::info!(count = seeded, "Seeded roles");
        }

        self.prune_sessions().await?;

        if self.users.count().await? > 0 {
            return Ok(());
        }

        for (username, full_name, email, age, role) in DEFAULT_ACCOUNTS {
            self.users
                .create(&NewUser {
                    username: username.to_string(),
                    full_name: full_name.to_string(),
                    email: email.to_string(),
                    age,
                    password_hash: hash_password(default_password)?,
                    roles: vec![role],
                })
                .await?;
            tracing::info!(user = %username, role = %role, "Created default account");
        }

        Ok(())
    }

    /// Drop sessions that can no longer authenticate
    async fn prune_sessions(&self) -> Result<(), DomainError> {
        let pruned = self.users.delete_expired_sessions(Utc::now()).await?;
        if pruned > 0 {
            tracing::debug!(count = pruned, "Pruned expired sessions");
        }
        Ok(())
    }
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| DomainError::Internal(format!("Invalid password hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Generate a random bearer token
fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("sb-{}", hex::encode(bytes))
}

/// Hash a bearer token for storage
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
