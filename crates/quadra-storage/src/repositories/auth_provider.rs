//! SQLite implementation of AuthProvider.
//!
//! Local accounts keyed by a generated uid. Emails are stored lowercased so
//! sign-in is case-insensitive on the address.

use std::sync::Arc;

use async_trait::async_trait;
use quadra_core::{AuthError, AuthProvider, ProfileUpdate, UserProfile};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use super::store_error::{auth_store_error, is_constraint_violation};
use crate::crypto::{PasswordHash, PasswordHasher};
use crate::Database;

const PROFILE_COLUMNS: &str = "uid, email, display_name, phone, photo_url";

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        uid: row.get(0)?,
        email: row.get(1)?,
        display_name: row.get(2)?,
        phone: row.get(3)?,
        photo_url: row.get(4)?,
    })
}

fn load_profile(conn: &Connection, uid: &str) -> Result<Option<UserProfile>, AuthError> {
    conn.query_row(
        &format!("SELECT {} FROM users WHERE uid = ?", PROFILE_COLUMNS),
        params![uid],
        profile_from_row,
    )
    .optional()
    .map_err(auth_store_error("get_user"))
}

/// SQLite-backed account store with PBKDF2 password hashes.
pub struct SqliteAuthProvider {
    db: Arc<Mutex<Database>>,
    hasher: PasswordHasher,
}

impl SqliteAuthProvider {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self::with_hasher(db, PasswordHasher::new())
    }

    /// Use a custom hasher (tests lower the iteration count).
    pub fn with_hasher(db: Arc<Mutex<Database>>, hasher: PasswordHasher) -> Self {
        Self { db, hasher }
    }

    fn hash(&self, password: &str) -> Result<PasswordHash, AuthError> {
        self.hasher.hash(password).map_err(|e| {
            warn!(error = %e, "[AuthProvider] Password hashing failed");
            AuthError::Unavailable
        })
    }

    fn verify(&self, password: &str, stored: &PasswordHash) -> Result<(), AuthError> {
        match self.hasher.verify(password, stored) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(e) => {
                warn!(error = %e, "[AuthProvider] Stored password hash is unreadable");
                Err(AuthError::Unavailable)
            }
        }
    }

    async fn stored_hash_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(String, PasswordHash)>, AuthError> {
        let db = self.db.lock().await;
        db.connection()
            .query_row(
                "SELECT uid, password_hash, password_salt FROM users WHERE email = ?",
                params![email],
                |row| {
                    Ok((
                        row.get(0)?,
                        PasswordHash {
                            hash_hex: row.get(1)?,
                            salt_hex: row.get(2)?,
                        },
                    ))
                },
            )
            .optional()
            .map_err(auth_store_error("sign_in"))
    }

    async fn stored_hash_by_uid(&self, uid: &str) -> Result<Option<PasswordHash>, AuthError> {
        let db = self.db.lock().await;
        db.connection()
            .query_row(
                "SELECT password_hash, password_salt FROM users WHERE uid = ?",
                params![uid],
                |row| {
                    Ok(PasswordHash {
                        hash_hex: row.get(0)?,
                        salt_hex: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(auth_store_error("change_password"))
    }
}

#[async_trait]
impl AuthProvider for SqliteAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let email = normalize_email(email);

        // Unknown email and wrong password are indistinguishable to the caller
        let (uid, stored) = self
            .stored_hash_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        self.verify(password, &stored)?;

        let db = self.db.lock().await;
        let profile = load_profile(db.connection(), &uid)?.ok_or(AuthError::UserNotFound)?;

        info!(uid = %profile.uid, "[AuthProvider] Signed in");
        Ok(profile)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<UserProfile, AuthError> {
        let email = normalize_email(email);
        let stored = self.hash(password)?;
        let uid = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        let db = self.db.lock().await;
        db.connection()
            .execute(
                "INSERT INTO users (uid, email, password_hash, password_salt, display_name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![uid, email, stored.hash_hex, stored.salt_hex, display_name, now],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    AuthError::EmailInUse
                } else {
                    auth_store_error("sign_up")(e)
                }
            })?;

        info!(uid = %uid, "[AuthProvider] Registered account");

        let mut profile = UserProfile::new(uid, email);
        profile.display_name = display_name.map(str::to_string);
        Ok(profile)
    }

    async fn change_password(
        &self,
        uid: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let stored = self
            .stored_hash_by_uid(uid)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        self.verify(current_password, &stored)?;

        let replacement = self.hash(new_password)?;

        let db = self.db.lock().await;
        let changed = db
            .connection()
            .execute(
                "UPDATE users SET password_hash = ?2, password_salt = ?3, updated_at = ?4 WHERE uid = ?1",
                params![
                    uid,
                    replacement.hash_hex,
                    replacement.salt_hex,
                    chrono::Utc::now().to_rfc3339()
                ],
            )
            .map_err(auth_store_error("change_password"))?;

        if changed == 0 {
            return Err(AuthError::UserNotFound);
        }

        info!(uid, "[AuthProvider] Password changed");
        Ok(())
    }

    async fn update_profile(
        &self,
        uid: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AuthError> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut profile = load_profile(conn, uid)?.ok_or(AuthError::UserNotFound)?;
        profile.apply(update);

        conn.execute(
            "UPDATE users SET display_name = ?2, phone = ?3, photo_url = ?4, updated_at = ?5 WHERE uid = ?1",
            params![
                uid,
                profile.display_name,
                profile.phone,
                profile.photo_url,
                chrono::Utc::now().to_rfc3339()
            ],
        )
        .map_err(auth_store_error("update_profile"))?;

        info!(uid, "[AuthProvider] Profile updated");
        Ok(profile)
    }

    async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>, AuthError> {
        let db = self.db.lock().await;
        load_profile(db.connection(), uid)
    }
}
