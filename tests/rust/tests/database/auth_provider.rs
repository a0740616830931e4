//! SqliteAuthProvider integration tests

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quadra_core::{AuthContext, AuthError, ProfileUpdate};
use quadra_storage::{PasswordHasher, SqliteAuthProvider};
use tests::db::TestDatabase;
use tokio::sync::Mutex;

fn auth_context(test_db: TestDatabase) -> AuthContext {
    let provider = SqliteAuthProvider::with_hasher(
        Arc::new(Mutex::new(test_db.db)),
        PasswordHasher::with_iterations(1_000),
    );
    AuthContext::new(Arc::new(provider))
}

#[tokio::test]
async fn test_account_lifecycle() {
    let auth = auth_context(TestDatabase::new());

    let user = auth
        .sign_up("ana@example.com", "secret123", Some("Ana"))
        .await
        .unwrap();
    assert_eq!(auth.current_user(), Some(user.clone()));

    let updated = auth
        .update_user_profile(&ProfileUpdate {
            photo_url: Some("https://img.example/ana.png".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.display_name.as_deref(), Some("Ana"));
    assert_eq!(auth.current_user(), Some(updated));

    auth.change_password("secret123", "newsecret").await.unwrap();
    auth.logout();
    assert_eq!(auth.current_user(), None);

    assert_eq!(
        auth.sign_in("ana@example.com", "secret123").await,
        Err(AuthError::InvalidCredentials)
    );
    let again = auth.sign_in("ana@example.com", "newsecret").await.unwrap();
    assert_eq!(again.uid, user.uid);
}

#[tokio::test]
async fn test_passwords_are_not_stored_in_clear() {
    let test_db = TestDatabase::new();
    let (db, _dir) = test_db.into_shared();
    let provider = SqliteAuthProvider::with_hasher(db.clone(), PasswordHasher::with_iterations(1_000));
    let auth = AuthContext::new(Arc::new(provider));

    auth.sign_up("ana@example.com", "secret123", None)
        .await
        .unwrap();

    let db = db.lock().await;
    let (hash, salt): (String, String) = db
        .connection()
        .query_row(
            "SELECT password_hash, password_salt FROM users WHERE email = 'ana@example.com'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_ne!(hash, "secret123");
    assert_eq!(hash.len(), 64);
    assert_eq!(salt.len(), 32);
}
