//! Account service, application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use bcrypt::DEFAULT_COST;
use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, NewUser, RepositoryProvider, UserAccount, UserProfile,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Validated registration input with the plain password
#[derive(Debug, Clone)]
pub struct Registration {
    pub student_id: String,
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub password: String,
}

pub struct AccountService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    password_cost: u32,
}

impl AccountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self {
            repos,
            jwt_config,
            password_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password_with_cost(password, self.password_cost)
            .map_err(|e| DomainError::Crypto(format!("Failed to hash password: {}", e)))
    }

    fn issue(&self, user: UserAccount) -> DomainResult<AuthResult> {
        let token = create_token(&user, &self.jwt_config)
            .map_err(|e| DomainError::Crypto(format!("Failed to create token: {}", e)))?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in(),
            user: user.into(),
        })
    }

    /// Create a student account. Conflicts on a taken student id or email.
    pub async fn register(&self, registration: Registration) -> DomainResult<UserProfile> {
        let password_hash = self.hash(&registration.password)?;

        let user = self
            .repos
            .users()
            .create(NewUser {
                student_id: registration.student_id.trim().to_string(),
                first_names: registration.first_names.trim().to_string(),
                last_names: registration.last_names.trim().to_string(),
                email: registration.email.trim().to_lowercase(),
                password_hash,
            })
            .await?;

        Ok(user.into())
    }

    /// Authenticate by student id + password and return a JWT.
    pub async fn login(&self, student_id: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repos.users().find_by_student_id(student_id.trim()).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            warn!(student_id = %user.student_id, "Failed login attempt");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        info!(user_id = user.id, "User logged in");
        self.issue(user)
    }

    /// Replace the password when student id and email belong to the same account.
    pub async fn reset_password(
        &self,
        student_id: &str,
        email: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self
            .repos
            .users()
            .find_by_student_id(student_id.trim())
            .await?
            .filter(|user| user.email.eq_ignore_ascii_case(email.trim()));

        let Some(user) = user else {
            return Err(DomainError::Validation(
                "Student id and email do not match".into(),
            ));
        };

        let password_hash = self.hash(new_password)?;
        self.repos.users().update_password(user.id, &password_hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_support::migrated_connection;
    use crate::infrastructure::crypto::verify_token;

    async fn service() -> AccountService {
        let db = migrated_connection().await;
        AccountService::new(
            Arc::new(SeaOrmRepositoryProvider::new(db)),
            JwtConfig::new("test-secret", 1),
        )
        .with_password_cost(4)
    }

    fn registration(student_id: &str, email: &str) -> Registration {
        Registration {
            student_id: student_id.into(),
            first_names: " Ana ".into(),
            last_names: "Diaz".into(),
            email: email.into(),
            password: "secret123".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let service = service().await;
        let profile = service
            .register(registration("202400001", "Ana@Example.com"))
            .await
            .unwrap();
        assert_eq!(profile.first_names, "Ana");
        assert_eq!(profile.email, "ana@example.com");

        let auth = service.login("202400001", "secret123").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 3600);
        assert_eq!(auth.user.id, profile.id);

        let claims = verify_token(&auth.token, service.jwt_config()).unwrap();
        assert_eq!(claims.user_id(), Some(profile.id));
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let service = service().await;
        service
            .register(registration("202400001", "ana@example.com"))
            .await
            .unwrap();

        let wrong = service.login("202400001", "nope").await;
        assert!(matches!(wrong, Err(DomainError::Unauthorized(_))));
        let unknown = service.login("999", "secret123").await;
        assert!(matches!(unknown, Err(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let service = service().await;
        service
            .register(registration("202400001", "ana@example.com"))
            .await
            .unwrap();
        let again = service
            .register(registration("202400001", "other@example.com"))
            .await;
        assert!(matches!(again, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn reset_requires_matching_email() {
        let service = service().await;
        service
            .register(registration("202400001", "ana@example.com"))
            .await
            .unwrap();

        let mismatch = service
            .reset_password("202400001", "someone@example.com", "changed1")
            .await;
        assert!(matches!(mismatch, Err(DomainError::Validation(_))));

        service
            .reset_password("202400001", "ANA@example.com", "changed1")
            .await
            .unwrap();
        assert!(service.login("202400001", "changed1").await.is_ok());
        assert!(service.login("202400001", "secret123").await.is_err());
    }
}
