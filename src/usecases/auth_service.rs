//! Mock sign-in gate. Demo accounts only; nothing is enforced after login.

use crate::domain::{DomainError, User, UserRole};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub const INVALID_CREDENTIALS: &str =
    "Invalid credentials. Please check the demo accounts below.";

/// Demo accounts shown on the login screen: (label, email, password).
pub const DEMO_CREDENTIALS: [(&str, &str, &str); 4] = [
    ("Admin", "admin@medcore.com", "admin123"),
    ("User", "user@medcore.com", "user123"),
    ("Guest", "guest@medcore.com", "guest123"),
    ("Doctor", "doc@medcore.com", "admin123"),
];

/// Shared demo password per role. Receptionists have none.
fn accepts(role: UserRole, password: &str) -> bool {
    match role {
        UserRole::Admin | UserRole::Doctor | UserRole::Nurse => password == "admin123",
        UserRole::Guest => password == "guest123",
        UserRole::User => password == "user123",
        UserRole::Receptionist => false,
    }
}

pub struct AuthService {
    users: Vec<User>,
    delay: Duration,
    current: RwLock<Option<User>>,
}

impl AuthService {
    pub fn new(users: Vec<User>, delay: Duration) -> Self {
        Self {
            users,
            delay,
            current: RwLock::new(None),
        }
    }

    /// Check the pair after a simulated round trip and open the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        tokio::time::sleep(self.delay).await;

        let email = email.trim();
        let user = self
            .users
            .iter()
            .find(|u| u.email == email)
            .filter(|u| accepts(u.role, password));

        match user {
            Some(user) => {
                info!(user_id = %user.id, role = ?user.role, "signed in");
                *self.current.write().await = Some(user.clone());
                Ok(user.clone())
            }
            None => {
                warn!(email, "sign-in rejected");
                Err(DomainError::Auth(INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    pub async fn logout(&self) {
        if let Some(user) = self.current.write().await.take() {
            info!(user_id = %user.id, "signed out");
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::seed;

    fn service() -> AuthService {
        AuthService::new(seed::users(), Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_demo_credentials_all_work() {
        let auth = service();
        for (_, email, password) in DEMO_CREDENTIALS {
            let user = auth.login(email, password).await.unwrap();
            assert_eq!(user.email, email);
        }
        let nurse = auth.login("nurse@medcore.com", "admin123").await.unwrap();
        assert_eq!(nurse.role, UserRole::Nurse);
    }

    #[tokio::test]
    async fn test_wrong_role_password() {
        let auth = service();
        let err = auth.login("guest@medcore.com", "admin123").await.unwrap_err();
        assert_eq!(err, DomainError::Auth(INVALID_CREDENTIALS.to_string()));
        assert!(auth.login("user@medcore.com", "guest123").await.is_err());
        assert!(auth.login("nobody@medcore.com", "admin123").await.is_err());
        assert!(!auth.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_receptionist_never_accepted() {
        let mut users = seed::users();
        users.push(User {
            id: "u6".into(),
            name: "Front Desk".into(),
            role: UserRole::Receptionist,
            email: "desk@medcore.com".into(),
            avatar: None,
        });
        let auth = AuthService::new(users, Duration::ZERO);
        for pw in ["admin123", "guest123", "user123"] {
            assert!(auth.login("desk@medcore.com", pw).await.is_err());
        }
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let auth = service();
        auth.login("admin@medcore.com", "admin123").await.unwrap();
        assert_eq!(
            auth.current_user().await.map(|u| u.name),
            Some("Dr. Gregory House".to_string())
        );
        auth.logout().await;
        assert!(auth.current_user().await.is_none());
    }
}
