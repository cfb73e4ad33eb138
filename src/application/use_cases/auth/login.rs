use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// `Ok(None)` covers both an unknown email and a wrong password, so the
    /// boundary can answer with one indistinguishable message for either.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<UserRow>> {
        let row = match self.repo.find_by_email(&req.email).await? {
            Some(r) => r,
            None => return Ok(None),
        };
        let hash = row.password_hash.clone().unwrap_or_default();
        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(UserRow {
                password_hash: None,
                ..row
            }))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};
    use crate::application::use_cases::auth::testing::InMemoryUserRepo;

    async fn seeded_repo() -> InMemoryUserRepo {
        let repo = InMemoryUserRepo::default();
        let uc = Register { repo: &repo };
        uc.execute(&RegisterRequest {
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password: "s3cret".into(),
        })
        .await
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn correct_credentials_yield_the_user_without_the_hash() {
        let repo = seeded_repo().await;
        let uc = Login { repo: &repo };
        let user = uc
            .execute(&LoginRequest {
                email: "ada@example.com".into(),
                password: "s3cret".into(),
            })
            .await
            .unwrap()
            .expect("login should succeed");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.password_hash.is_none());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let repo = seeded_repo().await;
        let uc = Login { repo: &repo };

        let wrong_password = uc
            .execute(&LoginRequest {
                email: "ada@example.com".into(),
                password: "nope".into(),
            })
            .await
            .unwrap();
        let unknown_email = uc
            .execute(&LoginRequest {
                email: "nobody@example.com".into(),
                password: "s3cret".into(),
            })
            .await
            .unwrap();

        assert!(wrong_password.is_none());
        assert!(unknown_email.is_none());
    }
}
