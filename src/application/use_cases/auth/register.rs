use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> anyhow::Result<UserRow> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        let user = self
            .repo
            .create_user(&req.email, &req.first_name, &req.last_name, &hash)
            .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    use super::*;
    use crate::application::use_cases::auth::testing::InMemoryUserRepo;

    #[tokio::test]
    async fn stores_a_verifiable_salted_hash() {
        let repo = InMemoryUserRepo::default();
        let uc = Register { repo: &repo };
        let req = RegisterRequest {
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password: "s3cret".into(),
        };

        let user = uc.execute(&req).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Lovelace");

        let hash = user.password_hash.unwrap();
        assert_ne!(hash, "s3cret");
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"s3cret", &parsed)
                .is_ok()
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_an_error() {
        let repo = InMemoryUserRepo::default();
        let uc = Register { repo: &repo };
        let req = RegisterRequest {
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password: "s3cret".into(),
        };
        uc.execute(&req).await.unwrap();
        assert!(uc.execute(&req).await.is_err());
    }
}
