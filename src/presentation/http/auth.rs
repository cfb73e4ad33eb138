use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::user_repository::UserRow;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::application::validation;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::{ApiError, ApiResult, ErrorBody, is_unique_violation};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Identity claims embedded in a bearer token; downstream handlers treat
/// `sub` as the acting owner id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = TokenResponse),
    (status = 400, body = ErrorBody)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    validation::validate_email(&req.email)?;
    validation::validate_password(&req.password)?;

    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        password: req.password,
    };
    let user = uc.execute(&dto).await.map_err(|err| {
        if is_unique_violation(&err) {
            ApiError::DuplicateEmail
        } else {
            ApiError::Internal(err)
        }
    })?;
    let token = issue_token(&ctx.cfg, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token: token,
        }),
    ))
}

#[utoipa::path(post, path = "/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = TokenResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    // One message for unknown email and wrong password alike.
    let user = uc
        .execute(&dto)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect email or password".into()))?;
    let token = issue_token(&ctx.cfg, &user)?;
    Ok(Json(TokenResponse {
        access_token: token,
    }))
}

pub fn issue_token(cfg: &Config, user: &UserRow) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        exp: now + (cfg.jwt_expires_secs as usize),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|err| ApiError::Internal(err.into()))
}

// --- Bearer extractor & token verification ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.to_string()));
            }
        }
        Err(ApiError::Unauthorized("Unauthorized".into()))
    }
}

/// Gate for note routes: a handler only runs once the bearer signature
/// checks out and the claims are extracted.
pub fn verify_bearer(cfg: &Config, bearer: Bearer) -> Result<Claims, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized("Unauthorized".into()))?;
    Ok(data.claims)
}
