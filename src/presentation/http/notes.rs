use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::notes::bulk_complete::BulkComplete;
use crate::application::use_cases::notes::bulk_delete::BulkDelete;
use crate::application::use_cases::notes::create_note::CreateNote;
use crate::application::use_cases::notes::delete_note::DeleteNote;
use crate::application::use_cases::notes::get_note::GetNote;
use crate::application::use_cases::notes::list_notes::ListNotes;
use crate::application::use_cases::notes::toggle_completed::ToggleCompleted;
use crate::application::use_cases::notes::update_note::UpdateNote;
use crate::application::validation::{self, ValidationError};
use crate::bootstrap::app_context::AppContext;
use crate::domain::notes::note::{Note, NotePage};
use crate::domain::notes::sort::SortKey;
use crate::presentation::http::auth::{Bearer, Claims, verify_bearer};
use crate::presentation::http::error::{ApiError, ApiResult, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "editedAt")]
    pub edited_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed: bool,
    #[serde(rename = "completedAt")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "_ownerId")]
    pub owner_id: Uuid,
}

impl From<Note> for NoteResponse {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            title: n.title,
            content: n.content,
            created_at: n.created_at,
            edited_at: n.edited_at,
            completed: n.completed,
            completed_at: n.completed_at,
            owner_id: n.owner_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotePageResponse {
    #[serde(rename = "totalCount")]
    pub total_count: i64,
    pub notes: Vec<NoteResponse>,
}

impl From<NotePage> for NotePageResponse {
    fn from(p: NotePage) -> Self {
        Self {
            total_count: p.total_count,
            notes: p.notes.into_iter().map(NoteResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub data: UpdateNoteData,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNoteData {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// The completion route takes the whole note back; only the fields the
/// toggle needs are read, the rest is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ToggleNoteRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaginationAndSorting {
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    #[serde(rename = "sortOrder")]
    pub sort_order: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkNoteRequest {
    pub data: Vec<Uuid>,
    #[serde(rename = "paginationAndSorting")]
    pub pagination_and_sorting: PaginationAndSorting,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/create", post(create_note))
        .route(
            "/getNotesByOwnerId/:ownerId/page/:page/pageSize/:pageSize/sortOrder/:sortOrder",
            get(list_notes),
        )
        .route("/getNoteById/:noteId", get(get_note))
        .route("/update/:noteId", post(update_note))
        .route("/delete/:noteId", delete(delete_note))
        .route("/completed/:noteId", post(toggle_completed))
        .route("/tableCompleted", post(bulk_complete))
        .route("/tableDeleteNotes", delete(bulk_delete))
        .with_state(ctx)
}

fn owner_from_claims(claims: &Claims) -> Result<Uuid, ApiError> {
    Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized("Unauthorized".into()))
}

fn required_title(title: Option<&str>) -> Result<String, ValidationError> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(t.trim().to_string()),
        _ => Err(ValidationError::MissingTitle),
    }
}

#[utoipa::path(post, path = "/notes/create", tag = "Notes", request_body = CreateNoteRequest, responses(
    (status = 201, body = NoteResponse),
    (status = 400, body = ErrorBody),
    (status = 401, body = ErrorBody)
))]
pub async fn create_note(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    let claims = verify_bearer(&ctx.cfg, bearer)?;
    // The owner is whoever the token says, not whatever the body claims.
    let owner_id = owner_from_claims(&claims)?;

    let title = req.title.trim().to_string();
    let content = req.content.trim().to_string();
    validation::validate_note_fields(&title, &content)?;

    let repo = ctx.note_repo();
    let uc = CreateNote {
        repo: repo.as_ref(),
    };
    let note = uc.execute(owner_id, &title, &content).await?;
    Ok((StatusCode::CREATED, Json(note.into())))
}

#[utoipa::path(get, path = "/notes/getNotesByOwnerId/{ownerId}/page/{page}/pageSize/{pageSize}/sortOrder/{sortOrder}", tag = "Notes",
    params(
        ("ownerId" = Uuid, Path, description = "Note owner"),
        ("page" = i64, Path, description = "Zero-based page"),
        ("pageSize" = i64, Path, description = "Page window size"),
        ("sortOrder" = String, Path, description = "Sort key, e.g. created_desc")
    ),
    responses((status = 200, body = NotePageResponse), (status = 400, body = ErrorBody)))]
pub async fn list_notes(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((owner_id, page, page_size, sort_order)): Path<(Uuid, i64, i64, String)>,
) -> ApiResult<Json<NotePageResponse>> {
    verify_bearer(&ctx.cfg, bearer)?;
    if page < 0 || page_size <= 0 {
        return Err(ApiError::InvalidArgument(
            "page must be non-negative and pageSize positive".into(),
        ));
    }
    let sort = SortKey::parse(&sort_order);

    let repo = ctx.note_repo();
    let uc = ListNotes {
        repo: repo.as_ref(),
    };
    let notes = uc.execute(owner_id, page, page_size, sort).await?;
    Ok(Json(notes.into()))
}

#[utoipa::path(get, path = "/notes/getNoteById/{noteId}", tag = "Notes",
    params(("noteId" = Uuid, Path, description = "Note ID")),
    responses((status = 200, body = NoteResponse), (status = 404, body = ErrorBody)))]
pub async fn get_note(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(note_id): Path<Uuid>,
) -> ApiResult<Json<NoteResponse>> {
    verify_bearer(&ctx.cfg, bearer)?;
    let repo = ctx.note_repo();
    let uc = GetNote {
        repo: repo.as_ref(),
    };
    let note = uc
        .execute(note_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".into()))?;
    Ok(Json(note.into()))
}

#[utoipa::path(post, path = "/notes/update/{noteId}", tag = "Notes", request_body = UpdateNoteRequest,
    params(("noteId" = Uuid, Path, description = "Note ID")),
    responses((status = 200, body = NoteResponse), (status = 400, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn update_note(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(note_id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    verify_bearer(&ctx.cfg, bearer)?;
    let title = required_title(req.data.title.as_deref())?;
    let content = req
        .data
        .content
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_string();
    validation::validate_note_fields(&title, &content)?;

    let repo = ctx.note_repo();
    let uc = UpdateNote {
        repo: repo.as_ref(),
    };
    let note = uc
        .execute(note_id, &title, &content)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".into()))?;
    Ok(Json(note.into()))
}

#[utoipa::path(delete, path = "/notes/delete/{noteId}", tag = "Notes",
    params(("noteId" = Uuid, Path, description = "Note ID")),
    responses((status = 200, body = NoteResponse), (status = 404, body = ErrorBody)))]
pub async fn delete_note(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(note_id): Path<Uuid>,
) -> ApiResult<Json<NoteResponse>> {
    verify_bearer(&ctx.cfg, bearer)?;
    let repo = ctx.note_repo();
    let uc = DeleteNote {
        repo: repo.as_ref(),
    };
    let note = uc
        .execute(note_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".into()))?;
    Ok(Json(note.into()))
}

#[utoipa::path(post, path = "/notes/completed/{noteId}", tag = "Notes", request_body = ToggleNoteRequest,
    params(("noteId" = Uuid, Path, description = "Note ID")),
    responses((status = 200, body = NoteResponse), (status = 400, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn toggle_completed(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(note_id): Path<Uuid>,
    Json(req): Json<ToggleNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    verify_bearer(&ctx.cfg, bearer)?;
    // A payload without these fields used to hang the request; now it fails.
    required_title(req.title.as_deref())?;
    let currently_completed = req.completed.ok_or(ValidationError::MissingCompleted)?;

    let repo = ctx.note_repo();
    let uc = ToggleCompleted {
        repo: repo.as_ref(),
    };
    let note = uc
        .execute(note_id, currently_completed)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".into()))?;
    Ok(Json(note.into()))
}

#[utoipa::path(post, path = "/notes/tableCompleted", tag = "Notes", request_body = BulkNoteRequest,
    responses((status = 200, body = NotePageResponse), (status = 400, body = ErrorBody)))]
pub async fn bulk_complete(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<BulkNoteRequest>,
) -> ApiResult<Json<NotePageResponse>> {
    let claims = verify_bearer(&ctx.cfg, bearer)?;
    let owner_id = owner_from_claims(&claims)?;
    if req.data.is_empty() {
        return Err(ApiError::InvalidArgument(
            "at least one note id is required".into(),
        ));
    }
    let p = &req.pagination_and_sorting;
    let sort = SortKey::parse(&p.sort_order);

    let repo = ctx.note_repo();
    let uc = BulkComplete {
        repo: repo.as_ref(),
    };
    let page = uc
        .execute(&req.data, owner_id, p.page, p.page_size, sort)
        .await?;
    Ok(Json(page.into()))
}

#[utoipa::path(delete, path = "/notes/tableDeleteNotes", tag = "Notes", request_body = BulkNoteRequest,
    responses((status = 200, body = NotePageResponse), (status = 400, body = ErrorBody)))]
pub async fn bulk_delete(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<BulkNoteRequest>,
) -> ApiResult<Json<NotePageResponse>> {
    let claims = verify_bearer(&ctx.cfg, bearer)?;
    let owner_id = owner_from_claims(&claims)?;
    if req.data.is_empty() {
        return Err(ApiError::InvalidArgument(
            "at least one note id is required".into(),
        ));
    }
    let p = &req.pagination_and_sorting;
    let sort = SortKey::parse(&p.sort_order);

    let repo = ctx.note_repo();
    let uc = BulkDelete {
        repo: repo.as_ref(),
    };
    // Whatever page the caller was on, the refreshed listing starts over.
    let page = uc
        .execute(&req.data, owner_id, p.page_size, sort)
        .await?;
    Ok(Json(page.into()))
}
