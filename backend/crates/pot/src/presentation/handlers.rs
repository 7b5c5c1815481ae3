//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::application::config::PotConfig;
use crate::application::leaderboard::ListWinnersUseCase;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::record_purchase::{RecordPurchaseInput, RecordPurchaseUseCase};
use crate::application::select_winner::SelectWinnerUseCase;
use crate::domain::entity::winner::Winner;
use crate::domain::repository::{PurchaseRepository, UserRepository, WinnerRepository};
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{PotError, PotResult};
use crate::presentation::dto::{
    AddWinnerRequest, LoginRequest, LoginResponse, MessageResponse, PurchaseDto, PurchaseRequest,
    StatsResponse, UpdateRoleRequest, UserDto, WinnerDto,
};
use crate::presentation::middleware::{AdminUser, CurrentUser};

/// Shared handler state
pub struct PotAppState<R>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<PotConfig>,
}

impl<R> Clone for PotAppState<R>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Public
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<PotAppState<R>>,
    Json(body): Json<LoginRequest>,
) -> PotResult<Json<LoginResponse>>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.config));
    let output = use_case
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}

/// POST /auth/logout
///
/// Tokens are not tracked server side, so there is nothing to revoke;
/// the client discards its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}

/// GET /leaderboard
pub async fn leaderboard<R>(
    State(state): State<PotAppState<R>>,
) -> PotResult<Json<Vec<WinnerDto>>>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListWinnersUseCase::new(Arc::clone(&state.repo));
    let winners = use_case.execute().await?;

    Ok(Json(winners.into_iter().map(WinnerDto::from).collect()))
}

// ============================================================================
// Authenticated
// ============================================================================

/// POST /purchase
pub async fn record_purchase<R>(
    State(state): State<PotAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<PurchaseRequest>,
) -> PotResult<(StatusCode, Json<MessageResponse>)>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    tracing::debug!(user_id = %user.user_id, "Purchase submitted");

    let use_case = RecordPurchaseUseCase::new(Arc::clone(&state.repo));
    use_case
        .execute(RecordPurchaseInput {
            username: body.username,
            pot_amount: body.pot_amount,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Purchase recorded successfully")),
    ))
}

// ============================================================================
// Admin
// ============================================================================

/// POST /admin/add-winner
pub async fn add_winner<R>(
    State(state): State<PotAppState<R>>,
    AdminUser(_): AdminUser,
    Json(body): Json<AddWinnerRequest>,
) -> PotResult<(StatusCode, Json<MessageResponse>)>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let winner = Winner::new(body.username, body.month, body.amount);
    WinnerRepository::create(state.repo.as_ref(), &winner).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Monthly winner added successfully")),
    ))
}

/// POST /admin/pick-winner
pub async fn pick_winner<R>(
    State(state): State<PotAppState<R>>,
    AdminUser(_): AdminUser,
) -> PotResult<Json<MessageResponse>>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let use_case = SelectWinnerUseCase::new(Arc::clone(&state.repo));
    let mut rng = StdRng::from_os_rng();
    use_case.execute(&mut rng).await?;

    Ok(Json(MessageResponse::new(
        "Monthly winner picked successfully",
    )))
}

/// GET /admin/stats
pub async fn stats<R>(
    State(state): State<PotAppState<R>>,
    AdminUser(_): AdminUser,
) -> PotResult<Json<StatsResponse>>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let total_winners = WinnerRepository::count(state.repo.as_ref()).await?;
    let total_purchases = PurchaseRepository::count(state.repo.as_ref()).await?;

    Ok(Json(StatsResponse {
        total_winners,
        total_purchases,
    }))
}

/// GET /admin/purchases
pub async fn list_purchases<R>(
    State(state): State<PotAppState<R>>,
    AdminUser(_): AdminUser,
) -> PotResult<Json<Vec<PurchaseDto>>>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let purchases = PurchaseRepository::list(state.repo.as_ref()).await?;

    Ok(Json(purchases.into_iter().map(PurchaseDto::from).collect()))
}

/// GET /admin/users
pub async fn list_users<R>(
    State(state): State<PotAppState<R>>,
    AdminUser(_): AdminUser,
) -> PotResult<Json<Vec<UserDto>>>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let users = UserRepository::list(state.repo.as_ref()).await?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// DELETE /admin/users/{user_id}
///
/// Deleting an absent user still returns 200; the end state is the same.
pub async fn delete_user<R>(
    State(state): State<PotAppState<R>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> PotResult<Json<MessageResponse>>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let deleted = state.repo.delete(&UserId::from_uuid(user_id)).await?;

    tracing::info!(
        admin_id = %admin.user_id,
        target = %user_id,
        rows = deleted,
        "User delete requested"
    );

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// PUT /admin/users/{user_id}/role
pub async fn update_user_role<R>(
    State(state): State<PotAppState<R>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateRoleRequest>,
) -> PotResult<Json<UserDto>>
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let role = UserRole::from_code(&body.role).ok_or_else(|| PotError::InvalidRole(body.role))?;

    let user = state
        .repo
        .update_role(&UserId::from_uuid(user_id), role)
        .await?
        .ok_or(PotError::UserNotFound)?;

    tracing::info!(
        admin_id = %admin.user_id,
        target = %user_id,
        role = role.code(),
        "User role updated"
    );

    Ok(Json(UserDto::from(user)))
}
