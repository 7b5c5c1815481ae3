//! Pot crate integration tests
//!
//! Use cases and the full router are exercised against an in-memory
//! repository; the PostgreSQL implementation shares the same traits.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use http_body_util::BodyExt;
use platform::password::ClearTextPassword;
use platform::rate_limit::RateLimitConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::PotConfig;
use crate::application::leaderboard::ListWinnersUseCase;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::select_winner::SelectWinnerUseCase;
use crate::application::token::verify_token;
use crate::domain::entity::{purchase::Purchase, user::User, winner::Winner};
use crate::domain::repository::{PurchaseRepository, UserRepository, WinnerRepository};
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{PotError, PotResult};
use crate::presentation::router::pot_router_generic;

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    purchases: Vec<Purchase>,
    winners: Vec<Winner>,
}

#[derive(Clone, Default)]
struct InMemoryPotRepository {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryPotRepository {
    fn seed_user(&self, email: &str, password: &str, role: UserRole) -> User {
        let hashed = ClearTextPassword::new(password.to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        let user = User::new(Email::new(email).unwrap(), hashed, role);
        self.inner.lock().unwrap().users.push(user.clone());
        user
    }

    fn seed_purchase(&self, username: &str, pot_amount: f64, created_at: DateTime<Utc>) {
        let mut purchase = Purchase::new(username.to_string(), pot_amount);
        purchase.created_at = created_at;
        self.inner.lock().unwrap().purchases.push(purchase);
    }

    fn winners(&self) -> Vec<Winner> {
        self.inner.lock().unwrap().winners.clone()
    }

    fn user_by_id(&self, user_id: &UserId) -> Option<User> {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| &u.user_id == user_id)
            .cloned()
    }
}

impl UserRepository for InMemoryPotRepository {
    async fn create(&self, user: &User) -> PotResult<()> {
        self.inner.lock().unwrap().users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> PotResult<Option<User>> {
        Ok(self.user_by_id(user_id))
    }

    async fn find_by_email(&self, email: &Email) -> PotResult<Option<User>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email.as_str() == email.as_str())
            .cloned())
    }

    async fn list(&self) -> PotResult<Vec<User>> {
        Ok(self.inner.lock().unwrap().users.clone())
    }

    async fn update_role(&self, user_id: &UserId, role: UserRole) -> PotResult<Option<User>> {
        let mut inner = self.inner.lock().unwrap();
        let user = inner.users.iter_mut().find(|u| &u.user_id == user_id);
        Ok(user.map(|u| {
            u.set_role(role);
            u.clone()
        }))
    }

    async fn delete(&self, user_id: &UserId) -> PotResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.users.len();
        inner.users.retain(|u| &u.user_id != user_id);
        Ok((before - inner.users.len()) as u64)
    }
}

impl PurchaseRepository for InMemoryPotRepository {
    async fn create(&self, purchase: &Purchase) -> PotResult<()> {
        self.inner.lock().unwrap().purchases.push(purchase.clone());
        Ok(())
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PotResult<Vec<Purchase>> {
        let mut purchases: Vec<Purchase> = self
            .inner
            .lock()
            .unwrap()
            .purchases
            .iter()
            .filter(|p| p.created_at >= start && p.created_at <= end)
            .cloned()
            .collect();
        purchases.sort_by_key(|p| p.created_at);
        Ok(purchases)
    }

    async fn list(&self) -> PotResult<Vec<Purchase>> {
        Ok(self.inner.lock().unwrap().purchases.clone())
    }

    async fn count(&self) -> PotResult<i64> {
        Ok(self.inner.lock().unwrap().purchases.len() as i64)
    }
}

impl WinnerRepository for InMemoryPotRepository {
    async fn create(&self, winner: &Winner) -> PotResult<()> {
        self.inner.lock().unwrap().winners.push(winner.clone());
        Ok(())
    }

    async fn list_by_month_label(&self) -> PotResult<Vec<Winner>> {
        let mut winners = self.inner.lock().unwrap().winners.clone();
        winners.sort_by(|a, b| a.month.cmp(&b.month));
        Ok(winners)
    }

    async fn count(&self) -> PotResult<i64> {
        Ok(self.inner.lock().unwrap().winners.len() as i64)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_config() -> PotConfig {
    PotConfig::new([7u8; 32])
}

fn current_month_label() -> String {
    Utc::now().format("%B").to_string()
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn login_for_token(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app.clone(),
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

// ============================================================================
// Login use case
// ============================================================================

#[tokio::test]
async fn login_issues_verifiable_token() {
    let repo = InMemoryPotRepository::default();
    let user = repo.seed_user("alice@example.com", "correct horse", UserRole::Member);

    let config = Arc::new(test_config());
    let use_case = LoginUseCase::new(Arc::new(repo), Arc::clone(&config));

    let output = use_case
        .execute(LoginInput {
            email: "alice@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();

    let claims = verify_token(&output.token, &config.token_secret, Utc::now()).unwrap();
    assert_eq!(claims.sub, user.user_id.into_uuid());
    assert_eq!(claims.role, "member");
    assert_eq!(claims.exp - claims.iat, config.token_ttl_secs());
}

#[tokio::test]
async fn login_failure_is_uniform_across_causes() {
    let repo = InMemoryPotRepository::default();
    repo.seed_user("alice@example.com", "correct horse", UserRole::Member);

    let use_case = LoginUseCase::new(Arc::new(repo), Arc::new(test_config()));

    let unknown_email = use_case
        .execute(LoginInput {
            email: "nobody@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap_err();
    let wrong_password = use_case
        .execute(LoginInput {
            email: "alice@example.com".to_string(),
            password: "battery staple".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(unknown_email, PotError::InvalidCredentials));
    assert!(matches!(wrong_password, PotError::InvalidCredentials));
    assert_eq!(unknown_email.to_string(), wrong_password.to_string());
}

// ============================================================================
// Winner selection
// ============================================================================

#[tokio::test]
async fn no_purchases_means_no_winner() {
    let repo = InMemoryPotRepository::default();
    let use_case = SelectWinnerUseCase::new(Arc::new(repo.clone()));

    let mut rng = StdRng::seed_from_u64(1);
    let picked = use_case.execute(&mut rng).await.unwrap();

    assert!(picked.is_none());
    assert!(repo.winners().is_empty());
}

#[tokio::test]
async fn winner_comes_from_current_month_purchases() {
    let repo = InMemoryPotRepository::default();
    repo.seed_purchase("alice", 10.0, Utc::now());

    let use_case = SelectWinnerUseCase::new(Arc::new(repo.clone()));
    let mut rng = StdRng::seed_from_u64(1);
    let picked = use_case.execute(&mut rng).await.unwrap().unwrap();

    assert_eq!(picked.username, "alice");
    assert_eq!(picked.amount, 10.0);
    assert_eq!(picked.month, current_month_label());

    let winners = repo.winners();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].username, "alice");
}

#[tokio::test]
async fn purchases_outside_window_are_excluded() {
    let now = Utc::now();
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .unwrap();
    let last_month = month_start - chrono::Duration::hours(1);

    let repo = InMemoryPotRepository::default();
    repo.seed_purchase("old", 99.0, last_month);
    repo.seed_purchase("fresh", 5.0, now);

    let use_case = SelectWinnerUseCase::new(Arc::new(repo.clone()));
    let mut rng = StdRng::seed_from_u64(1);
    let picked = use_case.execute(&mut rng).await.unwrap().unwrap();

    assert_eq!(picked.username, "fresh");
}

#[tokio::test]
async fn same_seed_replays_same_pick() {
    let seed_repo = |repo: &InMemoryPotRepository| {
        for (name, amount) in [("alice", 1.0), ("bob", 2.0), ("carol", 3.0), ("dave", 4.0)] {
            repo.seed_purchase(name, amount, Utc::now());
        }
    };

    let first = InMemoryPotRepository::default();
    seed_repo(&first);
    let second = InMemoryPotRepository::default();
    seed_repo(&second);

    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);

    let pick_a = SelectWinnerUseCase::new(Arc::new(first))
        .execute(&mut rng_a)
        .await
        .unwrap()
        .unwrap();
    let pick_b = SelectWinnerUseCase::new(Arc::new(second))
        .execute(&mut rng_b)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(pick_a.username, pick_b.username);
}

#[tokio::test]
async fn repeated_selection_appends_duplicate_winners() {
    let repo = InMemoryPotRepository::default();
    repo.seed_purchase("alice", 10.0, Utc::now());

    let use_case = SelectWinnerUseCase::new(Arc::new(repo.clone()));
    let mut rng = StdRng::seed_from_u64(1);
    use_case.execute(&mut rng).await.unwrap();
    use_case.execute(&mut rng).await.unwrap();

    let winners = repo.winners();
    assert_eq!(winners.len(), 2);
    assert_eq!(winners[0].month, winners[1].month);
}

// ============================================================================
// Leaderboard
// ============================================================================

#[tokio::test]
async fn leaderboard_orders_month_labels_lexicographically() {
    let repo = InMemoryPotRepository::default();
    for month in ["January", "April", "September"] {
        let winner = Winner::new("alice".to_string(), month.to_string(), 1.0);
        WinnerRepository::create(&repo, &winner).await.unwrap();
    }

    let winners = ListWinnersUseCase::new(Arc::new(repo)).execute().await.unwrap();
    let months: Vec<&str> = winners.iter().map(|w| w.month.as_str()).collect();

    // "April" < "January" < "September" as strings
    assert_eq!(months, vec!["April", "January", "September"]);
}

// ============================================================================
// Router
// ============================================================================

#[tokio::test]
async fn full_flow_login_purchase_pick_leaderboard() {
    let repo = InMemoryPotRepository::default();
    repo.seed_user("alice@example.com", "correct horse", UserRole::Admin);
    let app = pot_router_generic(repo, test_config());

    let token = login_for_token(&app, "alice@example.com", "correct horse").await;

    let (status, body) = send(app.clone(), "GET", "/leaderboard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(
        app.clone(),
        "POST",
        "/purchase",
        Some(&token),
        Some(json!({ "username": "alice", "potAmount": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app.clone(), "POST", "/admin/pick-winner", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Monthly winner picked successfully");

    let (status, body) = send(app.clone(), "GET", "/leaderboard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let winners = body.as_array().unwrap();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0]["username"], "alice");
    assert_eq!(winners[0]["amount"], 10.0);
    assert_eq!(winners[0]["month"], current_month_label());
}

#[tokio::test]
async fn member_cannot_use_admin_console() {
    let repo = InMemoryPotRepository::default();
    repo.seed_user("alice@example.com", "correct horse", UserRole::Admin);
    let member = repo.seed_user("bob@example.com", "hunter2hunter2", UserRole::Member);
    let app = pot_router_generic(repo.clone(), test_config());

    let token = login_for_token(&app, "bob@example.com", "hunter2hunter2").await;

    let uri = format!("/admin/users/{}/role", member.user_id);
    let (status, _) = send(
        app.clone(),
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let unchanged = repo.user_by_id(&member.user_id).unwrap();
    assert_eq!(unchanged.user_role, UserRole::Member);

    let (status, _) = send(app.clone(), "GET", "/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_can_manage_users_and_stats() {
    let repo = InMemoryPotRepository::default();
    repo.seed_user("alice@example.com", "correct horse", UserRole::Admin);
    let member = repo.seed_user("bob@example.com", "hunter2hunter2", UserRole::Member);
    repo.seed_purchase("bob", 4.0, Utc::now());
    let app = pot_router_generic(repo.clone(), test_config());

    let token = login_for_token(&app, "alice@example.com", "correct horse").await;

    let (status, body) = send(app.clone(), "GET", "/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalWinners"], 0);
    assert_eq!(body["totalPurchases"], 1);

    let uri = format!("/admin/users/{}/role", member.user_id);
    let (status, body) = send(
        app.clone(),
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");
    assert!(repo.user_by_id(&member.user_id).unwrap().is_admin());

    let (status, _) = send(
        app.clone(),
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "role": "superuser" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/admin/users/{}", member.user_id);
    let (status, body) = send(app.clone(), "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    assert!(repo.user_by_id(&member.user_id).is_none());

    // Deleting again is still a 200
    let (status, _) = send(app.clone(), "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn manual_winner_entry_reaches_the_leaderboard() {
    let repo = InMemoryPotRepository::default();
    repo.seed_user("alice@example.com", "correct horse", UserRole::Admin);
    let app = pot_router_generic(repo.clone(), test_config());

    let token = login_for_token(&app, "alice@example.com", "correct horse").await;

    // No randomization involved: the winner is stored exactly as supplied
    let (status, body) = send(
        app.clone(),
        "POST",
        "/admin/add-winner",
        Some(&token),
        Some(json!({ "username": "carol", "month": "February", "amount": 12.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Monthly winner added successfully");

    // The shorter alias route behaves the same
    let (status, _) = send(
        app.clone(),
        "POST",
        "/add-winner",
        Some(&token),
        Some(json!({ "username": "dave", "month": "August", "amount": 3.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app.clone(), "GET", "/leaderboard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let winners = body.as_array().unwrap();
    assert_eq!(winners.len(), 2);
    assert_eq!(winners[0]["username"], "dave");
    assert_eq!(winners[0]["month"], "August");
    assert_eq!(winners[1]["username"], "carol");
    assert_eq!(winners[1]["month"], "February");
    assert_eq!(winners[1]["amount"], 12.5);
}

#[tokio::test]
async fn admin_listings_expose_purchases_and_users_without_secrets() {
    let repo = InMemoryPotRepository::default();
    let admin = repo.seed_user("alice@example.com", "correct horse", UserRole::Admin);
    repo.seed_purchase("bob", 4.5, Utc::now());
    let app = pot_router_generic(repo, test_config());

    let token = login_for_token(&app, "alice@example.com", "correct horse").await;

    let (status, body) = send(app.clone(), "GET", "/admin/purchases", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let purchases = body.as_array().unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0]["username"], "bob");
    assert_eq!(purchases[0]["potAmount"], 4.5);
    assert!(purchases[0]["purchaseId"].is_string());
    assert!(purchases[0]["createdAtMs"].is_i64());

    let (status, body) = send(app.clone(), "GET", "/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "alice@example.com");
    assert_eq!(users[0]["role"], "admin");
    assert_eq!(users[0]["userId"], admin.user_id.to_string());

    // The hash must never leave the store layer
    let fields: Vec<&String> = users[0].as_object().unwrap().keys().collect();
    assert!(!fields.iter().any(|f| f.to_lowercase().contains("password")));
    assert!(!fields.iter().any(|f| f.to_lowercase().contains("hash")));
}

#[tokio::test]
async fn protected_routes_reject_bad_tokens() {
    let repo = InMemoryPotRepository::default();
    let user = repo.seed_user("alice@example.com", "correct horse", UserRole::Member);
    let app = pot_router_generic(repo.clone(), test_config());

    let body = json!({ "username": "alice", "potAmount": 1.0 });

    let (status, _) = send(app.clone(), "POST", "/purchase", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        app.clone(),
        "POST",
        "/purchase",
        Some("not-a-token"),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A valid token stops working once its user is gone
    let token = login_for_token(&app, "alice@example.com", "correct horse").await;
    UserRepository::delete(&repo, &user.user_id).await.unwrap();
    let (status, _) = send(app.clone(), "POST", "/purchase", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rate_limiter_returns_429_past_the_window_cap() {
    let repo = InMemoryPotRepository::default();
    let mut config = test_config();
    config.rate_limit = RateLimitConfig::new(2, 900);
    let app = pot_router_generic(repo, config);

    let (status, _) = send(app.clone(), "GET", "/leaderboard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(app.clone(), "GET", "/leaderboard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(app.clone(), "GET", "/leaderboard", None, None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn logout_is_stateless() {
    let repo = InMemoryPotRepository::default();
    let app = pot_router_generic(repo, test_config());

    let (status, body) = send(app.clone(), "POST", "/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
}
