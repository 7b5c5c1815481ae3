//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{purchase::Purchase, user::User, winner::Winner};
use crate::domain::repository::{PurchaseRepository, UserRepository, WinnerRepository};
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{PotError, PotResult};

/// PostgreSQL-backed repository for users, purchases and winners
#[derive(Clone)]
pub struct PgPotRepository {
    pool: PgPool,
}

impl PgPotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    user_role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> PotResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| PotError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            user_role: UserRole::from_id(self.user_role),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    purchase_id: Uuid,
    username: String,
    pot_amount: f64,
    created_at: DateTime<Utc>,
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Purchase {
            purchase_id: row.purchase_id,
            username: row.username,
            pot_amount: row.pot_amount,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WinnerRow {
    winner_id: Uuid,
    username: String,
    month: String,
    amount: f64,
    created_at: DateTime<Utc>,
}

impl From<WinnerRow> for Winner {
    fn from(row: WinnerRow) -> Self {
        Winner {
            winner_id: row.winner_id,
            username: row.username,
            month: row.month,
            amount: row.amount,
            created_at: row.created_at,
        }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgPotRepository {
    async fn create(&self, user: &User) -> PotResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                user_role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.user_role.id())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> PotResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, user_role, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> PotResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, user_role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn list(&self) -> PotResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, user_role, created_at, updated_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn update_role(&self, user_id: &UserId, role: UserRole) -> PotResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET user_role = $2, updated_at = $3
            WHERE user_id = $1
            RETURNING user_id, email, password_hash, user_role, created_at, updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role.id())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn delete(&self, user_id: &UserId) -> PotResult<u64> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Purchase Repository Implementation
// ============================================================================

impl PurchaseRepository for PgPotRepository {
    async fn create(&self, purchase: &Purchase) -> PotResult<()> {
        sqlx::query(
            r#"
            INSERT INTO purchases (purchase_id, username, pot_amount, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(purchase.purchase_id)
        .bind(&purchase.username)
        .bind(purchase.pot_amount)
        .bind(purchase.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PotResult<Vec<Purchase>> {
        let rows = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT purchase_id, username, pot_amount, created_at
            FROM purchases
            WHERE created_at >= $1 AND created_at <= $2
            ORDER BY created_at
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Purchase::from).collect())
    }

    async fn list(&self) -> PotResult<Vec<Purchase>> {
        let rows = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT purchase_id, username, pot_amount, created_at
            FROM purchases
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Purchase::from).collect())
    }

    async fn count(&self) -> PotResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM purchases")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// ============================================================================
// Winner Repository Implementation
// ============================================================================

impl WinnerRepository for PgPotRepository {
    async fn create(&self, winner: &Winner) -> PotResult<()> {
        sqlx::query(
            r#"
            INSERT INTO winners (winner_id, username, month, amount, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(winner.winner_id)
        .bind(&winner.username)
        .bind(&winner.month)
        .bind(winner.amount)
        .bind(winner.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_month_label(&self) -> PotResult<Vec<Winner>> {
        // Lexicographic on the free-text label, as stored
        let rows = sqlx::query_as::<_, WinnerRow>(
            r#"
            SELECT winner_id, username, month, amount, created_at
            FROM winners
            ORDER BY month ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Winner::from).collect())
    }

    async fn count(&self) -> PotResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM winners")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
