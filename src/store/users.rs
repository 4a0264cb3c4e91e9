use chrono::Utc;
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};

use super::decode_label;
use crate::model::role::Role;
use crate::model::user::User;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub role: Role,
    pub dept: String,
    pub roll: Option<String>,
    pub email: String,
    pub parent_mobile: Option<String>,
    /// already hashed
    pub password: String,
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    role: String,
    dept: String,
    roll: Option<String>,
    email: String,
    parent_mobile: Option<String>,
    password: String,
}

impl TryFrom<UserRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            role: decode_label(&row.role)?,
            dept: row.dept,
            roll: row.roll,
            email: row.email,
            parent_mobile: row.parent_mobile,
            password: row.password,
        })
    }
}

const COLUMNS: &str = "id, name, role, dept, roll, email, parent_mobile, password";

pub async fn insert(pool: &SqlitePool, user: &NewUser) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, role, dept, roll, email, parent_mobile, password, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.name)
    .bind(user.role.as_ref())
    .bind(&user.dept)
    .bind(&user.roll)
    .bind(&user.email)
    .bind(&user.parent_mobile)
    .bind(&user.password)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Students log in by roll number, staff by email.
pub async fn find_for_login(
    pool: &SqlitePool,
    role: Role,
    identity: &str,
) -> Result<Option<User>, sqlx::Error> {
    let column = if role == Role::Student { "roll" } else { "email" };
    let sql = format!("SELECT {COLUMNS} FROM users WHERE {column} = ? AND role = ?");

    sqlx::query_as::<_, UserRow>(&sql)
        .bind(identity)
        .bind(role.as_ref())
        .fetch_optional(pool)
        .await?
        .map(User::try_from)
        .transpose()
}

/// Parent contact for a student, used as the SMS destination.
pub async fn parent_mobile<'e, E>(executor: E, roll: &str) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mobile = sqlx::query_scalar::<_, Option<String>>(
        "SELECT parent_mobile FROM users WHERE roll = ? AND role = 'student'",
    )
    .bind(roll)
    .fetch_optional(executor)
    .await?;

    Ok(mobile.flatten())
}

pub async fn tutors_in_dept(pool: &SqlitePool, dept: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT name FROM users WHERE role = 'tutor' AND dept = ? ORDER BY id",
    )
    .bind(dept)
    .fetch_all(pool)
    .await
}

pub async fn all(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM users ORDER BY id");

    sqlx::query_as::<_, UserRow>(&sql)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect()
}

/// True when the roll or email is already registered.
pub async fn identity_exists(pool: &SqlitePool, identity: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE roll = ? OR email = ? LIMIT 1)",
    )
    .bind(identity)
    .bind(identity)
    .fetch_one(pool)
    .await
}
