use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};

use super::decode_label;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};

/// Fields captured when a student submits a leave request.
#[derive(Debug, Clone)]
pub struct NewLeave {
    pub student_name: String,
    pub roll: String,
    pub dept: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub tutor: String,
}

/// Read projections over the leaves table.
#[derive(Debug, Clone)]
pub enum LeaveScope {
    Requester(String),
    Approver(String),
    Department(String),
    All,
}

#[derive(FromRow)]
struct LeaveRow {
    id: i64,
    student_name: String,
    roll: String,
    dept: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    tutor: String,
    status: String,
    qr_code: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = sqlx::Error;

    fn try_from(row: LeaveRow) -> Result<Self, Self::Error> {
        Ok(LeaveRequest {
            id: row.id,
            student_name: row.student_name,
            roll: row.roll,
            dept: row.dept,
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason,
            tutor: row.tutor,
            status: decode_label(&row.status)?,
            qr_code: row.qr_code,
            created_at: row.created_at,
        })
    }
}

const COLUMNS: &str = "id, student_name, roll, dept, start_date, end_date, reason, tutor, status, qr_code, created_at";

pub async fn insert<'e, E>(executor: E, leave: &NewLeave) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO leaves
            (student_name, roll, dept, start_date, end_date, reason, tutor, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&leave.student_name)
    .bind(&leave.roll)
    .bind(&leave.dept)
    .bind(leave.start_date)
    .bind(leave.end_date)
    .bind(&leave.reason)
    .bind(&leave.tutor)
    .bind(LeaveStatus::Pending.as_ref())
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn fetch<'e, E>(executor: E, id: i64) -> Result<Option<LeaveRequest>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {COLUMNS} FROM leaves WHERE id = ?");

    sqlx::query_as::<_, LeaveRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .map(LeaveRequest::try_from)
        .transpose()
}

/// Moves a request from `from` to `to`, attaching `qr_code` only if none is
/// stored yet. Returns false when the request is no longer in `from`.
pub async fn transition<'e, E>(
    executor: E,
    id: i64,
    from: LeaveStatus,
    to: LeaveStatus,
    qr_code: Option<&str>,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE leaves
        SET status = ?, qr_code = COALESCE(qr_code, ?)
        WHERE id = ?
        AND status = ?
        "#,
    )
    .bind(to.as_ref())
    .bind(qr_code)
    .bind(id)
    .bind(from.as_ref())
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Newest first, by creation order.
pub async fn list(pool: &SqlitePool, scope: &LeaveScope) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    let (filter, value) = match scope {
        LeaveScope::Requester(roll) => (" WHERE roll = ?", Some(roll)),
        LeaveScope::Approver(tutor) => (" WHERE tutor = ?", Some(tutor)),
        LeaveScope::Department(dept) => (" WHERE dept = ?", Some(dept)),
        LeaveScope::All => ("", None),
    };

    let sql = format!("SELECT {COLUMNS} FROM leaves{filter} ORDER BY id DESC");

    let mut query = sqlx::query_as::<_, LeaveRow>(&sql);
    if let Some(value) = value {
        query = query.bind(value);
    }

    query
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(LeaveRequest::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_leave(roll: &str, tutor: &str, dept: &str) -> NewLeave {
        NewLeave {
            student_name: format!("student-{roll}"),
            roll: roll.to_string(),
            dept: dept.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            reason: "fever".to_string(),
            tutor: tutor.to_string(),
        }
    }

    #[actix_web::test]
    async fn insert_then_fetch_starts_pending() {
        let pool = test_pool().await;
        let id = insert(&pool, &new_leave("71810010001", "T1", "CSE"))
            .await
            .unwrap();

        let stored = fetch(&pool, id).await.unwrap().expect("stored");
        assert_eq!(stored.status, LeaveStatus::Pending);
        assert_eq!(stored.qr_code, None);
        assert!(fetch(&pool, id + 1).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn transition_is_conditional_on_prior_status() {
        let pool = test_pool().await;
        let id = insert(&pool, &new_leave("71810010001", "T1", "CSE"))
            .await
            .unwrap();

        assert!(
            transition(&pool, id, LeaveStatus::Pending, LeaveStatus::TutorApproved, None)
                .await
                .unwrap()
        );
        // replaying the same decision finds nothing to update
        assert!(
            !transition(&pool, id, LeaveStatus::Pending, LeaveStatus::TutorApproved, None)
                .await
                .unwrap()
        );
    }

    #[actix_web::test]
    async fn qr_code_is_never_overwritten() {
        let pool = test_pool().await;
        let id = insert(&pool, &new_leave("71810010001", "T1", "CSE"))
            .await
            .unwrap();
        transition(&pool, id, LeaveStatus::Pending, LeaveStatus::TutorApproved, None)
            .await
            .unwrap();
        transition(
            &pool,
            id,
            LeaveStatus::TutorApproved,
            LeaveStatus::AcApproved,
            Some("first"),
        )
        .await
        .unwrap();
        transition(
            &pool,
            id,
            LeaveStatus::AcApproved,
            LeaveStatus::AcApproved,
            Some("second"),
        )
        .await
        .unwrap();

        let stored = fetch(&pool, id).await.unwrap().unwrap();
        assert_eq!(stored.qr_code.as_deref(), Some("first"));
    }

    #[actix_web::test]
    async fn projections_are_newest_first() {
        let pool = test_pool().await;
        let first = insert(&pool, &new_leave("71810010001", "T1", "CSE")).await.unwrap();
        let second = insert(&pool, &new_leave("71810010002", "T1", "CSE")).await.unwrap();
        let third = insert(&pool, &new_leave("71810010001", "T2", "ECE")).await.unwrap();

        let ids = |leaves: Vec<LeaveRequest>| leaves.into_iter().map(|l| l.id).collect::<Vec<_>>();

        let by_roll = list(&pool, &LeaveScope::Requester("71810010001".into())).await.unwrap();
        assert_eq!(ids(by_roll), vec![third, first]);

        let by_tutor = list(&pool, &LeaveScope::Approver("T1".into())).await.unwrap();
        assert_eq!(ids(by_tutor), vec![second, first]);

        let by_dept = list(&pool, &LeaveScope::Department("ECE".into())).await.unwrap();
        assert_eq!(ids(by_dept), vec![third]);

        let all = list(&pool, &LeaveScope::All).await.unwrap();
        assert_eq!(ids(all), vec![third, second, first]);
    }
}
