use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};

use super::decode_label;
use crate::model::notification::{Notification, NotificationTarget};

/// Dashboards show at most this many unread notifications per load.
pub const FEED_LIMIT: i64 = 10;

#[derive(FromRow)]
struct NotificationRow {
    id: i64,
    role: String,
    dept: String,
    roll: Option<String>,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = sqlx::Error;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: row.id,
            role: decode_label(&row.role)?,
            dept: row.dept,
            roll: row.roll,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

pub async fn insert<'e, E>(
    executor: E,
    target: &NotificationTarget,
    message: &str,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO notifications (role, dept, roll, message, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(target.role.as_ref())
    .bind(&target.dept)
    .bind(&target.roll)
    .bind(message)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

// students are addressed by roll, staff by department
fn viewer_filter(viewer: &NotificationTarget) -> (&'static str, &str) {
    match &viewer.roll {
        Some(roll) => ("role = ? AND roll = ?", roll.as_str()),
        None => ("role = ? AND dept = ?", viewer.dept.as_str()),
    }
}

/// Returns the viewer's newest unread notifications and marks all of the
/// viewer's unread notifications as read.
pub async fn take_unread(
    pool: &SqlitePool,
    viewer: &NotificationTarget,
) -> Result<Vec<Notification>, sqlx::Error> {
    let (filter, key) = viewer_filter(viewer);
    let mut tx = pool.begin().await?;

    let select = format!(
        "SELECT id, role, dept, roll, message, is_read, created_at FROM notifications \
         WHERE {filter} AND is_read = 0 ORDER BY created_at DESC, id DESC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, NotificationRow>(&select)
        .bind(viewer.role.as_ref())
        .bind(key)
        .bind(FEED_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

    let update = format!("UPDATE notifications SET is_read = 1 WHERE {filter} AND is_read = 0");
    sqlx::query(&update)
        .bind(viewer.role.as_ref())
        .bind(key)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    rows.into_iter().map(Notification::try_from).collect()
}

/// Every notification addressed to the viewer, read or not. Newest first.
pub async fn history(
    pool: &SqlitePool,
    viewer: &NotificationTarget,
) -> Result<Vec<Notification>, sqlx::Error> {
    let (filter, key) = viewer_filter(viewer);
    let sql = format!(
        "SELECT id, role, dept, roll, message, is_read, created_at FROM notifications \
         WHERE {filter} ORDER BY id DESC"
    );

    sqlx::query_as::<_, NotificationRow>(&sql)
        .bind(viewer.role.as_ref())
        .bind(key)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Notification::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::model::role::Role;

    #[actix_web::test]
    async fn unread_feed_is_scoped_and_marked_read() {
        let pool = test_pool().await;
        let tutors = NotificationTarget::department(Role::Tutor, "CSE");
        let other_dept = NotificationTarget::department(Role::Tutor, "ECE");
        let student = NotificationTarget::student("CSE", "71810010001");

        insert(&pool, &tutors, "first").await.unwrap();
        insert(&pool, &tutors, "second").await.unwrap();
        insert(&pool, &other_dept, "elsewhere").await.unwrap();
        insert(&pool, &student, "yours").await.unwrap();

        let feed = take_unread(&pool, &tutors).await.unwrap();
        let messages: Vec<_> = feed.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert!(feed.iter().all(|n| !n.is_read));

        assert!(take_unread(&pool, &tutors).await.unwrap().is_empty());
        assert_eq!(take_unread(&pool, &other_dept).await.unwrap().len(), 1);

        let history = history(&pool, &tutors).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|n| n.is_read));

        let mine = take_unread(&pool, &student).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].roll.as_deref(), Some("71810010001"));
    }

    #[actix_web::test]
    async fn feed_is_capped_but_everything_is_marked_read() {
        let pool = test_pool().await;
        let acs = NotificationTarget::department(Role::Ac, "CSE");
        for n in 0..12 {
            insert(&pool, &acs, &format!("n{n}")).await.unwrap();
        }

        assert_eq!(take_unread(&pool, &acs).await.unwrap().len(), FEED_LIMIT as usize);
        assert!(take_unread(&pool, &acs).await.unwrap().is_empty());
    }
}
