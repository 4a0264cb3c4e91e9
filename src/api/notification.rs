use crate::auth::auth::AuthUser;
use crate::error::WorkflowError;
use crate::model::notification::Notification;
use crate::store::notifications;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct NotificationFeed {
    pub data: Vec<Notification>,
    #[schema(example = 2)]
    pub unread: usize,
}

/// Unread notifications for the caller, newest first (at most 10).
/// Everything returned, and anything older, is marked read.
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Unread notifications", body = NotificationFeed),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notifications"
)]
pub async fn unread_notifications(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, WorkflowError> {
    let data = notifications::take_unread(pool.get_ref(), &auth.viewer()).await?;

    Ok(HttpResponse::Ok().json(NotificationFeed {
        unread: data.len(),
        data,
    }))
}

/// Full notification history for the caller
#[utoipa::path(
    get,
    path = "/api/notifications/history",
    responses(
        (status = 200, description = "All notifications, newest first", body = [Notification]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notifications"
)]
pub async fn notification_history(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, WorkflowError> {
    let data = notifications::history(pool.get_ref(), &auth.viewer()).await?;
    Ok(HttpResponse::Ok().json(data))
}
