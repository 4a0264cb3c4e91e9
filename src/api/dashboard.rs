use crate::auth::auth::AuthUser;
use crate::error::WorkflowError;
use crate::model::role::Role;
use crate::reports::{self, AcDashboard, AdminDashboard, StudentDashboard, TutorDashboard};
use crate::store::users;
use crate::workflow::LeaveWorkflow;
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

#[utoipa::path(
    get,
    path = "/api/dashboard/student",
    responses(
        (status = 200, description = "Counts and trends of the caller's own requests", body = StudentDashboard),
        (status = 403, description = "Students only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn student(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
) -> Result<HttpResponse, WorkflowError> {
    auth.require(Role::Student, "Students only")?;

    let leaves = workflow.visible_to(&auth).await?;
    Ok(HttpResponse::Ok().json(reports::student_dashboard(&leaves)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/tutor",
    responses(
        (status = 200, description = "Flow of requests assigned to the caller", body = TutorDashboard),
        (status = 403, description = "Tutor only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn tutor(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
) -> Result<HttpResponse, WorkflowError> {
    auth.require(Role::Tutor, "Tutor only")?;

    let leaves = workflow.query_by_approver(&auth.name).await?;
    Ok(HttpResponse::Ok().json(reports::tutor_dashboard(&leaves)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/ac",
    responses(
        (status = 200, description = "Per-tutor breakdown of the caller's department", body = AcDashboard),
        (status = 403, description = "AC only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn ac(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, WorkflowError> {
    auth.require(Role::Ac, "AC only")?;

    let tutors = users::tutors_in_dept(pool.get_ref(), &auth.dept).await?;
    let leaves = workflow.query_by_department(&auth.dept).await?;
    Ok(HttpResponse::Ok().json(reports::ac_dashboard(&tutors, &leaves)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    responses(
        (status = 200, description = "Institution-wide statistics", body = AdminDashboard),
        (status = 403, description = "Admin only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn admin(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, WorkflowError> {
    auth.require_admin()?;

    let users = users::all(pool.get_ref()).await?;
    let leaves = workflow.query_all().await?;
    Ok(HttpResponse::Ok().json(reports::admin_dashboard(&users, &leaves)))
}
