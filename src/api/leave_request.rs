use crate::auth::auth::AuthUser;
use crate::delivery::Dispatcher;
use crate::error::WorkflowError;
use crate::letter;
use crate::model::leave_request::LeaveRequest;
use crate::model::outbound::OutboundMessage;
use crate::store::{outbox, users};
use crate::workflow::{LeaveWorkflow, Submission};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-03-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "fever")]
    pub reason: String,
    /// name of a tutor from the student's department
    #[schema(example = "T1")]
    pub tutor: String,
}

impl From<CreateLeave> for Submission {
    fn from(value: CreateLeave) -> Self {
        Submission {
            start_date: value.start_date,
            end_date: value.end_date,
            reason: value.reason,
            tutor: value.tutor,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct TutorListResponse {
    #[schema(example = json!(["T1", "T2"]))]
    pub tutors: Vec<String>,
}

/* =========================
Submit leave request (student)
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted, status Pending", body = LeaveRequest),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
    dispatcher: web::Data<Dispatcher>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, WorkflowError> {
    let leave = workflow.submit(&auth, payload.into_inner().into()).await?;

    // best-effort: delivery problems are logged by the dispatcher
    dispatcher.flush().await;

    Ok(HttpResponse::Created().json(leave))
}

/* =========================
Tutor decision
========================= */
/// Swagger doc for tutor_decide endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/tutor/{action}",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request"),
        ("action" = String, Path, description = "approve or reject")
    ),
    responses(
        (status = 200, description = "Decision recorded", body = LeaveRequest),
        (status = 400, description = "Invalid action"),
        (status = 403, description = "Not the assigned tutor"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request is not Pending")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn tutor_decide(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, WorkflowError> {
    let (leave_id, action) = path.into_inner();
    let leave = workflow.tutor_decide(&auth, leave_id, &action).await?;
    dispatcher.flush().await;

    Ok(HttpResponse::Ok().json(leave))
}

/* =========================
AC decision
========================= */
/// Swagger doc for ac_decide endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/ac/{action}",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request"),
        ("action" = String, Path, description = "approve or reject")
    ),
    responses(
        (status = 200, description = "Decision recorded; QR attached on approval", body = LeaveRequest),
        (status = 400, description = "Invalid action"),
        (status = 403, description = "Not an AC of the request's department"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request is not Tutor Approved")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn ac_decide(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, WorkflowError> {
    let (leave_id, action) = path.into_inner();
    let leave = workflow.ac_decide(&auth, leave_id, &action).await?;
    dispatcher.flush().await;

    Ok(HttpResponse::Ok().json(leave))
}

async fn visible_leave(
    auth: &AuthUser,
    workflow: &LeaveWorkflow,
    leave_id: i64,
) -> Result<LeaveRequest, WorkflowError> {
    let leave = workflow.get(leave_id).await?;
    if !LeaveWorkflow::can_view(auth, &leave) {
        return Err(WorkflowError::Forbidden("Not your leave request"));
    }
    Ok(leave)
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
    path: web::Path<i64>,
) -> Result<HttpResponse, WorkflowError> {
    let leave = visible_leave(&auth, &workflow, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

/// for getting leave applications endpoint: own requests for students,
/// assigned ones for tutors, the department for ACs, all for admins
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "Leave requests, newest first", body = LeaveListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
) -> Result<HttpResponse, WorkflowError> {
    let data = workflow.visible_to(&auth).await?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        total: data.len(),
        data,
    }))
}

/// Leave letter download
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}/letter",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request")
    ),
    responses(
        (status = 200, description = "Plain-text leave letter", content_type = "text/plain"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_letter(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
    path: web::Path<i64>,
) -> Result<HttpResponse, WorkflowError> {
    let leave = visible_leave(&auth, &workflow, path.into_inner()).await?;
    let body = letter::render(&leave, Local::now().date_naive());

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(letter::file_name(&leave))],
        })
        .body(body))
}

/// Parent SMS attempts for a leave request
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}/messages",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request")
    ),
    responses(
        (status = 200, description = "Outbound messages in creation order", body = [OutboundMessage]),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn delivery_log(
    auth: AuthUser,
    workflow: web::Data<LeaveWorkflow>,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, WorkflowError> {
    let leave = visible_leave(&auth, &workflow, path.into_inner()).await?;
    let messages = outbox::for_leave(pool.get_ref(), leave.id).await?;
    Ok(HttpResponse::Ok().json(messages))
}

/// Tutors of the caller's department, for the apply form
#[utoipa::path(
    get,
    path = "/api/tutors",
    responses(
        (status = 200, description = "Tutor names", body = TutorListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn list_tutors(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, WorkflowError> {
    let tutors = users::tutors_in_dept(pool.get_ref(), &auth.dept).await?;
    Ok(HttpResponse::Ok().json(TutorListResponse { tutors }))
}
