use crate::api::contact::{ContactReq, ContactResponse};
use crate::api::leave_request::{CreateLeave, LeaveListResponse, TutorListResponse};
use crate::api::notification::NotificationFeed;
use crate::auth::handlers::LoginResponse;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::notification::Notification;
use crate::model::outbound::{DeliveryStatus, OutboundMessage};
use crate::models::{LoginReqDto, RegisterReq};
use crate::reports::{
    AcDashboard, AdminDashboard, DeptLeaveCount, DeptRoleStats, RoleCounts, StudentCount,
    StudentDashboard, TutorBreakdown, TutorDashboard,
};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Approval API",
        version = "1.0.0",
        description = r#"
## Student Leave Approval

Students apply for leave, their tutor gives the first decision and the
Academic Coordinator (AC) of the department gives the final one.

### 🔹 Lifecycle
- `Pending` → `Tutor Approved` | `Rejected` (tutor)
- `Tutor Approved` → `Approved by AC` | `Rejected by AC` (AC)
- An AC approval attaches a QR code (base64 SVG) with the leave details

### 🔔 Side effects
- Every transition leaves an in-app notification for the next actor or the student
- Every transition queues an SMS to the student's parent

### 🔐 Security
Endpoints under `/api` need a **JWT Bearer** token from `/auth/login`.
`/auth/*` and `/contact` are public.
The role in the token decides which decisions and views are allowed.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::tutor_decide,
        crate::api::leave_request::ac_decide,
        crate::api::leave_request::leave_letter,
        crate::api::leave_request::delivery_log,
        crate::api::leave_request::list_tutors,

        crate::api::notification::unread_notifications,
        crate::api::notification::notification_history,

        crate::api::dashboard::student,
        crate::api::dashboard::tutor,
        crate::api::dashboard::ac,
        crate::api::dashboard::admin,

        crate::api::contact::send_message
    ),
    components(
        schemas(
            RegisterReq,
            LoginReqDto,
            LoginResponse,
            CreateLeave,
            LeaveRequest,
            LeaveStatus,
            LeaveListResponse,
            TutorListResponse,
            Notification,
            OutboundMessage,
            DeliveryStatus,
            NotificationFeed,
            StudentDashboard,
            TutorDashboard,
            StudentCount,
            AcDashboard,
            TutorBreakdown,
            AdminDashboard,
            RoleCounts,
            DeptRoleStats,
            DeptLeaveCount,
            ContactReq,
            ContactResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Leave", description = "Leave submission, decisions and letters"),
        (name = "Notifications", description = "In-app notification feed"),
        (name = "Dashboard", description = "Per-role statistics"),
        (name = "Contact", description = "Public contact form"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_and_the_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/auth/login",
            "/api/leave",
            "/api/leave/{leave_id}/tutor/{action}",
            "/api/leave/{leave_id}/ac/{action}",
            "/api/notifications",
            "/api/dashboard/admin",
            "/contact",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
