pub mod leave_request;
pub mod notification;
pub mod outbound;
pub mod role;
pub mod user;
