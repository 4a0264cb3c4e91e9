use crate::config::Config;
use crate::error::WorkflowError;
use crate::model::notification::NotificationTarget;
use crate::{auth::jwt::verify_token, model::role::Role, models::Claims};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};

/// The authenticated principal. Built from the access token and passed
/// explicitly into every workflow operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub name: String,
    pub role: Role,
    pub dept: String,

    /// Present only for students
    pub roll: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        AuthUser {
            user_id: claims.user_id,
            name: claims.sub,
            role: claims.role,
            dept: claims.dept,
            roll: claims.roll,
        }
    }
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // the auth middleware already decoded the token for protected scopes
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(
                    actix_web::error::ErrorInternalServerError("Config missing"),
                ));
            }
        };

        match verify_token(token, &config.jwt_secret) {
            Ok(claims) => ready(Ok(AuthUser::from(claims))),
            Err(_) => ready(Err(ErrorUnauthorized("Invalid token"))),
        }
    }
}

impl AuthUser {
    pub fn require(&self, role: Role, message: &'static str) -> Result<(), WorkflowError> {
        if self.role == role {
            Ok(())
        } else {
            Err(WorkflowError::Forbidden(message))
        }
    }

    pub fn require_admin(&self) -> Result<(), WorkflowError> {
        self.require(Role::Admin, "Admin only")
    }

    /// Where this principal's in-app notifications are addressed
    pub fn viewer(&self) -> NotificationTarget {
        match (&self.role, &self.roll) {
            (Role::Student, Some(roll)) => NotificationTarget::student(&self.dept, roll),
            (role, _) => NotificationTarget::department(*role, &self.dept),
        }
    }
}

#[cfg(test)]
impl AuthUser {
    pub fn student(name: &str, roll: &str, dept: &str) -> Self {
        AuthUser {
            user_id: 1,
            name: name.into(),
            role: Role::Student,
            dept: dept.into(),
            roll: Some(roll.into()),
        }
    }

    pub fn staff(role: Role, name: &str, dept: &str) -> Self {
        AuthUser {
            user_id: 2,
            name: name.into(),
            role,
            dept: dept.into(),
            roll: None,
        }
    }
}
