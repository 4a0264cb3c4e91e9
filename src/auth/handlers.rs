use crate::{
    auth::{
        auth::AuthUser,
        jwt::generate_access_token,
        password::{hash_password, is_strong, verify_password},
    },
    config::Config,
    model::role::Role,
    models::{LoginReqDto, RegisterReq},
    store::users::{self, NewUser},
    utils::{
        identity_cache, identity_filter,
        validation::{is_institution_email, is_valid_mobile, is_valid_roll, normalize_mobile},
    },
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

/// true  => roll / email AVAILABLE
/// false => TAKEN
pub async fn is_identity_available(identity: &str, pool: &SqlitePool) -> bool {
    // 1️⃣ Cuckoo filter: fast negative
    if !identity_filter::might_exist(identity) {
        return true;
    }

    // 2️⃣ Moka cache: fast positive
    if identity_cache::is_taken(identity).await {
        return false;
    }

    // 3️⃣ Database fallback
    match users::identity_exists(pool, identity).await {
        Ok(exists) => !exists,
        Err(e) => {
            error!(error = %e, "Identity lookup failed");
            false // fail-safe
        }
    }
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

/// Checks the registration form and returns the user to insert, password
/// still in clear text.
fn validate_registration(req: &RegisterReq, config: &Config) -> Result<NewUser, HttpResponse> {
    if !req.role.is_registrable() {
        return Err(bad_request("Role cannot be registered"));
    }

    let name = req.name.trim();
    let dept = req.dept.trim();
    let email = req.email.trim();
    if name.is_empty() || dept.is_empty() || email.is_empty() {
        return Err(bad_request("Name, department and email are required"));
    }

    let (roll, parent_mobile) = if req.role == Role::Student {
        let roll = req.roll.as_deref().unwrap_or_default().trim();
        if !is_valid_roll(roll) {
            return Err(bad_request(
                "Invalid Roll Number! Must start with 7181 and total 11 digits.",
            ));
        }

        let mobile = normalize_mobile(req.parent_mobile.as_deref().unwrap_or_default());
        if !is_valid_mobile(&mobile) {
            return Err(bad_request(
                "Invalid Parent Mobile Number! Must include +91 and 10-digit mobile starting with 6-9.",
            ));
        }
        (Some(roll.to_string()), Some(mobile))
    } else {
        if !is_institution_email(email, &config.institution_email_domain) {
            return Err(bad_request(&format!(
                "Email must end with {}",
                config.institution_email_domain
            )));
        }
        (None, None)
    };

    if !is_strong(&req.password) {
        return Err(bad_request(
            "Weak Password! Must have uppercase, lowercase, digit, special char, min 8 chars.",
        ));
    }

    Ok(NewUser {
        name: name.to_string(),
        role: req.role,
        dept: dept.to_string(),
        roll,
        email: email.to_lowercase(),
        parent_mobile,
        password: req.password.clone(),
    })
}

/// User registration handler
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "User registered", body = Object, example = json!({
            "message": "User registered successfully"
        })),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Roll number or email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    req: web::Json<RegisterReq>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> impl Responder {
    let mut user = match validate_registration(&req, &config) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let identities: Vec<String> = user.roll.iter().cloned().chain([user.email.clone()]).collect();
    for identity in &identities {
        if !is_identity_available(identity, pool.get_ref()).await {
            return HttpResponse::Conflict().json(json!({
                "error": "Roll number or email already registered"
            }));
        }
    }

    user.password = match hash_password(&user.password) {
        Ok(hashed) => hashed,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match users::insert(pool.get_ref(), &user).await {
        Ok(id) => {
            // keep filter and cache in step with the table
            for identity in &identities {
                identity_filter::insert(identity);
                identity_cache::mark_taken(identity).await;
            }
            info!(user_id = id, role = %user.role, "User registered");
            HttpResponse::Created().json(json!({
                "message": "User registered successfully"
            }))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            HttpResponse::Conflict().json(json!({
                "error": "Roll number or email already registered"
            }))
        }
        Err(e) => {
            error!(error = %e, "Failed to register user");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register user"
            }))
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(value_type = String, example = "student")]
    pub role: Role,
}

fn admin_principal(req: &LoginReqDto, config: &Config) -> Option<AuthUser> {
    let expected = config.admin_password.as_deref()?;
    if req.identity.trim() == config.admin_username && req.password == expected {
        Some(AuthUser {
            user_id: 0,
            name: config.admin_username.clone(),
            role: Role::Admin,
            dept: String::new(),
            roll: None,
        })
    } else {
        None
    }
}

/// Login handler: students by roll number, tutor/AC by email, admin by the
/// configured username
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Access token issued", body = LoginResponse),
        (status = 400, description = "Missing identity or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, req),
    fields(role = %req.role, identity = %req.identity)
)]
pub async fn login(
    req: web::Json<LoginReqDto>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    // 1️⃣ Basic validation
    if req.identity.trim().is_empty() || req.password.is_empty() {
        info!("Validation failed: empty identity or password");
        return HttpResponse::BadRequest().body("Identity or password required");
    }

    // 2️⃣ Resolve the principal
    let principal = if req.role == Role::Admin {
        match admin_principal(&req, &config) {
            Some(admin) => admin,
            None => {
                info!("Invalid admin credentials");
                return HttpResponse::Unauthorized().body("Invalid credentials");
            }
        }
    } else {
        debug!("Fetching user from database");

        let identity = req.identity.trim().to_lowercase();
        let db_user = match users::find_for_login(pool.get_ref(), req.role, &identity).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!("Invalid credentials: user not found");
                return HttpResponse::Unauthorized().body("Invalid credentials");
            }
            Err(e) => {
                error!(error = %e, "Database error while fetching user");
                return HttpResponse::InternalServerError().finish();
            }
        };

        // 3️⃣ Verify password
        if let Err(e) = verify_password(&req.password, &db_user.password) {
            info!(error = %e, "Invalid credentials: password mismatch");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }

        AuthUser {
            user_id: db_user.id,
            name: db_user.name,
            role: db_user.role,
            dept: db_user.dept,
            roll: db_user.roll,
        }
    };

    // 4️⃣ Generate access token
    let access_token =
        match generate_access_token(&principal, &config.jwt_secret, config.access_token_ttl) {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "Failed to sign access token");
                return HttpResponse::InternalServerError().finish();
            }
        };

    info!(user_id = principal.user_id, "Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        role: principal.role,
    })
}
