use crate::{
    api::{contact, dashboard, leave_request, notification},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond((60_000 / requests_per_min as u64).max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst size are non-zero");
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));
    let contact_limiter = Arc::new(build_limiter(config.rate_register_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            ),
    );

    cfg.service(
        web::resource("/contact")
            .wrap(contact_limiter)
            .route(web::post().to(contact::send_message)),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_list))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    // /leave/{id}
                    .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave)))
                    // /leave/{id}/letter
                    .service(
                        web::resource("/{id}/letter")
                            .route(web::get().to(leave_request::leave_letter)),
                    )
                    // /leave/{id}/messages
                    .service(
                        web::resource("/{id}/messages")
                            .route(web::get().to(leave_request::delivery_log)),
                    )
                    // /leave/{id}/tutor/{action}
                    .service(
                        web::resource("/{id}/tutor/{action}")
                            .route(web::put().to(leave_request::tutor_decide)),
                    )
                    // /leave/{id}/ac/{action}
                    .service(
                        web::resource("/{id}/ac/{action}")
                            .route(web::put().to(leave_request::ac_decide)),
                    ),
            )
            .service(web::resource("/tutors").route(web::get().to(leave_request::list_tutors)))
            .service(
                web::scope("/notifications")
                    .service(
                        web::resource("")
                            .route(web::get().to(notification::unread_notifications)),
                    )
                    .service(
                        web::resource("/history")
                            .route(web::get().to(notification::notification_history)),
                    ),
            )
            .service(
                web::scope("/dashboard")
                    .route("/student", web::get().to(dashboard::student))
                    .route("/tutor", web::get().to(dashboard::tutor))
                    .route("/ac", web::get().to(dashboard::ac))
                    .route("/admin", web::get().to(dashboard::admin)),
            ),
    );
}

// LOGIN
//  └─ access_token (ACCESS_TOKEN_TTL, default 15 min)

// API REQUEST
//  └─ Authorization: Bearer access_token
//       └─ student | tutor | ac | admin decides what the handler allows
