use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod auth;
pub mod documents;
pub mod health;
pub mod reminders;

/// Configure application routes. Used by `main.rs` and by integration
/// tests, so both exercise the same paths and middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health: /health (no auth)
    cfg.configure(health::configure_routes);

    // Token issuance: /auth/token (no auth)
    cfg.service(web::scope("/auth").configure(auth::configure_routes));

    // Document CRUD and queries: /documents/** (bearer)
    cfg.service(
        web::scope("/documents")
            .wrap(JwtExtract)
            .configure(documents::configure_routes),
    );

    // Reminder trigger: /reminder/check (bearer, admin/owner)
    cfg.service(
        web::scope("/reminder")
            .wrap(JwtExtract)
            .configure(reminders::configure_routes),
    );
}
