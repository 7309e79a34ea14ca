use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::middleware::{JwtMiddleware, RequestLogger};
use crate::routes::{
    confirm_password_reset, create_user, delete_user, health_check, list_users, login, logout,
    refresh, request_password_reset, update_user,
};
use crate::users::UserStore;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn UserStore>,
    email_client: EmailClient,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let store = web::Data::from(store);
    let email_client = web::Data::new(email_client);
    let auth_settings = settings.auth.clone();
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(RequestLogger)

            // Shared state
            .app_data(store.clone())
            .app_data(email_client.clone())
            .app_data(settings.clone())

            // Public routes (no authentication required)
            .route("/health_check", web::get().to(health_check))
            .route("/auth", web::post().to(login))
            .route("/auth/refresh", web::get().to(refresh))
            .route("/auth/logout", web::post().to(logout))
            .route("/password-reset", web::post().to(request_password_reset))
            .route(
                "/password-reset/confirm",
                web::post().to(confirm_password_reset),
            )

            // User management (requires a valid access token)
            .service(
                web::scope("/users")
                    .wrap(JwtMiddleware::new(auth_settings.clone()))
                    .route("", web::get().to(list_users))
                    .route("", web::post().to(create_user))
                    .route("", web::patch().to(update_user))
                    .route("", web::delete().to(delete_user)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
