/// Middleware module
///
/// Bearer-token guard for the protected routes and per-request logging.

mod jwt_middleware;
mod request_logger;

pub use jwt_middleware::JwtMiddleware;
pub use request_logger::RequestLogger;
