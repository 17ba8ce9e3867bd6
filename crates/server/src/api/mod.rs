pub mod cycles;
pub mod handlers;
pub mod keywords;
pub mod middleware;
pub mod routes;
pub mod rss;

pub use routes::create_router;
