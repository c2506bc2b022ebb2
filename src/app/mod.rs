mod app;
mod server;

pub use app::App;
pub use server::{Http, HttpServer};
