// HTTP module: the server that hosts controller routers.

pub mod server;

pub use crate::controller::Controller;
pub use crate::middleware::{panics_counter, Middleware};
pub use server::{HttpServer, Server};
