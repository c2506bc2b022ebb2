// Controller classes and the routers built from them.

pub mod class;
pub mod controller;
pub mod instance;
pub mod registry;
pub mod router;
pub mod stateless;
pub mod system;


pub use class::{CompiledClass, Constructor, ControllerClass, RoutingDefaults};
pub use controller::Controller;
pub use instance::Routable;
pub use registry::{ClassInfo, ControllerRegistry};
pub use stateless::Stateless;
pub use system::{system_class, system_controller, System, SYSTEM_CONTROLLER};
