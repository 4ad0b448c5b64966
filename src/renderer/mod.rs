pub mod route_renderer;
pub use route_renderer::RouteRenderer;

pub mod route_server;
pub use route_server::RouteServer;
