use std::sync::{mpsc, Arc, Mutex, Weak};
use std::thread;

use actix_web::dev::Service;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use uuid::Uuid;

use crate::renderer::RouteRenderer;
use crate::route::Position;
use crate::segment::RouteSegment;

// The registry holds a single renderer (the last one registered). The id in
// URLs is kept so a stale frontend gets a 404 instead of someone else's route.
pub type Registry = Option<Arc<Mutex<RouteRenderer>>>;

pub fn register_route_renderer(
    registry: Arc<Mutex<Registry>>,
    route_renderer: Arc<Mutex<RouteRenderer>>,
) -> RouteRendererToken {
    let id = Uuid::new_v4();
    {
        let mut registry = registry.lock().unwrap();
        // Replace the previous renderer with the new one
        *registry = Some(route_renderer);
    }
    RouteRendererToken {
        id,
        registry: Arc::downgrade(&registry),
        is_primitive: true,
    }
}

/// Handle owned by whoever created a renderer's web presence. Dropping a
/// primitive token unregisters the renderer.
pub struct RouteRendererToken {
    id: Uuid,
    registry: Weak<Mutex<Registry>>,
    is_primitive: bool,
}

impl RouteRendererToken {
    pub fn route_id(&self) -> String {
        self.id.to_string()
    }

    pub fn get_route_renderer(&self) -> Option<Arc<Mutex<RouteRenderer>>> {
        if let Some(registry) = self.registry.upgrade() {
            let registry = registry.lock().unwrap();
            return registry.clone();
        }
        None
    }

    pub fn unregister(&self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap();
            *registry = None;
        }
    }
}

impl Drop for RouteRendererToken {
    fn drop(&mut self) {
        if self.is_primitive {
            self.unregister();
        }
    }
}

/// Query side of a segments fetch. `zoom` doubles as the zoom-changed
/// notification from the map widget; `cached_version` makes the request
/// conditional.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SegmentsQuery {
    pub zoom: Option<i32>,
    pub cached_version: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SegmentsResponse {
    pub version: String,
    pub zoom: i32,
    pub center: Position,
    pub segments: Vec<RouteSegment>,
}

#[derive(Debug)]
pub enum SegmentsReply {
    NotFound,
    NotModified,
    Segments(SegmentsResponse),
}

/// Applies a segments query against the registry, independent of the HTTP
/// layer so tests can drive it directly. The renderer lock is held across
/// zoom application and snapshotting, which serializes recomputes per
/// renderer (latest zoom wins).
pub fn handle_segments_query(
    registry: &Mutex<Registry>,
    query: &SegmentsQuery,
    default_center: Position,
) -> SegmentsReply {
    let route_renderer = {
        let registry = registry.lock().unwrap();
        registry.clone()
    };
    match route_renderer {
        None => SegmentsReply::NotFound,
        Some(route_renderer) => {
            let mut route_renderer = route_renderer.lock().unwrap();
            if let Some(zoom) = query.zoom {
                // a zoom change bumps the version, invalidating
                // `cached_version` below
                route_renderer.set_zoom(zoom);
            }
            match route_renderer.get_segments_if_changed(query.cached_version.as_deref()) {
                None => SegmentsReply::NotModified,
                Some((segments, version)) => SegmentsReply::Segments(SegmentsResponse {
                    version,
                    zoom: route_renderer.zoom(),
                    center: route_renderer.map_center().unwrap_or(default_center),
                    segments: segments.to_vec(),
                }),
            }
        }
    }
}

pub fn handle_center_query(registry: &Mutex<Registry>, default_center: Position) -> Option<Position> {
    let route_renderer = {
        let registry = registry.lock().unwrap();
        registry.clone()
    };
    route_renderer.map(|route_renderer| {
        let route_renderer = route_renderer.lock().unwrap();
        route_renderer.map_center().unwrap_or(default_center)
    })
}

struct AppState {
    registry: Arc<Mutex<Registry>>,
    default_center: Position,
}

async fn serve_segments(
    _id: web::Path<String>,
    query: web::Query<SegmentsQuery>,
    data: web::Data<AppState>,
) -> HttpResponse {
    match handle_segments_query(&data.registry, &query, data.default_center) {
        SegmentsReply::NotFound => HttpResponse::NotFound().finish(),
        SegmentsReply::NotModified => HttpResponse::NotModified().finish(),
        SegmentsReply::Segments(response) => HttpResponse::Ok().json(&response),
    }
}

async fn serve_center(_id: web::Path<String>, data: web::Data<AppState>) -> HttpResponse {
    match handle_center_query(&data.registry, data.default_center) {
        Some(center) => HttpResponse::Ok().json(center),
        None => HttpResponse::NotFound().finish(),
    }
}

/// HTTP surface for the external map widget: it pulls the current segment
/// list (conditionally, by version) and pushes zoom changes via the same
/// endpoint. Runs on its own thread with its own runtime.
pub struct RouteServer {
    host: String,
    port: u16,
    url_prefix: String,
    handle: Option<thread::JoinHandle<()>>,
    registry: Arc<Mutex<Registry>>,
}

impl RouteServer {
    pub fn create_and_start(
        host: &str,
        port: Option<u16>,
        registry: Arc<Mutex<Registry>>,
        default_center: Position,
    ) -> Result<RouteServer> {
        let requested_port = port.unwrap_or(0);
        let bind_host = host.to_string();
        let registry_for_server = registry.clone();
        let random_prefix = Uuid::new_v4().to_string();
        let prefix_for_server = random_prefix.clone();

        // channel so the caller only returns once the real port is known
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let app_state = web::Data::new(AppState {
                registry: registry_for_server,
                default_center,
            });

            let runtime = Runtime::new().expect("Failed to create Tokio runtime");
            runtime.block_on(async move {
                let server = HttpServer::new(move || {
                    App::new()
                        .app_data(app_state.clone())
                        .wrap_fn(|req, srv| {
                            info!("Incoming request: {} {}", req.method(), req.uri());
                            srv.call(req)
                        })
                        .route(
                            &format!("/{prefix_for_server}/route/{{id}}/segments"),
                            web::get().to(serve_segments),
                        )
                        .route(
                            &format!("/{prefix_for_server}/route/{{id}}/center"),
                            web::get().to(serve_center),
                        )
                })
                .bind(format!("{bind_host}:{requested_port}"))
                .expect("Failed to bind server");

                let actual_port = server
                    .addrs()
                    .first()
                    .map(|addr| addr.port())
                    .unwrap_or(requested_port);
                tx.send(actual_port).expect("Failed to send completion signal");

                info!("route server listening on {bind_host}:{actual_port}");
                server.run().await.expect("Server failed to run");
            });
        });

        let port = rx.recv()?;
        Ok(RouteServer {
            host: host.to_string(),
            port,
            url_prefix: random_prefix,
            handle: Some(handle),
            registry,
        })
    }

    pub fn register_route_renderer(
        &self,
        route_renderer: Arc<Mutex<RouteRenderer>>,
    ) -> RouteRendererToken {
        register_route_renderer(self.registry.clone(), route_renderer)
    }

    pub fn get_http_url(&self, token: &RouteRendererToken) -> String {
        format!(
            "http://{}:{}/{}/route/{}/segments",
            self.host,
            self.port,
            self.url_prefix,
            token.route_id()
        )
    }

    /// The server future never resolves on its own; dropping the handle
    /// detaches the thread, which dies with the process.
    pub fn stop(&mut self) {
        self.handle.take();
    }
}
