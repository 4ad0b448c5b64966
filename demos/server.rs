use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use rand::Rng;
use routeviz_core::config::CoreConfig;
use routeviz_core::renderer::route_server::{register_route_renderer, Registry};
use routeviz_core::renderer::{RouteRenderer, RouteServer};
use routeviz_core::route::Route;
use routeviz_core::telemetry::RawSample;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// A meandering lap with a speed profile that sweeps through all color
// buckets.
fn synthetic_samples(count: usize) -> Vec<RawSample> {
    let mut rng = rand::rng();
    let mut samples = Vec::with_capacity(count);
    let mut x = 0.0;
    let mut y = 0.0;
    for i in 0..count {
        let heading = (i as f64 / 40.0).sin();
        x += 12.0 + rng.random_range(-2.0..=2.0);
        y += heading * 9.0 + rng.random_range(-2.0..=2.0);
        let forward = 20.0 + 15.0 * (i as f64 / 90.0).cos();
        samples.push(RawSample {
            planar_x: x,
            planar_y: y,
            velocity_x: forward,
            velocity_y: rng.random_range(-3.0..=3.0),
            velocity_z: 0.0,
        });
    }
    samples
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    let config = CoreConfig::default();
    let registry: Arc<Mutex<Registry>> = Arc::new(Mutex::new(None));
    let mut server = RouteServer::create_and_start(
        "localhost",
        None,
        registry.clone(),
        config.origin.position(),
    )?;

    let route = Route::from_samples(synthetic_samples(4000), &config.origin);
    let route_renderer = Arc::new(Mutex::new(RouteRenderer::new(route, config.default_zoom)));
    let token = register_route_renderer(registry.clone(), route_renderer.clone());

    println!("================================================");
    println!("[Route Segments]: {}", server.get_http_url(&token));
    println!("Append ?zoom=9 (or any other zoom) to rederive the segment list.");

    // keep the lap growing so conditional fetches see fresh versions
    let route_renderer_clone = route_renderer.clone();
    let origin = config.origin;
    std::thread::spawn(move || {
        let mut count = 4000;
        loop {
            std::thread::sleep(Duration::from_secs(2));
            count += 200;
            let route = Route::from_samples(synthetic_samples(count), &origin);
            route_renderer_clone.lock().unwrap().replace(route);
        }
    });

    println!("Press Ctrl+C to exit");
    enable_raw_mode()?;
    loop {
        if let Ok(Event::Key(KeyEvent {
            code, modifiers, ..
        })) = event::read()
        {
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                disable_raw_mode()?;
                println!("Ctrl+C pressed. Stopping server...");
                server.stop();
                std::process::exit(0);
            }
        }
    }
}
