#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use cabquote::config::Config;
use cabquote::engine::Engine;
use cabquote::entities::{GeoPoint, Place};
use serde_json::{json, Value};

pub const OSASCO: (f64, f64) = (-23.532881, -46.792759);
pub const BARRA_FUNDA: (f64, f64) = (-23.525440, -46.664399);
pub const JARDIM_AMERICA: (f64, f64) = (-23.567982, -46.683396);
pub const PAULISTA: (f64, f64) = (-23.561706, -46.655980);

pub fn config(server_uri: &str, history_dir: &Path) -> Config {
    Config {
        maps_api_base: server_uri.to_string(),
        maps_api_key: "test-key".into(),
        ride_api_base: server_uri.to_string(),
        history_dir: history_dir.to_path_buf(),
        request_timeout: Duration::from_secs(5),
        quote_max_retries: 3,
        quote_retry_backoff: Duration::ZERO,
        listen_addr: "127.0.0.1:0".parse().unwrap(),
    }
}

pub fn engine(server_uri: &str, history_dir: &Path) -> Engine {
    Engine::new(&config(server_uri, history_dir)).expect("engine should build")
}

pub fn point((latitude, longitude): (f64, f64)) -> GeoPoint {
    GeoPoint::new(latitude, longitude).unwrap()
}

pub fn places() -> Vec<Place> {
    vec![
        Place::new(
            "Av. Pres. Kenedy, 2385 - Remédios, Osasco - SP, 02675-031",
            point(OSASCO),
        ),
        Place::new(
            "Av. Thomas Edison, 365 - Barra Funda, São Paulo - SP, 01140-000",
            point(BARRA_FUNDA),
        ),
        Place::new(
            "Av. Brasil, 2033 - Jardim America, São Paulo - SP, 01431-001",
            point(JARDIM_AMERICA),
        ),
        Place::new(
            "Av. Paulista, 1538 - Bela Vista, São Paulo - SP, 01310-200",
            point(PAULISTA),
        ),
    ]
}

pub fn option_json(id: i64, name: &str, value: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Motorista parceiro",
        "vehicle": "car",
        "review": { "rating": 4.5, "comment": "ok" },
        "value": value
    })
}

pub fn estimate_json(options: Vec<Value>) -> Value {
    json!({ "options": options })
}

pub fn directions_json() -> Value {
    json!({
        "status": "OK",
        "routes": [{
            "overview_polyline": { "points": "nnseCvrc|G~@iBbA{C" },
            "legs": [{
                "distance": { "text": "18,4 km", "value": 18412 },
                "duration": { "text": "32 minutos", "value": 1920 }
            }]
        }]
    })
}
