//! Encoded polyline format used by the directions provider: coordinates are
//! scaled to 5 decimals, delta-encoded against the previous point and written
//! as 5-bit chunks offset by 63.

use crate::entities::GeoPoint;
use crate::error::{malformed_response_error, Error};

const PRECISION: f64 = 1e5;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION: i64 = 0x20;
const OFFSET: i64 = 63;

pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, Error> {
    let mut bytes = encoded.bytes().peekable();
    let mut path = Vec::new();
    let (mut latitude, mut longitude) = (0i64, 0i64);

    while bytes.peek().is_some() {
        latitude += next_value(&mut bytes)?;
        longitude += next_value(&mut bytes)?;

        path.push(GeoPoint {
            latitude: latitude as f64 / PRECISION,
            longitude: longitude as f64 / PRECISION,
        });
    }

    Ok(path)
}

pub fn encode(path: &[GeoPoint]) -> String {
    let mut encoded = String::new();
    let (mut previous_latitude, mut previous_longitude) = (0i64, 0i64);

    for point in path {
        let latitude = scale(point.latitude);
        let longitude = scale(point.longitude);

        push_value(&mut encoded, latitude - previous_latitude);
        push_value(&mut encoded, longitude - previous_longitude);

        previous_latitude = latitude;
        previous_longitude = longitude;
    }

    encoded
}

fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

fn next_value(bytes: &mut impl Iterator<Item = u8>) -> Result<i64, Error> {
    let mut result = 0i64;
    let mut shift = 0;

    loop {
        let byte = bytes
            .next()
            .ok_or_else(|| malformed_response_error("polyline ends mid-coordinate"))?;
        let chunk = byte as i64 - OFFSET;

        if !(0..=CHUNK_MASK | CONTINUATION).contains(&chunk) || shift > 30 {
            return Err(malformed_response_error(format!(
                "invalid polyline character {:?}",
                byte as char
            )));
        }

        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

fn push_value(encoded: &mut String, delta: i64) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };

    while value >= CONTINUATION {
        encoded.push(((CONTINUATION | (value & CHUNK_MASK)) + OFFSET) as u8 as char);
        value >>= 5;
    }

    encoded.push((value + OFFSET) as u8 as char);
}
