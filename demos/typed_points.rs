//! Turning Rust types into points and back.
//!
//! Run with: cargo run --example typed_points

use pandora_points::{from_point, parse_record, to_point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Access {
    host: String,
    status: u16,
    duration_ms: f64,
    referer: Option<String>,
    headers: BTreeMap<String, String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut headers = BTreeMap::new();
    headers.insert("accept".to_string(), "text/html".to_string());

    let access = Access {
        host: "web-01".to_string(),
        status: 200,
        duration_ms: 3.25,
        referer: None,
        headers,
    };

    let point = to_point(&access)?;
    let record = point.to_string();
    println!("Record ({} bytes): {}", point.byte_size(), record);

    // Parsed values are all text; from_point reads them back into typed fields
    let parsed = parse_record(&record);
    let access_back: Access = from_point(&parsed)?;
    assert_eq!(access, access_back);
    println!("✓ Round-trip successful");

    Ok(())
}
