//! Building points, batching them for ingestion, and reading them back.
//!
//! Run with: cargo run --example ingest_batch

use chrono::Utc;
use pandora_points::{parse_records, Batch, Point, PointOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Small limits so the demo produces several batches
    let options = PointOptions::new()
        .with_max_point_size(256)
        .with_max_batch_size(200);

    let mut batch = Batch::with_options(options);
    let mut shipped = Vec::new();

    for i in 0..10 {
        let mut point = Point::with_options(options);
        point.append("host", format!("web-{:02}", i % 3));
        point.append("status", if i % 4 == 0 { 503 } else { 200 });
        point.append("latency", 0.5 + f64::from(i));
        point.append("at", Utc::now());
        point.append("msg", "request done\ttrace follows\nsecond line");

        if point.is_too_large() {
            println!("skipping oversized point ({} bytes)", point.byte_size());
            continue;
        }
        if !batch.fits(&point) {
            shipped.push(batch.to_string());
            batch.take();
        }
        batch.push(point)?;
    }
    if !batch.is_empty() {
        shipped.push(batch.to_string());
    }

    for (i, text) in shipped.iter().enumerate() {
        println!("batch {} ({} bytes):\n{}", i, text.len(), text);
    }

    // The ingestion side sees text only
    let received: usize = shipped.iter().map(|text| parse_records(text).len()).sum();
    println!("✓ {} points across {} batches", received, shipped.len());

    Ok(())
}
