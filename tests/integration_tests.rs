use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use indexmap::IndexMap;
use pandora_points::{
    from_point, from_reader, parse_records, point, to_point, to_string, to_writer, Batch, Error,
    Point, PointOptions, Value,
};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Request {
    method: String,
    path: String,
    status: u16,
    duration_ms: f64,
    user: Option<String>,
    tags: Vec<String>,
    #[serde(with = "pandora_points::ser::date")]
    at: DateTime<FixedOffset>,
}

fn sample_request(status: u16) -> Request {
    Request {
        method: "GET".to_string(),
        path: "/api/v1/items?page=2".to_string(),
        status,
        duration_ms: 12.5,
        user: Some("alice".to_string()),
        tags: vec!["edge".to_string(), "cache-miss".to_string()],
        at: FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 9, 15, 0)
            .unwrap(),
    }
}

#[test]
fn test_typed_record() {
    let tz = FixedOffset::east_opt(8 * 3600).unwrap();
    let mut point = Point::new();
    point.append("int", 1);
    point.append("long", 2i64);
    point.append("double", 3.5);
    point.append("float", 4.25f32);
    point.append("bool", true);
    point.append("text", "hello world");
    point.append(
        "date",
        Value::Date(tz.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
    );
    point.append_array("list", &vec!["x", "y"]).unwrap();

    let mut map = IndexMap::new();
    map.insert("b", 1);
    map.insert("a", 2);
    point.append_map("map", &map).unwrap();

    assert_eq!(
        point.to_string(),
        "int=1\tlong=2\tdouble=3.5\tfloat=4.25\tbool=true\ttext=hello world\t\
         date=2024-01-15T10:30:00.000+08:00\tlist=[\"x\",\"y\"]\tmap={\"b\":1,\"a\":2}\n"
    );
    assert_eq!(point.byte_size(), point.to_string().len());
}

#[test]
fn test_local_date_rendering() {
    let at = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
    let mut point = Point::new();
    point.append("at", at);

    let rendered = point.get("at").unwrap().to_string();
    let parsed = DateTime::parse_from_rfc3339(&rendered).unwrap();
    assert_eq!(parsed.with_timezone(&Utc), at);
    assert!(rendered.contains(".000"));
    assert!(!rendered.ends_with('Z'));
}

#[test]
fn test_struct_to_point_and_back() {
    let request = sample_request(200);
    let point = to_point(&request).unwrap();

    assert_eq!(point.get("status"), Some(&Value::Int(200)));
    let rendered = point.get("at").and_then(|v| v.as_str()).unwrap();
    let mut expected = Point::new();
    expected.append("at", request.at);
    assert_eq!(
        expected.get("at").map(ToString::to_string).as_deref(),
        Some(rendered)
    );
    assert!(rendered.contains(".000"));
    assert!(!rendered.ends_with('Z'));

    let back: Request = from_point(&point).unwrap();
    assert_eq!(back, request);
}

#[test]
fn test_struct_through_text() {
    let requests: Vec<Point> = (0..3)
        .map(|i| to_point(&sample_request(200 + i)).unwrap())
        .collect();
    let text = to_string(&requests);
    assert_eq!(text.lines().count(), 3);

    let points = parse_records(&text);
    let back: Vec<Request> = points
        .iter()
        .map(|p| from_point(p).unwrap())
        .collect();
    assert_eq!(back[2], sample_request(202));
}

#[test]
fn test_optional_field_omitted() {
    let mut request = sample_request(404);
    request.user = None;
    let point = to_point(&request).unwrap();
    assert!(point.get("user").is_none());

    let back: Request = from_point(&point).unwrap();
    assert_eq!(back.user, None);
}

#[test]
fn test_batching_respects_limits() {
    let options = PointOptions::new().with_max_batch_size(64);
    let mut batch = Batch::with_options(options);
    let mut shipped = Vec::new();

    for i in 0..20 {
        let p = point!({ "seq": i, "msg": "tick" });
        if !batch.fits(&p) {
            shipped.push(batch.to_string());
            batch.take();
        }
        batch.push(p).unwrap();
    }
    shipped.push(batch.to_string());

    assert!(shipped.iter().all(|text| text.len() <= 64));
    let total: usize = shipped.iter().map(|text| parse_records(text).len()).sum();
    assert_eq!(total, 20);
}

#[test]
fn test_oversized_point_rejected_by_batch() {
    let options = PointOptions::new().with_max_point_size(32);
    let mut point = Point::with_options(options);
    point.append("payload", "x".repeat(40));
    assert!(point.is_too_large());

    let mut batch = Batch::with_options(options);
    let err = batch.push(point).unwrap_err();
    assert!(matches!(err, Error::PointTooLarge { limit: 32, .. }));
}

#[test]
fn test_writer_reader_round_trip() {
    let points = vec![
        point!({ "a": 1, "b": "x" }),
        point!({ "c": false }),
    ];
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &points).unwrap();

    let read = from_reader(Cursor::new(buffer)).unwrap();
    assert_eq!(read.len(), 2);
    assert_eq!(to_string(&read), to_string(&points));
}

#[test]
fn test_utc_date_through_serde_matches_append() {
    #[derive(Serialize)]
    struct Login {
        #[serde(with = "pandora_points::ser::date")]
        at: DateTime<Utc>,
    }

    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let bridged = to_point(&Login { at }).unwrap();
    let mut appended = Point::new();
    appended.append("at", at);
    assert_eq!(bridged.to_string(), appended.to_string());
}

#[test]
fn test_invalid_keys_never_reach_the_record() {
    let mut point = Point::new();
    assert!(point.try_append("", Some("v")).is_err());
    assert!(point.try_append("  ", Some("w")).is_err());
    assert!(point.try_append("k\tx", Some("y")).is_err());
    point.try_append("k", Some("z")).unwrap();
    assert_eq!(parse_records(&point.to_string())[0].len(), 1);
}

#[test]
fn test_try_append_absent_value() {
    let mut point = point!({ "a": 1 });
    let before = point.byte_size();
    let err = point.try_append::<String>("b", None).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(point.byte_size(), before);
}
