//! Record Text Format
//!
//! This module documents the text format points are encoded in, as produced and
//! consumed by this library and accepted by the log database ingestion endpoint.
//!
//! # Overview
//!
//! A record is one line of `key=value` fields separated by tabs:
//!
//! ```text
//! field1=value1\tfield2=value2\t...\tfieldN=valueN\n
//! ```
//!
//! - **Field separator**: a single tab (`\t`)
//! - **Record terminator**: a single newline (`\n`) after the last field
//! - **No trailing tab** before the newline
//! - **Empty record**: a point with no fields encodes to the empty string, with no newline
//!
//! Several records are sent together by concatenating their encodings, which gives
//! one record per line:
//!
//! ```text
//! host=web-01\tstatus=200\n
//! host=web-02\tstatus=503\n
//! ```
//!
//! # Values
//!
//! | Type | Encoding | Example |
//! |------|----------|---------|
//! | 32/64-bit integer | Decimal | `status=200` |
//! | Float / double | Decimal, integral values keep `.0` | `ratio=0.25`, `cost=1.0` |
//! | Non-finite float | `Infinity`, `-Infinity`, `NaN` | `limit=Infinity` |
//! | Boolean | `true` / `false` | `cached=false` |
//! | Text | Verbatim, newline and tab escaped | `msg=line one\nline two` |
//! | Date | RFC 3339, milliseconds, numeric offset | `at=2024-01-15T10:30:00.000+08:00` |
//! | Array | Compact JSON | `tags=["edge","cdn"]` |
//! | Mapping | Compact JSON, insertion order | `geo={"lat":1.5,"lon":2.0}` |
//!
//! ## Text escaping
//!
//! Text appended through the typed path has literal newlines replaced by the two
//! characters `\` `n`, and literal tabs by `\` `t`. Nothing else is escaped; in
//! particular `=` stays as is, and a value may contain any number of them.
//!
//! Dates use the local system time zone at the moment they are appended. The
//! offset is always written as `±HH:MM`, also for UTC (`+00:00`, never `Z`).
//!
//! # Parsing
//!
//! Parsing is lenient and never fails:
//!
//! 1. Leading and trailing whitespace of the record is trimmed
//! 2. The record is split on tabs; each segment is trimmed
//! 3. Empty segments are skipped
//! 4. The key is everything before the first `=`, the value everything after it
//! 5. Segments without `=`, or starting with `=` (empty key), are dropped
//!
//! Multi-record text is split on newlines and blank lines are skipped. A non-blank
//! line whose segments are all malformed still yields a (empty) point.
//!
//! Dropped segments and lines are reported at `TRACE` level through `tracing`.
//!
//! # Size Accounting
//!
//! The byte size of a point is the UTF-8 length of its encoding:
//!
//! ```text
//! size = Σ (len(key=value) + 1)
//! ```
//!
//! where the `+ 1` is the tab or newline after each field. The size is maintained
//! as fields are appended; a point is flagged too large once the size reaches the
//! configured threshold (1 MiB by default). Batches are bounded the same way (2 MiB
//! by default).
//!
//! # Limitations
//!
//! - **Types are not recoverable**: every parsed value is text
//! - **Escaping is one-way**: parsing does not unescape `\n` / `\t`, and raw parsed text
//!   is not escaped again when the point is re-encoded
//! - **Keys must be well formed**: non-blank, without `=`, tabs or newlines.
//!   `Point::try_append` and the serde bridge reject other keys; `Point::append`
//!   writes them as given, producing a record that will not parse back the same way
//! - **Duplicate keys** are kept in order; lookups return the first occurrence
//!
//! # Example
//!
//! ```rust
//! use pandora_points::{parse_record, Point};
//!
//! let mut point = Point::new();
//! point.append("msg", "a\tb");
//! point.append("n", 3);
//! assert_eq!(point.to_string(), "msg=a\\tb\tn=3\n");
//!
//! let parsed = parse_record(&point.to_string());
//! assert_eq!(parsed.get("msg").and_then(|v| v.as_str()), Some("a\\tb"));
//! assert_eq!(parsed.get("n").and_then(|v| v.as_str()), Some("3"));
//! ```

// This module contains only documentation; no implementation code
