/// Builds a [`Point`](crate::Point) from `"key": value` pairs, in order.
///
/// Each value goes through [`Point::append`](crate::Point::append), so anything
/// convertible into a [`Value`](crate::Value) works and text is escaped.
///
/// ```rust
/// use pandora_points::point;
///
/// let p = point!({
///     "host": "web-01",
///     "status": 200,
///     "latency": 0.25
/// });
/// assert_eq!(p.to_string(), "host=web-01\tstatus=200\tlatency=0.25\n");
/// ```
#[macro_export]
macro_rules! point {
    // Handle empty point
    ({}) => {
        $crate::Point::new()
    };

    // Handle key/value pairs
    ({ $($key:literal : $value:expr),+ $(,)? }) => {{
        let mut point = $crate::Point::new();
        $(
            point.append($key, $value);
        )+
        point
    }};
}
