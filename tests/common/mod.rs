//! GHCN-M v4 line builder shared by unit tests, integration tests and benches

/// Render one station-year line
///
/// `station_id` and `element` are written as given, so callers choose the
/// column widths. `None` months become the `-9999` sentinel with blank flags.
pub fn format_record(station_id: &str, year: i32, element: &str, values: &[Option<i32>; 12]) -> String {
    let mut line = format!("{}{:04}{}", station_id, year, element);
    for value in values {
        line.push_str(&format!("{:>5}", value.unwrap_or(-9999)));
        line.push_str(if value.is_some() { "  Q" } else { "   " });
    }
    line
}
