//! Flat CSV export.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::domain::Waypoint;

/// Header row, one column per waypoint field.
pub const CSV_HEADER: [&str; 6] = [
    "Location",
    "Country",
    "Latitude",
    "Longitude",
    "Days",
    "Transport",
];

/// Write waypoints as CSV, header first, CRLF line endings.
pub fn write_csv<'a, W, I>(mut out: W, waypoints: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Waypoint>,
{
    write_row(&mut out, &CSV_HEADER)?;

    for wp in waypoints {
        let latitude = wp.coordinate.latitude().to_string();
        let longitude = wp.coordinate.longitude().to_string();
        let days = wp.duration_days.to_string();
        write_row(
            &mut out,
            &[
                wp.name.as_str(),
                wp.country.as_str(),
                latitude.as_str(),
                longitude.as_str(),
                days.as_str(),
                wp.transport_mode.as_str(),
            ],
        )?;
    }

    out.flush()
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    let line = fields.iter().map(|f| escape(f)).collect::<Vec<_>>().join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")
}

/// Quote a field only when it contains a delimiter, quote, or line break.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn wp(name: &str, country: &str, lat: f64, lon: f64, days: u32, transport: &str) -> Waypoint {
        Waypoint {
            name: name.to_string(),
            country: country.to_string(),
            coordinate: Coordinate::new(lat, lon).unwrap(),
            duration_days: days,
            transport_mode: transport.to_string(),
        }
    }

    fn render(waypoints: &[Waypoint]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, waypoints).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_when_empty() {
        assert_eq!(
            render(&[]),
            "Location,Country,Latitude,Longitude,Days,Transport\r\n"
        );
    }

    #[test]
    fn rows_in_order() {
        let out = render(&[
            wp("Oslo", "Norway", 59.9139, 10.7522, 4, "Plane"),
            wp("Bangkok", "Thailand", 13.736717, 100.523186, 4, "Bus"),
        ]);

        let lines: Vec<&str> = out.split("\r\n").collect();
        assert_eq!(lines[1], "Oslo,Norway,59.9139,10.7522,4,Plane");
        assert_eq!(lines[2], "Bangkok,Thailand,13.736717,100.523186,4,Bus");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn quotes_fields_with_delimiters() {
        let out = render(&[wp(
            "Koh Rong, \"Samloem\"",
            "Cambodia",
            10.7136,
            103.2342,
            3,
            "",
        )]);

        assert!(out.contains("\"Koh Rong, \"\"Samloem\"\"\",Cambodia,10.7136,103.2342,3,\r\n"));
    }

    #[test]
    fn slash_names_are_unquoted() {
        let out = render(&[wp("Ha Long Bay / Cat Ba", "Vietnam", 20.9101, 107.1839, 2, "")]);
        assert!(out.contains("Ha Long Bay / Cat Ba,Vietnam,"));
    }

    #[test]
    fn tiny_coordinates_are_plain_decimal() {
        let out = render(&[wp("Null Island", "XX", 0.0000001, -0.00000025, 0, "")]);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row, "Null Island,XX,0.0000001,-0.00000025,0,");
    }
}
