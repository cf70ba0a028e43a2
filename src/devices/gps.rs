//! u-blox GPS receiver: NMEA sentences from a serial device
//!
//! The port is read as a line-oriented stream; configure the baud rate on the
//! tty beforehand (the receiver defaults to 9600). Only GGA fixes are parsed.

use std::path::Path;

use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

/// A decoded GGA fix in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
}

pub struct Gps {
    lines: Lines<BufReader<File>>,
}

impl Gps {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .with_context(|| format!("open GPS serial device {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }

    /// Next NMEA sentence, or None at end of stream.
    pub async fn next_sentence(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.lines.next_line().await.context("read GPS data")?)
    }
}

/// Parse a GGA sentence into a fix. Non-GGA sentences and sentences without
/// coordinates (no satellite lock yet) yield None.
pub fn parse_gga(sentence: &str) -> Option<Fix> {
    let fields: Vec<&str> = sentence.trim().split(',').collect();
    if fields.len() < 6 || !fields[0].ends_with("GGA") {
        return None;
    }
    let latitude = coord_to_degrees(fields[2], fields[3])?;
    let longitude = coord_to_degrees(fields[4], fields[5])?;
    Some(Fix {
        latitude,
        longitude,
    })
}

/// Convert an NMEA ddmm.mmmm coordinate and hemisphere letter to signed
/// decimal degrees.
pub fn coord_to_degrees(raw: &str, hemisphere: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    let value: f64 = raw.parse().ok()?;
    let degrees = (value / 100.0).trunc();
    let minutes = value - degrees * 100.0;
    let decimal = degrees + minutes / 60.0;
    match hemisphere {
        "S" | "W" => Some(-decimal),
        _ => Some(decimal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_conversion() {
        // 4532.5103 = 45 degrees, 32.5103 minutes
        let d = coord_to_degrees("4532.5103", "N").unwrap();
        assert!((d - 45.541_838).abs() < 1e-5, "got {}", d);

        let d = coord_to_degrees("12245.0000", "W").unwrap();
        assert!((d + 122.75).abs() < 1e-9, "got {}", d);

        assert_eq!(coord_to_degrees("", "N"), None);
        assert_eq!(coord_to_degrees("garbage", "N"), None);
    }

    #[test]
    fn test_parse_gga() {
        let fix = parse_gga(
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
        )
        .unwrap();
        assert!((fix.latitude - 48.117_3).abs() < 1e-3);
        assert!((fix.longitude - 11.516_66).abs() < 1e-3);
    }

    #[test]
    fn test_parse_gga_rejects_other_sentences() {
        assert_eq!(parse_gga("$GPGSV,3,1,11,..."), None);
        assert_eq!(parse_gga(""), None);
    }

    #[test]
    fn test_parse_gga_no_lock() {
        // Empty coordinate fields before satellite lock
        assert_eq!(parse_gga("$GPGGA,123519,,,,,0,00,,,M,,M,,*66"), None);
    }
}
