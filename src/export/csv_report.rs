//! Historical counts CSV
//!
//! Counts are placeholders drawn at random, not the live occupancy.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

use crate::core::error::Result;
use crate::export::ExportFile;
use crate::zones::Zone;

pub const CSV_FILE_NAME: &str = "historical_counts.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8;";

/// Write `timestamp,zone,count` plus one row per zone
pub fn write_csv<W: Write, R: Rng>(
    writer: W,
    zones: &[Zone],
    exported_at: DateTime<Utc>,
    rng: &mut R,
) -> Result<()> {
    let timestamp = exported_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(["timestamp", "zone", "count"])?;
    for zone in zones {
        let count = rng.gen_range(0..10u32).to_string();
        csv.write_record([timestamp.as_str(), zone.name.as_str(), count.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Build the downloadable CSV file
pub fn csv_export<R: Rng>(
    zones: &[Zone],
    exported_at: DateTime<Utc>,
    rng: &mut R,
) -> Result<ExportFile> {
    let mut bytes = Vec::new();
    write_csv(&mut bytes, zones, exported_at, rng)?;
    Ok(ExportFile {
        file_name: CSV_FILE_NAME.to_string(),
        content_type: CSV_CONTENT_TYPE.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Rect;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_header_and_rows() {
        let zones = vec![
            Zone::create(Rect::new(0.0, 0.0, 1.0, 1.0), 0),
            Zone::create(Rect::new(0.0, 0.0, 1.0, 1.0), 1),
        ];
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let file = csv_export(&zones, at, &mut rng).unwrap();
        let text = String::from_utf8(file.bytes).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(file.file_name, "historical_counts.csv");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,zone,count");
        assert!(lines[1].starts_with("2024-03-01T12:30:00.000Z,Zone 1,"));
        assert!(lines[2].starts_with("2024-03-01T12:30:00.000Z,Zone 2,"));

        let count: u32 = lines[1].rsplit(',').next().unwrap().parse().unwrap();
        assert!(count < 10);
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let mut zone = Zone::create(Rect::new(0.0, 0.0, 1.0, 1.0), 0);
        zone.name = "Lobby, north".into();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let file = csv_export(&[zone], Utc::now(), &mut rng).unwrap();
        let text = String::from_utf8(file.bytes).unwrap();
        assert!(text.contains(",\"Lobby, north\","));
    }

    #[test]
    fn test_no_zones_is_header_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let file = csv_export(&[], Utc::now(), &mut rng).unwrap();
        assert_eq!(String::from_utf8(file.bytes).unwrap(), "timestamp,zone,count\n");
    }
}
