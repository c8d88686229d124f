//! CSV loader for lane rate tables
//!
//! Accepts UTF-8 (with or without BOM) and falls back to Windows-1252, which
//! older vendor exports still use.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use encoding_rs::{UTF_8, WINDOWS_1252};
use ratefinder_domain::model::{Coordinate, LaneRecord, LocationDescriptor, ServiceType};
use ratefinder_types::{Error, SchemaError};
use serde::Serialize;
use thiserror::Error;

use crate::schema::{CanonicalField, ColumnAliases, ColumnMap};

#[derive(Error, Debug)]
pub enum CsvLoaderError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<CsvLoaderError> for Error {
    fn from(err: CsvLoaderError) -> Self {
        match err {
            CsvLoaderError::IoError(e) => Error::Io(e),
            CsvLoaderError::CsvError(e) => Error::Csv(e),
            CsvLoaderError::Schema(e) => Error::Schema(e),
        }
    }
}

/// Loaded records plus what was learned while parsing them
#[derive(Debug, Clone, Serialize)]
pub struct LoadedTable {
    pub records: Vec<LaneRecord>,
    /// (canonical field, source header)
    pub columns: Vec<(String, String)>,
    pub unmapped_headers: Vec<String>,
    /// Non-empty rate cells that were not a non-negative number
    pub unparsed_rates: usize,
    /// Non-empty date cells in no recognised format
    pub unparsed_dates: usize,
    /// Latitude/longitude cells present but unusable
    pub invalid_coordinates: usize,
}

impl LoadedTable {
    pub fn rated_count(&self) -> usize {
        self.records.iter().filter(|r| r.rate.is_some()).count()
    }
}

pub fn load_lanes_from_path<P: AsRef<Path>>(path: P, aliases: &ColumnAliases) -> Result<LoadedTable, CsvLoaderError> {
    load_lanes_from_reader(File::open(path)?, aliases)
}

pub fn load_lanes_from_reader<R: Read>(mut reader: R, aliases: &ColumnAliases) -> Result<LoadedTable, CsvLoaderError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    load_lanes_from_bytes(&bytes, aliases)
}

pub fn load_lanes_from_bytes(bytes: &[u8], aliases: &ColumnAliases) -> Result<LoadedTable, CsvLoaderError> {
    let text = decode(bytes);
    if text.trim().is_empty() {
        return Err(SchemaError::EmptyTable.into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = aliases.resolve(headers.iter())?;

    let mut table = LoadedTable {
        records: Vec::new(),
        columns: columns
            .mapping()
            .into_iter()
            .map(|(f, h)| (f.name().to_string(), h))
            .collect(),
        unmapped_headers: columns.unmapped_headers(),
        unparsed_rates: 0,
        unparsed_dates: 0,
        invalid_coordinates: 0,
    };

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        // +2: 0-based index, header is row 1
        let row_num = row_idx + 2;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let lane = parse_record(&record, &columns, row_num, &mut table);
        table.records.push(lane);
    }

    log::info!(
        "loaded {} lane(s), {} without a usable rate",
        table.records.len(),
        table.records.len() - table.rated_count()
    );
    Ok(table)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }
    log::warn!("input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    row_num: usize,
    table: &mut LoadedTable,
) -> LaneRecord {
    let cell = |field: CanonicalField| columns.get(record, field);

    let origin = parse_location(
        record,
        columns,
        [
            CanonicalField::OriginCity,
            CanonicalField::OriginState,
            CanonicalField::OriginCountry,
            CanonicalField::OriginPostal,
            CanonicalField::OriginLat,
            CanonicalField::OriginLon,
        ],
        row_num,
        &mut table.invalid_coordinates,
    );
    let destination = parse_location(
        record,
        columns,
        [
            CanonicalField::DestinationCity,
            CanonicalField::DestinationState,
            CanonicalField::DestinationCountry,
            CanonicalField::DestinationPostal,
            CanonicalField::DestinationLat,
            CanonicalField::DestinationLon,
        ],
        row_num,
        &mut table.invalid_coordinates,
    );

    let rate = cell(CanonicalField::Rate).and_then(|raw| {
        let parsed = parse_rate(raw);
        if parsed.is_none() {
            log::warn!("row {}: rate '{}' is not a valid amount", row_num, raw);
            table.unparsed_rates += 1;
        }
        parsed
    });

    let ship_date = cell(CanonicalField::ShipDate).and_then(|raw| {
        let parsed = parse_date(raw);
        if parsed.is_none() {
            log::warn!("row {}: unrecognised date '{}'", row_num, raw);
            table.unparsed_dates += 1;
        }
        parsed
    });

    let mode_type = cell(CanonicalField::ModeType).unwrap_or("");
    // Vendor exports carry no service column; their mode type often is one.
    let service_type = if columns.has(CanonicalField::ServiceType) {
        cell(CanonicalField::ServiceType).and_then(ServiceType::parse)
    } else {
        ServiceType::parse(mode_type)
    };

    let mut lane = LaneRecord::new(origin, destination, cell(CanonicalField::EquipmentType).unwrap_or(""))
        .with_service_type(service_type)
        .with_mode_type(mode_type)
        .with_carrier(cell(CanonicalField::CarrierName).unwrap_or(""))
        .with_currency(cell(CanonicalField::Currency).unwrap_or(""))
        .with_ship_date(ship_date)
        .with_rate(rate);
    lane.service_name = cell(CanonicalField::ServiceName).map(str::to_string);
    lane.load_number = cell(CanonicalField::LoadNumber).map(str::to_string);
    lane.stops = cell(CanonicalField::Stops).and_then(parse_count);
    lane
}

fn parse_location(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    [city, state, country, postal, lat, lon]: [CanonicalField; 6],
    row_num: usize,
    invalid_coordinates: &mut usize,
) -> LocationDescriptor {
    let cell = |field: CanonicalField| columns.get(record, field).unwrap_or("");

    let raw_lat = columns.get(record, lat);
    let raw_lon = columns.get(record, lon);
    let coordinate = match (raw_lat, raw_lon) {
        (None, None) => None,
        (raw_lat, raw_lon) => {
            let coordinate = Coordinate::from_parts(
                raw_lat.and_then(|v| v.parse().ok()),
                raw_lon.and_then(|v| v.parse().ok()),
            );
            if coordinate.is_none() {
                log::warn!(
                    "row {}: unusable coordinate ({}, {})",
                    row_num,
                    raw_lat.unwrap_or(""),
                    raw_lon.unwrap_or("")
                );
                *invalid_coordinates += 1;
            }
            coordinate
        }
    };

    LocationDescriptor::new(cell(city), cell(state), cell(country))
        .with_postal_code(cell(postal))
        .with_coordinate(coordinate)
}

/// Strip currency symbols, codes and thousands separators, then parse.
/// Negative or non-numeric amounts are not rates.
pub fn parse_rate(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%m/%d/%Y %H:%M:%S",
    ];

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(datetime.date());
        }
    }
    None
}

fn parse_count(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    let value: f64 = s.parse().ok()?;
    (value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64).then(|| value as u32)
}
