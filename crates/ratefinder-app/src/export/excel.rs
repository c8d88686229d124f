//! Excel export functionality

use std::path::Path;

use ratefinder_domain::model::LaneRecord;
use ratefinder_domain::service::LaneSummary;
use ratefinder_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

const RATE_HEADERS: [&str; 13] = [
    "Origin",
    "Origin State",
    "Destination",
    "Destination State",
    "Service",
    "Equipment",
    "Equipment Group",
    "Carrier",
    "Rate",
    "Currency",
    "Ship Date",
    "Distance (mi)",
    "Rate/Mile",
];

const SUMMARY_HEADERS: [&str; 8] = [
    "Origin",
    "Destination",
    "Service",
    "Equipment Group",
    "Quotes",
    "Min Rate",
    "Mean Rate",
    "Max Rate",
];

/// Export rows and lane summaries to an Excel file
pub fn export_to_excel(rows: &[LaneRecord], summaries: &[LaneSummary], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let rates_sheet = workbook.add_worksheet();
    write_rates_sheet(rates_sheet, rows)?;

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, summaries)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }
    Ok(())
}

fn write_text(sheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<()> {
    sheet
        .write_string(row, col, value)
        .map_err(|e| Error::Excel(e.to_string()))?;
    Ok(())
}

/// Empty cell for `None`
fn write_opt_number(sheet: &mut Worksheet, row: u32, col: u16, value: Option<f64>) -> Result<()> {
    if let Some(value) = value {
        sheet
            .write_number(row, col, value)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }
    Ok(())
}

fn write_rates_sheet(sheet: &mut Worksheet, rows: &[LaneRecord]) -> Result<()> {
    sheet
        .set_name("Rates")
        .map_err(|e| Error::Excel(e.to_string()))?;
    write_headers(sheet, &RATE_HEADERS)?;

    for (idx, record) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        write_text(sheet, row, 0, &record.origin.city)?;
        write_text(sheet, row, 1, &record.origin.state)?;
        write_text(sheet, row, 2, &record.destination.city)?;
        write_text(sheet, row, 3, &record.destination.state)?;
        write_text(sheet, row, 4, record.service_type.map(|s| s.code()).unwrap_or(""))?;
        write_text(sheet, row, 5, &record.equipment_type)?;
        write_text(sheet, row, 6, record.equipment_group.as_str())?;
        write_text(sheet, row, 7, record.carrier_name.as_deref().unwrap_or(""))?;
        write_opt_number(sheet, row, 8, record.rate)?;
        write_text(sheet, row, 9, record.currency.as_deref().unwrap_or(""))?;
        let date = record
            .ship_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        write_text(sheet, row, 10, &date)?;
        write_opt_number(sheet, row, 11, record.distance_miles.map(|d| (d * 10.0).round() / 10.0))?;
        write_opt_number(sheet, row, 12, record.rate_per_mile)?;
    }

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, summaries: &[LaneSummary]) -> Result<()> {
    sheet
        .set_name("Lane Summary")
        .map_err(|e| Error::Excel(e.to_string()))?;
    write_headers(sheet, &SUMMARY_HEADERS)?;

    for (idx, summary) in summaries.iter().enumerate() {
        let row = (idx + 1) as u32;
        write_text(sheet, row, 0, &summary.origin_city)?;
        write_text(sheet, row, 1, &summary.destination_city)?;
        write_text(sheet, row, 2, summary.service_type.map(|s| s.code()).unwrap_or(""))?;
        write_text(sheet, row, 3, summary.equipment_group.as_str())?;
        write_opt_number(sheet, row, 4, Some(summary.quote_count as f64))?;
        write_opt_number(sheet, row, 5, Some(summary.min_rate))?;
        write_opt_number(sheet, row, 6, Some(summary.mean_rate))?;
        write_opt_number(sheet, row, 7, Some(summary.max_rate))?;
    }

    Ok(())
}
