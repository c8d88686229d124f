//! Writes lane records back out in the simple schema, derived columns appended

use std::io::Write;

use ratefinder_domain::model::LaneRecord;
use ratefinder_types::Result;

use crate::schema::CanonicalField;

const DERIVED_HEADERS: [&str; 5] = [
    "equipment_group",
    "distance_miles",
    "rate_per_mile",
    "suggested_buy_rate",
    "profit_estimate",
];

pub fn write_lanes<W: Write>(records: &[LaneRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.name()).collect();
    header.extend(DERIVED_HEADERS);
    wtr.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = CanonicalField::ALL.iter().map(|f| field_value(record, *f)).collect();
        row.push(record.equipment_group.to_string());
        row.push(opt_num(record.distance_miles));
        row.push(opt_num(record.rate_per_mile));
        row.push(opt_num(record.suggested_buy_rate));
        row.push(opt_num(record.profit_estimate));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[LaneRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_lanes(records, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn field_value(record: &LaneRecord, field: CanonicalField) -> String {
    let text = |s: &Option<String>| s.clone().unwrap_or_default();
    match field {
        CanonicalField::OriginCity => record.origin.city.clone(),
        CanonicalField::OriginState => record.origin.state.clone(),
        CanonicalField::OriginCountry => record.origin.country.clone(),
        CanonicalField::OriginPostal => text(&record.origin.postal_code),
        CanonicalField::OriginLat => opt_num(record.origin.coordinate.map(|c| c.lat())),
        CanonicalField::OriginLon => opt_num(record.origin.coordinate.map(|c| c.lon())),
        CanonicalField::DestinationCity => record.destination.city.clone(),
        CanonicalField::DestinationState => record.destination.state.clone(),
        CanonicalField::DestinationCountry => record.destination.country.clone(),
        CanonicalField::DestinationPostal => text(&record.destination.postal_code),
        CanonicalField::DestinationLat => opt_num(record.destination.coordinate.map(|c| c.lat())),
        CanonicalField::DestinationLon => opt_num(record.destination.coordinate.map(|c| c.lon())),
        CanonicalField::ServiceType => record.service_type.map(|s| s.code().to_string()).unwrap_or_default(),
        CanonicalField::EquipmentType => record.equipment_type.clone(),
        CanonicalField::ModeType => text(&record.mode_type),
        CanonicalField::CarrierName => text(&record.carrier_name),
        CanonicalField::ServiceName => text(&record.service_name),
        CanonicalField::Rate => opt_num(record.rate),
        CanonicalField::Currency => text(&record.currency),
        CanonicalField::ShipDate => record
            .ship_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        CanonicalField::LoadNumber => text(&record.load_number),
        CanonicalField::Stops => record.stops.map(|s| s.to_string()).unwrap_or_default(),
    }
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_loader::load_lanes_from_bytes;
    use crate::sample_data::sample_lanes;
    use crate::schema::ColumnAliases;

    #[test]
    fn test_written_table_reloads_to_same_records() {
        let records = sample_lanes();
        let text = to_csv_string(&records).unwrap();
        let reloaded = load_lanes_from_bytes(text.as_bytes(), &ColumnAliases::builtin()).unwrap();
        assert_eq!(reloaded.records, records);
    }

    #[test]
    fn test_header_includes_derived_columns() {
        let text = to_csv_string(&[]).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("origin_city,origin_state"));
        assert!(header.ends_with("suggested_buy_rate,profit_estimate"));
    }
}
