//! End-to-end pipeline test: load -> resolve -> filter -> aggregate -> export
//!
//! Runs entirely offline against the built-in gazetteer.

use std::io::Write;
use std::path::Path;

use ratefinder_app::app::{LaneSearchService, SearchRequest, SearchServiceError};
use ratefinder_app::export::{export_to_csv, export_to_excel};
use ratefinder_app::map::RouteMap;
use ratefinder_domain::model::{EquipmentGroup, LocationDescriptor, Selection, ServiceType};
use ratefinder_domain::repository::LaneRepository;
use ratefinder_infra::persistence::FileLaneRepository;
use ratefinder_infra::schema::ColumnAliases;
use ratefinder_infra::{load_aliases_from_str, load_lanes_from_path, OfflineGeocoder};
use ratefinder_types::{Error, SchemaError};
use tempfile::TempDir;

const VENDOR_EXPORT: &str = "\
Origin City,Origin State,Origin Country,Origin Zip/Postal Code,Destination City,Destination State,Destination Country,Destination Zip/Postal Code,Currency,Carrier Total (converted),Equipment Type: Name,Expected Ship Date,Carrier Name,-Mode Type
Toronto,ON,Canada,M5H 2N2,Montreal,QC,Canada,H2Y 1C6,CAD,\"$1,000.00\",Dry Van,2024-01-10,CarrierOne,FTL
Toronto,ON,Canada,M5H 2N2,Montreal,QC,Canada,H2Y 1C6,CAD,1500,dry van,2024-02-10,SpeedXpress,FTL
Toronto,ON,Canada,M5H 2N2,Montreal,QC,Canada,H2Y 1C6,CAD,1800,Dry Van,2024-03-10,LogiTrans,FTL
Toronto,ON,Canada,M5H 2N2,Montreal,QC,Canada,H2Y 1C6,CAD,call for quote,Dry Van,2024-03-11,Global Haul,FTL
Toronto,ON,Canada,M5H 2N2,Montreal,QC,Canada,H2Y 1C6,CAD,950,Flatbed w/Tarps,2024-03-12,FastFreight,FTL
Chicago,IL,USA,60601,Detroit,MI,USA,48226,USD,700,Reefer,2024-03-01,LogiTrans,LTL
Atlantis,,,,Montreal,QC,Canada,H2Y 1C6,CAD,400,Reefer,2024-03-02,CarrierOne,FTL
";

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn load_and_resolve(path: std::path::PathBuf) -> (LaneSearchService<OfflineGeocoder>, Vec<ratefinder_domain::model::LaneRecord>) {
    let repo = FileLaneRepository::new(path, ColumnAliases::builtin()).unwrap();
    let mut records = repo.find_all().unwrap();
    let mut service = LaneSearchService::new(OfflineGeocoder::default());
    service.resolve_records(&mut records, &mut |_, _| {});
    (service, records)
}

#[test]
fn test_vendor_export_search_and_summary() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "vendor.csv", VENDOR_EXPORT);
    let (mut service, records) = load_and_resolve(path);

    assert_eq!(records.len(), 7);
    assert!(records[0].distance_miles.is_some());
    // Atlantis never resolves
    assert!(records[6].origin.coordinate.is_none());

    let request = SearchRequest::new(50.0)
        .with_origin(LocationDescriptor::from_address("Toronto, ON, Canada"))
        .with_destination(LocationDescriptor::from_address("Montreal, QC"))
        .with_services(Selection::Only(vec![ServiceType::FullTruckload]))
        .with_equipment(Selection::Only(vec![EquipmentGroup::DryVan]));
    let outcome = service.search(&records, &request).unwrap();

    // the unrated quote is still listed
    assert_eq!(outcome.rows.len(), 4);
    assert_eq!(outcome.summaries.len(), 1);
    let summary = &outcome.summaries[0];
    assert_eq!(summary.quote_count, 3);
    assert_eq!(summary.min_rate, 1000.0);
    assert_eq!(summary.mean_rate, 1433.33);
    assert_eq!(summary.max_rate, 1800.0);
}

#[test]
fn test_destination_only_search_ignores_unresolved_origin() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "vendor.csv", VENDOR_EXPORT);
    let (mut service, records) = load_and_resolve(path);

    let request = SearchRequest::new(10.0).with_destination(LocationDescriptor::from_address("Montreal"));
    let outcome = service.search(&records, &request).unwrap();

    // Atlantis -> Montreal matches on its destination alone
    assert_eq!(outcome.rows.len(), 6);
    assert!(outcome.rows.iter().any(|r| r.origin.city == "Atlantis"));
    // ...but has no map segment
    assert_eq!(outcome.route_map.segments.len(), 5);

    let dual = SearchRequest::new(10_000.0)
        .with_origin(LocationDescriptor::from_address("Chicago"))
        .with_destination(LocationDescriptor::from_address("Montreal"));
    let outcome = service.search(&records, &dual).unwrap();
    assert!(outcome.rows.iter().all(|r| r.origin.city != "Atlantis"));
}

#[test]
fn test_larger_radius_never_drops_matches() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "vendor.csv", VENDOR_EXPORT);
    let (mut service, records) = load_and_resolve(path);

    let mut previous = 0;
    for radius in [0.0, 10.0, 250.0, 400.0, 1000.0] {
        let request = SearchRequest::new(radius).with_origin(LocationDescriptor::from_address("Detroit, MI"));
        let count = service.search(&records, &request).unwrap().rows.len();
        assert!(count >= previous, "radius {} gave {} < {}", radius, count, previous);
        previous = count;
    }
    assert!(previous > 0);
}

#[test]
fn test_export_round_trip_and_artifacts() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "vendor.csv", VENDOR_EXPORT);
    let (mut service, records) = load_and_resolve(path);

    let request = SearchRequest::new(100.0).with_origin(LocationDescriptor::from_address("Toronto"));
    let outcome = service.search(&records, &request).unwrap();
    assert!(!outcome.is_empty());

    let csv_path = dir.path().join("rows.csv");
    export_to_csv(&outcome.rows, &csv_path).unwrap();
    let reloaded = load_lanes_from_path(&csv_path, &ColumnAliases::builtin()).unwrap();
    assert_eq!(reloaded.records, outcome.rows);

    let xlsx_path = dir.path().join("rows.xlsx");
    export_to_excel(&outcome.rows, &outcome.summaries, &xlsx_path).unwrap();
    assert!(xlsx_path.exists());

    let map_path = dir.path().join("map.json");
    outcome.route_map.write_json(&map_path).unwrap();
    let map: RouteMap = serde_json::from_str(&std::fs::read_to_string(&map_path).unwrap()).unwrap();
    assert_eq!(map, outcome.route_map);
    assert_eq!(map.viewport.map(|v| v.zoom), Some(4));
}

#[test]
fn test_missing_column_rejected_with_name() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "broken.csv",
        "Origin City,Destination City,Carrier Total (converted)\nToronto,Montreal,1000\n",
    );
    let repo = FileLaneRepository::new(path, ColumnAliases::builtin()).unwrap();
    match repo.find_all() {
        Err(Error::Schema(SchemaError::MissingColumns(missing))) => {
            assert_eq!(missing, vec!["equipment_type".to_string()]);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(records) => panic!("expected schema error, got {} records", records.len()),
    }
}

#[test]
fn test_alias_overrides_apply() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "custom.csv",
        "Pickup City,Drop City,Trailer,Linehaul\nToronto,Montreal,Reefer,1234\n",
    );
    let aliases = load_aliases_from_str(
        r#"
[aliases]
"Pickup City" = "origin_city"
"Drop City" = "destination_city"
"Trailer" = "equipment_type"
"Linehaul" = "rate"
"#,
    )
    .unwrap();

    let table = load_lanes_from_path(&path, &aliases).unwrap();
    assert_eq!(table.records.len(), 1);
    assert_eq!(table.records[0].rate, Some(1234.0));
    assert_eq!(table.records[0].equipment_group, EquipmentGroup::Reefer);
}

#[test]
fn test_no_location_criteria() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "vendor.csv", VENDOR_EXPORT);
    let (mut service, records) = load_and_resolve(path);

    let err = service.search(&records, &SearchRequest::new(50.0)).unwrap_err();
    assert!(matches!(err, SearchServiceError::NoLocationCriteria));
    assert!(matches!(Error::from(err), Error::NoLocationCriteria));
}
