//! Built-in sample lane table, used when no data file is given

use chrono::NaiveDate;
use ratefinder_domain::model::{Coordinate, LaneRecord, LocationDescriptor, ServiceType};

#[derive(Debug, Clone, Copy)]
pub struct SampleCity {
    pub city: &'static str,
    pub state: &'static str,
    pub country: &'static str,
    pub postal_code: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl SampleCity {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.lat, self.lon)
    }

    pub fn descriptor(&self) -> LocationDescriptor {
        LocationDescriptor::new(self.city, self.state, self.country)
            .with_postal_code(self.postal_code)
            .with_coordinate(self.coordinate())
    }

    fn currency(&self) -> &'static str {
        match self.country {
            "Canada" => "CAD",
            "Mexico" => "MXN",
            _ => "USD",
        }
    }
}

const fn city(
    city: &'static str,
    state: &'static str,
    country: &'static str,
    postal_code: &'static str,
    lat: f64,
    lon: f64,
) -> SampleCity {
    SampleCity {
        city,
        state,
        country,
        postal_code,
        lat,
        lon,
    }
}

pub const SAMPLE_CITIES: [SampleCity; 13] = [
    city("Toronto", "ON", "Canada", "M5H 2N2", 43.65107, -79.347015),
    city("Montreal", "QC", "Canada", "H2Y 1C6", 45.501689, -73.567256),
    city("Chicago", "IL", "USA", "60601", 41.8781, -87.6298),
    city("Detroit", "MI", "USA", "48226", 42.3314, -83.0458),
    city("Monterrey", "NL", "Mexico", "64000", 25.6866, -100.3161),
    city("San Antonio", "TX", "USA", "78205", 29.4241, -98.4936),
    city("Vancouver", "BC", "Canada", "V6B 2Y5", 49.2827, -123.1207),
    city("Seattle", "WA", "USA", "98101", 47.6062, -122.3321),
    city("Mexico City", "CDMX", "Mexico", "06000", 19.4326, -99.1332),
    city("Guadalajara", "JAL", "Mexico", "44100", 20.6597, -103.3496),
    city("Houston", "TX", "USA", "77002", 29.7604, -95.3698),
    city("Los Angeles", "CA", "USA", "90001", 34.0522, -118.2437),
    city("Calgary", "AB", "Canada", "T2P 1J9", 51.0447, -114.0719),
];

pub fn find_city(name: &str) -> Option<&'static SampleCity> {
    let name = name.trim();
    SAMPLE_CITIES.iter().find(|c| c.city.eq_ignore_ascii_case(name))
}

/// (origin, destination, service, equipment, mode, carrier, rate, ship date)
type SampleLane = (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str, f64, &'static str);

const SAMPLE_LANES: [SampleLane; 20] = [
    ("Toronto", "Montreal", "FTL", "Dry Van", "Truckload", "CarrierOne", 1200.0, "2024-05-02"),
    ("Toronto", "Montreal", "FTL", "Dry Van", "Truckload", "SpeedXpress", 1450.0, "2024-05-10"),
    ("Toronto", "Montreal", "FTL", "Dry Van", "Truckload", "LogiTrans", 1100.0, "2024-04-18"),
    ("Toronto", "Montreal", "LTL", "Reefer", "LTL", "FastFreight", 780.0, "2024-05-06"),
    ("Toronto", "Chicago", "FTL", "Flatbed", "Truckload", "Global Haul", 2350.0, "2024-04-22"),
    ("Montreal", "Toronto", "FTL", "Dry Van", "Truckload", "CarrierOne", 1250.0, "2024-05-14"),
    ("Chicago", "Detroit", "FTL", "Dry Van", "Truckload", "LogiTrans", 650.0, "2024-05-01"),
    ("Chicago", "Detroit", "LTL", "Straight Truck", "LTL", "FastFreight", 420.0, "2024-04-29"),
    ("Detroit", "Chicago", "FTL", "Reefer", "Truckload", "SpeedXpress", 720.0, "2024-05-08"),
    ("Chicago", "Houston", "FTL", "Reefer", "Truckload", "Global Haul", 2900.0, "2024-04-11"),
    ("Monterrey", "San Antonio", "FTL", "Dry Van", "Truckload", "Global Haul", 1800.0, "2024-05-03"),
    ("Monterrey", "San Antonio", "FTL", "Flatbed w/Tarps", "Truckload", "LogiTrans", 2050.0, "2024-04-25"),
    ("Mexico City", "Guadalajara", "FTL", "Dry Van", "Truckload", "CarrierOne", 1600.0, "2024-05-12"),
    ("Guadalajara", "Monterrey", "LTL", "Sprinter", "LTL", "FastFreight", 950.0, "2024-04-30"),
    ("Vancouver", "Seattle", "FTL", "Reefer", "Truckload", "SpeedXpress", 900.0, "2024-05-09"),
    ("Vancouver", "Calgary", "FTL", "Dry Van", "Truckload", "CarrierOne", 2100.0, "2024-04-16"),
    ("Seattle", "Los Angeles", "FTL", "Flatbed", "Truckload", "Global Haul", 3100.0, "2024-05-05"),
    ("Los Angeles", "Houston", "FTL", "Dry Van", "Truckload", "LogiTrans", 3400.0, "2024-04-20"),
    ("Houston", "San Antonio", "LTL", "Dry Van", "LTL", "FastFreight", 380.0, "2024-05-13"),
    ("Calgary", "Vancouver", "FTL", "Reefer", "Truckload", "SpeedXpress", 2250.0, "2024-05-07"),
];

/// The sample table as lane records, coordinates attached and derived columns computed.
pub fn sample_lanes() -> Vec<LaneRecord> {
    SAMPLE_LANES
        .iter()
        .filter_map(|&(from, to, service, equipment, mode, carrier, rate, date)| {
            let origin = find_city(from)?;
            let destination = find_city(to)?;
            let lane = LaneRecord::new(origin.descriptor(), destination.descriptor(), equipment)
                .with_service_type(ServiceType::parse(service))
                .with_mode_type(mode)
                .with_carrier(carrier)
                .with_currency(origin.currency())
                .with_ship_date(NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
                .with_rate(Some(rate));
            Some(lane)
        })
        .collect()
}
