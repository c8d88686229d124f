//! Output formatting module

use ratefinder_app::app::{CarrierOutcome, LaneOptions, PairingLevel, SearchOutcome};
use ratefinder_domain::model::LaneRecord;
use ratefinder_domain::service::{partition_by_equipment, LaneSummary};
use ratefinder_infra::LoadedTable;
use ratefinder_types::{OutputFormat, Result};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn money(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn print_rows(rows: &[LaneRecord]) {
    println!(
        "{:<18} {:<18} {:<4} {:<16} {:<14} {:>10} {:<4} {:<10} {:>8} {:>7}",
        "Origin", "Destination", "Svc", "Equipment", "Carrier", "Rate", "Cur", "Ship date", "Miles", "$/mi"
    );
    println!("{}", "-".repeat(120));
    for r in rows {
        println!(
            "{:<18} {:<18} {:<4} {:<16} {:<14} {:>10} {:<4} {:<10} {:>8} {:>7}",
            truncate(&r.origin.city, 18),
            truncate(&r.destination.city, 18),
            r.service_type.map(|s| s.code()).unwrap_or("-"),
            truncate(&r.equipment_type, 16),
            truncate(r.carrier_name.as_deref().unwrap_or("-"), 14),
            money(r.rate),
            r.currency.as_deref().unwrap_or(""),
            r.ship_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string()),
            r.distance_miles.map(|d| format!("{:.0}", d)).unwrap_or_else(|| "-".to_string()),
            money(r.rate_per_mile),
        );
    }
}

fn print_summaries(summaries: &[LaneSummary]) {
    println!(
        "{:<18} {:<18} {:<4} {:<16} {:>6} {:>10} {:>10} {:>10}",
        "Origin", "Destination", "Svc", "Equipment", "Quotes", "Min", "Mean", "Max"
    );
    println!("{}", "-".repeat(100));
    for s in summaries {
        println!(
            "{:<18} {:<18} {:<4} {:<16} {:>6} {:>10.2} {:>10.2} {:>10.2}",
            truncate(&s.origin_city, 18),
            truncate(&s.destination_city, 18),
            s.service_type.map(|t| t.code()).unwrap_or("-"),
            s.equipment_group.as_str(),
            s.quote_count,
            s.min_rate,
            s.mean_rate,
            s.max_rate,
        );
    }
}

pub fn output_search(output_format: OutputFormat, outcome: &SearchOutcome, by_equipment: bool) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }

    for dropped in &outcome.dropped_queries {
        println!("Could not locate \"{}\"; searched without it.", dropped);
    }

    if outcome.is_empty() {
        println!("\nNo matching lanes.");
        return Ok(());
    }

    println!("\nMatching Rates ({})", outcome.rows.len());
    println!("==============");
    print_rows(&outcome.rows);

    println!("\nLane Summary");
    println!("============");
    if outcome.summaries.is_empty() {
        println!("No rated quotes among the matches.");
    } else if by_equipment {
        for (group, summaries) in partition_by_equipment(&outcome.summaries) {
            println!("\n[{}]", group);
            print_summaries(&summaries);
        }
    } else {
        print_summaries(&outcome.summaries);
    }

    Ok(())
}

pub fn output_carriers(output_format: OutputFormat, outcome: &CarrierOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }

    println!("\nBest Carriers: {}", outcome.pairing);
    println!("==============");
    if outcome.is_empty() {
        println!("No quotes for this pairing.");
        return Ok(());
    }

    println!(
        "{:>3} {:<16} {:<18} {:<18} {:<16} {:>10} {:<10}",
        "#", "Carrier", "Origin", "Destination", "Equipment", "Rate", "Ship date"
    );
    println!("{}", "-".repeat(96));
    for (idx, q) in outcome.quotes.iter().enumerate() {
        println!(
            "{:>3} {:<16} {:<18} {:<18} {:<16} {:>10} {:<10}",
            idx + 1,
            truncate(q.carrier_name.as_deref().unwrap_or("-"), 16),
            truncate(&q.origin.city, 18),
            truncate(&q.destination.city, 18),
            truncate(&q.equipment_type, 16),
            money(q.rate),
            q.ship_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string()),
        );
    }
    Ok(())
}

pub fn output_lane_options(output_format: OutputFormat, options: &LaneOptions) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(options);
    }

    let noun = match options.level {
        PairingLevel::City => "cities",
        PairingLevel::State => "states",
    };
    println!("Origin {}: {}", noun, options.origins.join(", "));
    if let (Some(origin), Some(destinations)) = (&options.origin, &options.destinations) {
        if destinations.is_empty() {
            println!("No destinations quoted from {}", origin);
        } else {
            println!("Destinations from {}: {}", origin, destinations.join(", "));
        }
    }
    println!("Mode types: {}", options.mode_types.join(", "));
    let groups: Vec<&str> = options.equipment_groups.iter().map(|g| g.as_str()).collect();
    println!("Equipment groups: {}", groups.join(", "));
    Ok(())
}

pub fn output_validation(output_format: OutputFormat, source: &str, table: &LoadedTable) -> Result<()> {
    if output_format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Report<'a> {
            source: &'a str,
            rows: usize,
            rated: usize,
            columns: &'a [(String, String)],
            unmapped_headers: &'a [String],
            unparsed_rates: usize,
            unparsed_dates: usize,
            invalid_coordinates: usize,
        }
        return print_json(&Report {
            source,
            rows: table.records.len(),
            rated: table.rated_count(),
            columns: &table.columns,
            unmapped_headers: &table.unmapped_headers,
            unparsed_rates: table.unparsed_rates,
            unparsed_dates: table.unparsed_dates,
            invalid_coordinates: table.invalid_coordinates,
        });
    }

    println!("\nTable: {}", source);
    println!("Rows:                {}", table.records.len());
    println!("Rows with a rate:    {}", table.rated_count());
    println!("Unparseable rates:   {}", table.unparsed_rates);
    println!("Unparseable dates:   {}", table.unparsed_dates);
    println!("Invalid coordinates: {}", table.invalid_coordinates);

    println!("\nColumn mapping");
    println!("--------------");
    for (field, header) in &table.columns {
        println!("{:<20} <- {}", field, header);
    }
    if !table.unmapped_headers.is_empty() {
        println!("\nIgnored columns: {}", table.unmapped_headers.join(", "));
    }
    Ok(())
}
