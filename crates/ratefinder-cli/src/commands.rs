//! Command handlers

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use ratefinder_app::app::{lane_options, search_carriers, LaneSearchService, PairingLevel, SearchRequest};
use ratefinder_app::config::Config;
use ratefinder_app::export::{export_to_csv, export_to_excel};
use ratefinder_app::repository::{column_aliases, open_geocoder, open_lane_file, open_lane_repo};
use ratefinder_domain::model::{Coordinate, EquipmentGroup, LocationDescriptor, Selection};
use ratefinder_domain::service::{CarrierQuery, Pairing};
use ratefinder_types::{Error, GeocoderKind, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{output_carriers, output_lane_options, output_search, output_validation};

/// Show a progress bar only above this many records to resolve
const PROGRESS_THRESHOLD: usize = 5;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.aliases.is_some() {
        config.aliases_file = cli.aliases.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    let geocoder = cli.geocoder.unwrap_or(config.geocoder);

    match &cli.command {
        Commands::Search {
            origin,
            origin_postal,
            origin_country,
            origin_coords,
            destination,
            destination_postal,
            destination_country,
            destination_coords,
            radius,
            services,
            equipment,
            mode,
            by_equipment,
            csv,
            excel,
            map,
        } => {
            let request = SearchRequest::new(radius.unwrap_or(config.default_radius_miles))
                .with_services(Selection::from_values(services.clone()))
                .with_equipment(Selection::from_values(equipment.clone()))
                .with_mode(mode.clone());
            let request = match location_descriptor(
                origin.as_deref(),
                origin_postal.as_deref(),
                origin_country.as_deref(),
                origin_coords.as_deref(),
            )? {
                Some(d) => request.with_origin(d),
                None => request,
            };
            let request = match location_descriptor(
                destination.as_deref(),
                destination_postal.as_deref(),
                destination_country.as_deref(),
                destination_coords.as_deref(),
            )? {
                Some(d) => request.with_destination(d),
                None => request,
            };

            let exports = SearchExports {
                csv: csv.as_deref(),
                excel: excel.as_deref(),
                map: map.as_deref(),
            };
            cmd_search(
                &config,
                cli.data.as_deref(),
                geocoder,
                &request,
                *by_equipment,
                exports,
                output_format,
            )
        }

        Commands::Carriers {
            origin,
            destination,
            by_state,
            equipment,
            mode,
            sort_by_date,
            limit,
        } => {
            let pairing = if *by_state {
                Pairing::state(origin, destination)
            } else {
                Pairing::city(origin, destination)
            };
            let mut query = CarrierQuery::new(pairing);
            query.equipment = equipment_selection(equipment.clone());
            query.mode = mode.clone();
            query.options.sort_by_ship_date = *sort_by_date;
            query.options.max_results = limit.unwrap_or(config.max_results);
            cmd_carriers(&config, cli.data.as_deref(), &query, output_format)
        }

        Commands::Lanes { by_state, origin } => {
            let level = if *by_state { PairingLevel::State } else { PairingLevel::City };
            cmd_lanes(&config, cli.data.as_deref(), level, origin.as_deref(), output_format)
        }

        Commands::Validate { file } => cmd_validate(&config, file.clone(), output_format),

        Commands::Config {
            show,
            set_radius,
            set_max_results,
            set_geocoder,
            set_nominatim_url,
            set_timeout,
            set_output,
            set_data_file,
            set_aliases_file,
            reset,
        } => cmd_config(ConfigUpdate {
            show: *show,
            radius: *set_radius,
            max_results: *set_max_results,
            geocoder: *set_geocoder,
            nominatim_url: set_nominatim_url.clone(),
            timeout: *set_timeout,
            output: *set_output,
            data_file: set_data_file.clone(),
            aliases_file: set_aliases_file.clone(),
            reset: *reset,
        }),
    }
}

/// Build one end of a search from its flags. `None` when no flag was given.
fn location_descriptor(
    place: Option<&str>,
    postal: Option<&str>,
    country: Option<&str>,
    coords: Option<&str>,
) -> Result<Option<LocationDescriptor>> {
    if place.is_none() && postal.is_none() && coords.is_none() {
        return Ok(None);
    }

    let mut descriptor = LocationDescriptor::from_address(place.unwrap_or(""))
        .with_postal_code(postal.unwrap_or(""))
        .with_country(country.unwrap_or(""));
    if let Some(raw) = coords {
        let coordinate = Coordinate::parse(raw)
            .ok_or_else(|| Error::InvalidInput(format!("'{}' is not a valid \"lat,lon\" pair", raw)))?;
        descriptor = descriptor.with_coordinate(Some(coordinate));
    }
    Ok(Some(descriptor))
}

fn equipment_selection(equipment: Option<EquipmentGroup>) -> Selection<EquipmentGroup> {
    Selection::from_values(equipment.into_iter().collect())
}

struct SearchExports<'a> {
    csv: Option<&'a Path>,
    excel: Option<&'a Path>,
    map: Option<&'a Path>,
}

fn cmd_search(
    config: &Config,
    data: Option<&Path>,
    geocoder: GeocoderKind,
    request: &SearchRequest,
    by_equipment: bool,
    exports: SearchExports<'_>,
    output_format: OutputFormat,
) -> Result<()> {
    let repo = open_lane_repo(config, data)?;
    let mut records = repo.find_all()?;
    log::info!("{} record(s) from {}", records.len(), repo.describe());

    let mut service = LaneSearchService::new(open_geocoder(config, geocoder)?);

    let unresolved = records
        .iter()
        .filter(|r| r.origin.coordinate.is_none() || r.destination.coordinate.is_none())
        .count();
    if unresolved > PROGRESS_THRESHOLD {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} locating lanes")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        service.resolve_records(&mut records, &mut |done, _| pb.set_position(done as u64));
        pb.finish_and_clear();
    } else if unresolved > 0 {
        service.resolve_records(&mut records, &mut |_, _| {});
    }

    let outcome = service.search(&records, request)?;

    if let Some(path) = exports.csv {
        export_to_csv(&outcome.rows, path)?;
        eprintln!("Rows written to: {}", path.display());
    }
    if let Some(path) = exports.excel {
        export_to_excel(&outcome.rows, &outcome.summaries, path)?;
        eprintln!("Exported to: {}", path.display());
    }
    if let Some(path) = exports.map {
        outcome.route_map.write_json(path)?;
        eprintln!("Route map written to: {}", path.display());
    }

    output_search(output_format, &outcome, by_equipment)
}

fn cmd_carriers(config: &Config, data: Option<&Path>, query: &CarrierQuery, output_format: OutputFormat) -> Result<()> {
    let records = open_lane_repo(config, data)?.find_all()?;
    let outcome = search_carriers(&records, query);
    output_carriers(output_format, &outcome)
}

fn cmd_lanes(
    config: &Config,
    data: Option<&Path>,
    level: PairingLevel,
    origin: Option<&str>,
    output_format: OutputFormat,
) -> Result<()> {
    let records = open_lane_repo(config, data)?.find_all()?;
    output_lane_options(output_format, &lane_options(&records, level, origin))
}

fn cmd_validate(config: &Config, file: PathBuf, output_format: OutputFormat) -> Result<()> {
    let aliases = column_aliases(config.aliases_file.as_deref())?;
    let repo = open_lane_file(file, aliases)?;
    let table = repo.load_table()?;
    output_validation(output_format, &repo.csv_path().display().to_string(), &table)
}

struct ConfigUpdate {
    show: bool,
    radius: Option<f64>,
    max_results: Option<usize>,
    geocoder: Option<GeocoderKind>,
    nominatim_url: Option<String>,
    timeout: Option<u64>,
    output: Option<OutputFormat>,
    data_file: Option<PathBuf>,
    aliases_file: Option<PathBuf>,
    reset: bool,
}

fn cmd_config(update: ConfigUpdate) -> Result<()> {
    if update.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(radius) = update.radius {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidInput(format!("radius must be a non-negative number, got {}", radius)));
        }
        config.default_radius_miles = radius;
        modified = true;
    }

    if let Some(max_results) = update.max_results {
        config.max_results = max_results;
        modified = true;
    }

    if let Some(geocoder) = update.geocoder {
        config.geocoder = geocoder;
        modified = true;
    }

    if let Some(url) = update.nominatim_url {
        config.nominatim_url = url;
        modified = true;
    }

    if let Some(timeout) = update.timeout {
        config.geocode_timeout_secs = timeout;
        modified = true;
    }

    if let Some(output_format) = update.output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(path) = update.data_file {
        config.data_file = Some(path);
        modified = true;
    }

    if let Some(path) = update.aliases_file {
        config.aliases_file = Some(path);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if update.show || !modified {
        println!("{}", config);
    }

    Ok(())
}
