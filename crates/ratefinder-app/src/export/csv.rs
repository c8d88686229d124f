//! CSV export of filtered rows

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ratefinder_domain::model::LaneRecord;
use ratefinder_infra::write_lanes;
use ratefinder_types::Result;

/// Write rows with the loader's canonical columns, so the file can be searched again
pub fn export_to_csv(rows: &[LaneRecord], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    write_lanes(rows, BufWriter::new(file))
}
