//! Export of search results to CSV and Excel

mod csv;
mod excel;

pub use self::csv::export_to_csv;
pub use excel::export_to_excel;
