//! Trait seams to the outside world: where lanes come from and how places are geocoded

use ratefinder_types::Error;

use crate::model::{Coordinate, LaneRecord};

/// Source of lane records (embedded table, uploaded file, ...)
pub trait LaneRepository {
    /// Load every lane record
    fn find_all(&self) -> Result<Vec<LaneRecord>, Error>;

    /// Short description of where the records come from, for display
    fn describe(&self) -> String;
}

/// External geocoding service: free-text query to an optional coordinate.
///
/// `Ok(None)` means the service answered but found nothing; `Err` means the call
/// itself failed. Both are treated as "unresolved" by the resolver.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, Error>;
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, Error> {
        (**self).geocode(query)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, Error> {
        (**self).geocode(query)
    }
}
