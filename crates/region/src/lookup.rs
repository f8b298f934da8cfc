use foundation::GeoPoint;

/// Fire-and-forget request for the time range with data inside a region.
///
/// The controller never waits on or reads the result. Requests are not
/// cancelled when a newer one is issued; consumers order by recency.
pub trait DateRangeLookup {
    fn lookup_date_range(&mut self, north_east: GeoPoint, south_west: GeoPoint);
}

impl<F> DateRangeLookup for F
where
    F: FnMut(GeoPoint, GeoPoint),
{
    fn lookup_date_range(&mut self, north_east: GeoPoint, south_west: GeoPoint) {
        self(north_east, south_west)
    }
}

/// Records requests instead of issuing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingLookup {
    pub requests: Vec<(GeoPoint, GeoPoint)>,
}

impl DateRangeLookup for RecordingLookup {
    fn lookup_date_range(&mut self, north_east: GeoPoint, south_west: GeoPoint) {
        self.requests.push((north_east, south_west));
    }
}
