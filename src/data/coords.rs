// ---------------------------------------------------------------------------
// Country coordinate table
// ---------------------------------------------------------------------------

/// Map position used for every subscriber of a country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryCoordinate {
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const fn coord(country: &'static str, lat: f64, lon: f64) -> CountryCoordinate {
    CountryCoordinate { country, lat, lon }
}

/// The only countries that survive the load-time join.
pub const COUNTRY_COORDINATES: [CountryCoordinate; 10] = [
    coord("United States", 37.0902, -95.7129),
    coord("Canada", 56.1304, -106.3468),
    coord("United Kingdom", 55.3781, -3.4360),
    coord("Australia", -25.2744, 133.7751),
    coord("Germany", 51.1657, 10.4515),
    coord("France", 46.2276, 2.2137),
    coord("Brazil", -14.2350, -51.9253),
    coord("Mexico", 23.6345, -102.5528),
    coord("Spain", 40.4637, -3.7492),
    coord("Italy", 41.8719, 12.5674),
];

/// Exact, case-sensitive lookup by country name.
pub fn lookup(country: &str) -> Option<&'static CountryCoordinate> {
    COUNTRY_COORDINATES.iter().find(|c| c.country == country)
}

/// Closest table entry to `(lat, lon)` whose distance in degrees is at most
/// `tolerance`. Distance is planar on the lon/lat plane, which is what the
/// map draws.
pub fn nearest(lat: f64, lon: f64, tolerance: f64) -> Option<&'static CountryCoordinate> {
    COUNTRY_COORDINATES
        .iter()
        .map(|c| (c, (c.lat - lat).hypot(c.lon - lon)))
        .filter(|(_, dist)| *dist <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}
