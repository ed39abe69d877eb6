use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationKind
{
    Country,
    City,
}

#[derive(Debug, PartialEq)]
pub struct Location
{
    /// Accepted answers. The first one is what gets revealed.
    pub names: &'static [&'static str],
    pub lat: f64,
    pub lng: f64,
    pub zoom: f32,
    pub kind: LocationKind,
}

impl Location
{
    pub fn primary_name(&self) -> &'static str
    {
        self.names.first().copied().unwrap_or("?")
    }

    pub fn accepts(&self, answer: &str) -> bool
    {
        let answer = answer.trim().to_lowercase();
        !answer.is_empty() && self.names.iter().any(|name| name.to_lowercase() == answer)
    }

    pub fn hint(&self) -> Option<char>
    {
        self.primary_name().chars().next()
    }
}

const fn country(names: &'static [&'static str], lat: f64, lng: f64, zoom: f32) -> Location
{
    Location {
        names,
        lat,
        lng,
        zoom,
        kind: LocationKind::Country,
    }
}

const fn city(names: &'static [&'static str], lat: f64, lng: f64) -> Location
{
    Location {
        names,
        lat,
        lng,
        zoom: 10.0,
        kind: LocationKind::City,
    }
}

pub static LOCATIONS: &[Location] = &[
    country(&["South Korea", "Korea", "Republic of Korea"], 36.5, 127.9, 5.0),
    country(&["Japan"], 36.2, 138.3, 4.0),
    country(&["China", "PRC"], 35.9, 104.2, 3.0),
    country(&["United States", "USA", "US", "America"], 39.8, -98.6, 3.0),
    country(&["Canada"], 56.1, -106.3, 3.0),
    country(&["Mexico"], 23.6, -102.6, 4.0),
    country(&["Brazil"], -14.2, -51.9, 3.0),
    country(&["Argentina"], -38.4, -63.6, 3.0),
    country(&["Chile"], -35.7, -71.5, 3.0),
    country(&["United Kingdom", "UK", "Britain", "Great Britain"], 55.4, -3.4, 5.0),
    country(&["France"], 46.2, 2.2, 5.0),
    country(&["Germany"], 51.2, 10.5, 5.0),
    country(&["Italy"], 41.9, 12.6, 5.0),
    country(&["Spain"], 40.5, -3.7, 5.0),
    country(&["Portugal"], 39.4, -8.2, 5.0),
    country(&["Norway"], 60.5, 8.5, 4.0),
    country(&["Sweden"], 60.1, 18.6, 4.0),
    country(&["Finland"], 61.9, 25.7, 4.0),
    country(&["Poland"], 51.9, 19.1, 5.0),
    country(&["Greece"], 39.1, 21.8, 5.0),
    country(&["Turkey", "Turkiye"], 38.9, 35.2, 5.0),
    country(&["Russia", "Russian Federation"], 61.5, 105.3, 3.0),
    country(&["India"], 20.6, 79.0, 4.0),
    country(&["Australia"], -25.3, 133.8, 3.0),
    country(&["New Zealand"], -40.9, 174.9, 4.0),
    country(&["Egypt"], 26.8, 30.8, 5.0),
    country(&["South Africa"], -30.6, 22.9, 4.0),
    country(&["Nigeria"], 9.1, 8.7, 5.0),
    country(&["Kenya"], -0.02, 37.9, 5.0),
    country(&["Saudi Arabia"], 23.9, 45.1, 4.0),
    country(&["Iran"], 32.4, 53.7, 4.0),
    country(&["Thailand"], 15.9, 100.9, 5.0),
    country(&["Vietnam", "Viet Nam"], 14.1, 108.3, 5.0),
    country(&["Indonesia"], -0.8, 113.9, 4.0),
    country(&["Philippines"], 12.9, 121.8, 5.0),
    country(&["Mongolia"], 46.9, 103.8, 4.0),
    country(&["Iceland"], 64.96, -19.0, 5.0),
    country(&["Madagascar"], -18.8, 46.9, 5.0),
    city(&["Seoul"], 37.5665, 126.978),
    city(&["Busan", "Pusan"], 35.1796, 129.0756),
    city(&["Tokyo"], 35.6762, 139.6503),
    city(&["Osaka"], 34.6937, 135.5023),
    city(&["Beijing", "Peking"], 39.9042, 116.4074),
    city(&["Shanghai"], 31.2304, 121.4737),
    city(&["Hong Kong"], 22.3193, 114.1694),
    city(&["Singapore"], 1.3521, 103.8198),
    city(&["Bangkok"], 13.7563, 100.5018),
    city(&["New Delhi", "Delhi"], 28.6139, 77.209),
    city(&["Dubai"], 25.2048, 55.2708),
    city(&["Istanbul"], 41.0082, 28.9784),
    city(&["Moscow"], 55.7558, 37.6173),
    city(&["Paris"], 48.8566, 2.3522),
    city(&["London"], 51.5074, -0.1278),
    city(&["Berlin"], 52.52, 13.405),
    city(&["Rome", "Roma"], 41.9028, 12.4964),
    city(&["Madrid"], 40.4168, -3.7038),
    city(&["Barcelona"], 41.3874, 2.1686),
    city(&["Amsterdam"], 52.3676, 4.9041),
    city(&["Cairo"], 30.0444, 31.2357),
    city(&["Cape Town"], -33.9249, 18.4241),
    city(&["Nairobi"], -1.2921, 36.8219),
    city(&["New York", "New York City", "NYC"], 40.7128, -74.006),
    city(&["Los Angeles", "LA"], 34.0522, -118.2437),
    city(&["San Francisco"], 37.7749, -122.4194),
    city(&["Chicago"], 41.8781, -87.6298),
    city(&["Toronto"], 43.6532, -79.3832),
    city(&["Vancouver"], 49.2827, -123.1207),
    city(&["Mexico City"], 19.4326, -99.1332),
    city(&["Rio de Janeiro", "Rio"], -22.9068, -43.1729),
    city(&["Buenos Aires"], -34.6037, -58.3816),
    city(&["Sydney"], -33.8688, 151.2093),
    city(&["Melbourne"], -37.8136, 144.9631),
];

pub struct LocationPicker<'a>
{
    all: &'a [Location],
    countries: Vec<&'a Location>,
    cities: Vec<&'a Location>,
    city_threshold: u32,
}

impl<'a> LocationPicker<'a>
{
    pub fn new(all: &'a [Location], city_threshold: u32) -> Self
    {
        let (countries, cities): (Vec<&Location>, Vec<&Location>) = all
            .iter()
            .partition(|loc| loc.kind == LocationKind::Country);
        Self {
            all,
            countries,
            cities,
            city_threshold,
        }
    }

    pub fn pick(&self, stage: u32, rng: &mut impl Rng) -> Option<&'a Location>
    {
        let pool = if stage < self.city_threshold {
            &self.countries
        } else {
            &self.cities
        };
        if pool.is_empty() {
            return self.all.choose(rng);
        }
        pool.choose(rng).copied()
    }
}
