//! Cities with a marker on the globe, in display order.

pub(crate) const BUILTIN_PLACES: &[(&str, f64, f64)] = &[
    // Europe
    ("Paris", 2.3522, 48.8566),
    ("London", -0.1276, 51.5074),
    ("Berlin", 13.4050, 52.5200),
    ("Rome", 12.4964, 41.9028),
    ("Bruges", 3.3792, 51.9225),
    ("Amsterdam", 4.9041, 52.3676),
    ("Barcelona", 2.1734, 41.3851),
    ("Copenhagen", 12.5683, 55.6761),
    ("Vienna", 16.3738, 48.2082),
    ("Budapest", 19.0402, 47.4979),
    ("Prague", 14.4378, 50.0755),
    ("Warsaw", 21.0122, 52.2297),
    ("Kyiv", 30.5234, 50.4501),
    ("Moscow", 37.6173, 55.7558),
    // Asia
    ("Tokyo", 139.6917, 35.6895),
    ("Seoul", 126.9780, 37.5665),
    ("Hong Kong", 114.0579, 22.5431),
    ("Shanghai", 121.4737, 31.2304),
    ("Beijing", 116.4074, 39.9042),
    ("Mumbai", 72.8777, 19.0760),
    ("New Delhi", 77.2090, 28.6139),
    ("Kolkata", 88.3639, 22.5726),
    ("Bangkok", 100.5018, 13.7563),
    ("Ho Chi Minh City", 106.6297, 10.8231),
    ("Singapore", 103.8198, 1.3521),
    ("Jakarta", 106.8456, -6.2088),
    ("Manila", 120.9842, 14.5995),
    // Americas
    ("New York", -74.006, 40.7128),
    ("Los Angeles", -118.2437, 34.0522),
    ("Chicago", -87.6298, 41.8781),
    ("Houston", -95.3698, 29.7604),
    ("Miami", -80.1918, 25.7617),
    ("Toronto", -79.3832, 43.6532),
    ("Vancouver", -123.1207, 49.2827),
    ("Mexico City", -99.1332, 19.4326),
    ("São Paulo", -46.6333, -23.5505),
    ("Buenos Aires", -58.3816, -34.6037),
    ("Santiago", -70.6483, -33.4489),
    ("Lima", -77.0428, -12.0464),
    // Africa
    ("Cairo", 31.2357, 30.0444),
    ("Lagos", 3.3792, 6.5244),
    ("Cape Town", 18.4241, -33.9249),
    ("Nairobi", 36.8172, -1.2921),
    ("Victoria", 55.2708, -4.4419),
    ("Tunis", 10.1815, 36.8065),
    ("Casablanca", -6.8498, 34.0209),
    // Oceania
    ("Sydney", 151.2093, -33.8688),
    ("Melbourne", 144.9631, -37.8136),
    ("Perth", 115.8605, -31.9505),
    ("Auckland", 174.7633, -36.8485),
    ("Noumea", 167.8449, -29.0556),
];
