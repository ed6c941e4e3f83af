// =============================================================================
// CHECK-IN CATEGORIES
// =============================================================================

/// Categories a check-in can be filed under. Mirrors the category picker
/// in the client's check-in form.
pub const CHECKIN_CATEGORIES: &[&str] = &[
    "restaurant",
    "attraction",
    "accommodation",
    "cafe",
    "shopping",
    "nature",
    "activity",
    "transportation",
    "other",
];

/// Check if a category value is one of the known check-in categories
pub fn is_known_category(category: &str) -> bool {
    CHECKIN_CATEGORIES.contains(&category)
}

// =============================================================================
// PLACE SEARCH
// =============================================================================

/// Default place type filter for nearby search, pipe-separated as the
/// Places API expects
pub const DEFAULT_NEARBY_TYPES: &str = "restaurant|cafe|tourist_attraction|store";

/// Nearby search radius in meters
pub const NEARBY_RADIUS_METERS: u32 = 100;

/// Maximum number of nearby results returned to the client
pub const NEARBY_RESULT_LIMIT: usize = 5;
