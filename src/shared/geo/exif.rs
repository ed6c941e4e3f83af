//! Photo metadata extraction.
//!
//! Converts an opaque image byte buffer into a [`PhotoMetadata`] record,
//! tolerating any combination of missing EXIF tags. Extraction is
//! fail-soft: it never errors for a well-formed image without metadata,
//! and a buffer that cannot be decoded at all still yields a minimal
//! record carrying the file size. Callers of the upload flow must never
//! be blocked by a metadata problem.
//!
//! Tag parsing is delegated to kamadak-exif; pixel dimensions come from
//! decoding the buffer itself with the `image` crate because the tag
//! parser's dimension fields are not trusted.

use std::collections::BTreeMap;
use std::io::Cursor;

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PhotoLocation;

/// Decoded EXIF tag values, keyed by tag name.
pub type TagMap = BTreeMap<String, TagValue>;

/// A raw EXIF tag value.
///
/// The tag map is heterogeneous; modeling it as a closed variant set
/// lets the normalization pass match exhaustively instead of probing
/// runtime types.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Number(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    Bytes(Vec<u8>),
    /// Multi-valued tag (e.g. a DMS coordinate triplet)
    Nested(Vec<TagValue>),
}

/// Normalized metadata for one uploaded photo.
///
/// Constructed fresh per upload attempt and embedded into the check-in
/// record by the upload flow; every field except `file_size` is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PhotoMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<PhotoLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Always known: the length of the uploaded buffer in bytes
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,
    /// Simplified scalar view of all decoded tags
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    #[schema(value_type = Object)]
    pub exif: BTreeMap<String, serde_json::Value>,
}

/// Extract metadata from an image buffer. Never fails.
///
/// A buffer that cannot be decoded as an image at all produces a record
/// containing only `file_size`; the decode error is logged, not
/// propagated.
pub fn extract_photo_metadata(buffer: &[u8]) -> PhotoMetadata {
    let mut metadata = PhotoMetadata {
        file_size: buffer.len() as u64,
        ..PhotoMetadata::default()
    };

    // Dimensions are read from the pixel data, independently of the tag
    // parse. A decode failure only omits them.
    match image::load_from_memory(buffer) {
        Ok(img) => {
            metadata.width = Some(img.width());
            metadata.height = Some(img.height());
        }
        Err(e) => {
            tracing::debug!("image decode failed, omitting dimensions: {}", e);
        }
    }

    match parse_tag_map(buffer) {
        Ok(tags) => normalize_into(&mut metadata, tags),
        Err(e) => {
            tracing::warn!("EXIF parse failed, returning minimal metadata: {}", e);
        }
    }

    metadata
}

/// Fill the normalized fields of `metadata` from a decoded tag map.
fn normalize_into(metadata: &mut PhotoMetadata, tags: TagMap) {
    metadata.gps = resolve_gps(&tags);
    metadata.taken_at = capture_time(&tags);
    metadata.camera_make = text_tag(&tags, "Make");
    metadata.camera_model = text_tag(&tags, "Model");
    metadata.exif = simplify(tags);
}

/// A single way of finding a coordinate pair in the tag map.
type GpsLookup = fn(&TagMap) -> Option<(f64, f64)>;

/// Coordinate lookups tried in order: the pre-resolved decimal pair
/// first, then the raw GPS tags.
const GPS_LOOKUPS: &[GpsLookup] = &[resolved_coordinate, raw_gps_coordinate];

fn resolve_gps(tags: &TagMap) -> Option<PhotoLocation> {
    let (latitude, longitude) = GPS_LOOKUPS.iter().find_map(|lookup| lookup(tags))?;
    Some(PhotoLocation {
        latitude,
        longitude,
        timestamp: timestamp_tag(tags, "DateTimeOriginal"),
        altitude: tags.get("GPSAltitude").and_then(coerce_number),
    })
}

fn resolved_coordinate(tags: &TagMap) -> Option<(f64, f64)> {
    let latitude = coerce_number(tags.get("latitude")?)?;
    let longitude = coerce_number(tags.get("longitude")?)?;
    Some((latitude, longitude))
}

fn raw_gps_coordinate(tags: &TagMap) -> Option<(f64, f64)> {
    let latitude = coerce_number(tags.get("GPSLatitude")?)?;
    let longitude = coerce_number(tags.get("GPSLongitude")?)?;
    Some((
        latitude * hemisphere_sign(tags, "GPSLatitudeRef", 'S'),
        longitude * hemisphere_sign(tags, "GPSLongitudeRef", 'W'),
    ))
}

fn hemisphere_sign(tags: &TagMap, ref_tag: &str, negative: char) -> f64 {
    match tags.get(ref_tag) {
        Some(TagValue::Text(s)) if s.contains(negative) => -1.0,
        _ => 1.0,
    }
}

/// Coerce a scalar tag to a float; string values are parsed.
fn coerce_number(value: &TagValue) -> Option<f64> {
    match value {
        TagValue::Number(n) => Some(*n),
        TagValue::Text(s) => s.trim().parse().ok(),
        TagValue::Timestamp(_) | TagValue::Bytes(_) | TagValue::Nested(_) => None,
    }
}

/// Capture time: `DateTimeOriginal`, falling back to `DateTime`.
fn capture_time(tags: &TagMap) -> Option<NaiveDateTime> {
    ["DateTimeOriginal", "DateTime"]
        .iter()
        .find_map(|tag| timestamp_tag(tags, tag))
}

fn timestamp_tag(tags: &TagMap, name: &str) -> Option<NaiveDateTime> {
    match tags.get(name)? {
        TagValue::Timestamp(t) => Some(*t),
        TagValue::Text(s) => parse_exif_datetime(s),
        _ => None,
    }
}

fn text_tag(tags: &TagMap, name: &str) -> Option<String> {
    match tags.get(name)? {
        TagValue::Text(s) => Some(s.clone()),
        _ => None,
    }
}

/// Reduce the tag map to JSON scalars: binary and multi-valued tags are
/// dropped, timestamps become ISO-8601 strings, numbers and text pass
/// through unchanged.
fn simplify(tags: TagMap) -> BTreeMap<String, serde_json::Value> {
    tags.into_iter()
        .filter_map(|(name, value)| {
            let scalar = match value {
                TagValue::Number(n) => serde_json::Number::from_f64(n)?.into(),
                TagValue::Text(s) => serde_json::Value::String(s),
                TagValue::Timestamp(t) => {
                    serde_json::Value::String(t.format("%Y-%m-%dT%H:%M:%S").to_string())
                }
                TagValue::Bytes(_) | TagValue::Nested(_) => return None,
            };
            Some((name, scalar))
        })
        .collect()
}

/// Decode the EXIF container into a tag map, requesting the GPS, EXIF
/// and primary-IFD tag groups.
fn parse_tag_map(buffer: &[u8]) -> Result<TagMap, exif::Error> {
    let exif = Reader::new().read_from_container(&mut Cursor::new(buffer))?;

    let mut tags = TagMap::new();
    for field in exif.fields() {
        // Skip thumbnail IFD duplicates
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        tags.insert(field.tag.to_string(), field_value(field));
    }

    // Pre-resolve the DMS coordinate triplets into signed decimal
    // degrees under the keys the first lookup strategy expects.
    if let Some((latitude, longitude)) = decimal_coordinates(&exif) {
        tags.insert("latitude".to_string(), TagValue::Number(latitude));
        tags.insert("longitude".to_string(), TagValue::Number(longitude));
    }

    Ok(tags)
}

/// Signed decimal degrees from the GPS DMS triplets and hemisphere refs.
fn decimal_coordinates(exif: &exif::Exif) -> Option<(f64, f64)> {
    let latitude = dms_degrees(exif.get_field(Tag::GPSLatitude, In::PRIMARY)?)?
        * ref_sign(exif.get_field(Tag::GPSLatitudeRef, In::PRIMARY), 'S');
    let longitude = dms_degrees(exif.get_field(Tag::GPSLongitude, In::PRIMARY)?)?
        * ref_sign(exif.get_field(Tag::GPSLongitudeRef, In::PRIMARY), 'W');
    Some((latitude, longitude))
}

fn dms_degrees(field: &exif::Field) -> Option<f64> {
    match &field.value {
        Value::Rational(parts) => {
            let degrees = parts.first()?.to_f64();
            let minutes = parts.get(1).map(|r| r.to_f64()).unwrap_or(0.0);
            let seconds = parts.get(2).map(|r| r.to_f64()).unwrap_or(0.0);
            Some(degrees + minutes / 60.0 + seconds / 3600.0)
        }
        _ => None,
    }
}

fn ref_sign(field: Option<&exif::Field>, negative: char) -> f64 {
    match field {
        Some(f) if f.display_value().to_string().contains(negative) => -1.0,
        _ => 1.0,
    }
}

/// Convert one kamadak-exif field into a [`TagValue`].
fn field_value(field: &exif::Field) -> TagValue {
    match &field.value {
        Value::Ascii(lines) => {
            let text = lines
                .iter()
                .map(|line| String::from_utf8_lossy(line))
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();
            match parse_exif_datetime(&text) {
                Some(ts) => TagValue::Timestamp(ts),
                None => TagValue::Text(text),
            }
        }
        Value::Byte(v) => TagValue::Bytes(v.clone()),
        Value::SByte(v) => TagValue::Bytes(v.iter().map(|&b| b as u8).collect()),
        Value::Undefined(v, _) => TagValue::Bytes(v.clone()),
        Value::Short(v) => numbers(v.iter().map(|&n| f64::from(n))),
        Value::SShort(v) => numbers(v.iter().map(|&n| f64::from(n))),
        Value::Long(v) => numbers(v.iter().map(|&n| f64::from(n))),
        Value::SLong(v) => numbers(v.iter().map(|&n| f64::from(n))),
        Value::Float(v) => numbers(v.iter().map(|&n| f64::from(n))),
        Value::Double(v) => numbers(v.iter().copied()),
        Value::Rational(v) => numbers(v.iter().map(|r| r.to_f64())),
        Value::SRational(v) => numbers(v.iter().map(|r| r.to_f64())),
        _ => TagValue::Text(field.display_value().to_string()),
    }
}

fn numbers(values: impl Iterator<Item = f64>) -> TagValue {
    let values: Vec<f64> = values.collect();
    match values.as_slice() {
        [single] => TagValue::Number(*single),
        _ => TagValue::Nested(values.into_iter().map(TagValue::Number).collect()),
    }
}

/// EXIF datetimes are "YYYY:MM:DD HH:MM:SS" with no timezone, but
/// cameras disagree on separators.
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let cleaned = s.replace(['-', '/', '.'], ":");

    if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }

    // Date-only tags like GPSDateStamp
    if let Ok(d) = chrono::NaiveDate::parse_from_str(cleaned.split(' ').next()?, "%Y:%m:%d") {
        return d.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> TagValue {
        TagValue::Text(s.to_string())
    }

    fn in_memory_png() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(1, 1));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode test png");
        buf.into_inner()
    }

    #[test]
    fn undecodable_buffer_yields_minimal_record() {
        let buffer = b"definitely not an image";
        let meta = extract_photo_metadata(buffer);

        assert_eq!(meta.file_size, buffer.len() as u64);
        assert!(meta.gps.is_none());
        assert!(meta.taken_at.is_none());
        assert!(meta.width.is_none());
        assert!(meta.height.is_none());
        assert!(meta.exif.is_empty());
    }

    #[test]
    fn image_without_tags_keeps_file_size_and_dimensions() {
        let png = in_memory_png();
        let meta = extract_photo_metadata(&png);

        assert_eq!(meta.file_size, png.len() as u64);
        assert!(meta.gps.is_none());
        assert_eq!(meta.width, Some(1));
        assert_eq!(meta.height, Some(1));
    }

    #[test]
    fn prefers_resolved_coordinate_over_raw_tags() {
        let mut tags = TagMap::new();
        tags.insert("latitude".to_string(), TagValue::Number(37.5665));
        tags.insert("longitude".to_string(), TagValue::Number(126.978));
        tags.insert("GPSLatitude".to_string(), TagValue::Number(1.0));
        tags.insert("GPSLongitude".to_string(), TagValue::Number(2.0));

        let gps = resolve_gps(&tags).expect("gps resolved");
        assert_eq!(gps.latitude, 37.5665);
        assert_eq!(gps.longitude, 126.978);
    }

    #[test]
    fn coerces_raw_string_tags_to_floats() {
        let mut tags = TagMap::new();
        tags.insert("GPSLatitude".to_string(), text("35.1796"));
        tags.insert("GPSLongitude".to_string(), text("129.0756"));

        let gps = resolve_gps(&tags).expect("gps resolved");
        assert!((gps.latitude - 35.1796).abs() < 1e-9);
        assert!((gps.longitude - 129.0756).abs() < 1e-9);
    }

    #[test]
    fn applies_hemisphere_refs_to_raw_tags() {
        let mut tags = TagMap::new();
        tags.insert("GPSLatitude".to_string(), TagValue::Number(33.8688));
        tags.insert("GPSLatitudeRef".to_string(), text("S"));
        tags.insert("GPSLongitude".to_string(), TagValue::Number(151.2093));
        tags.insert("GPSLongitudeRef".to_string(), text("E"));

        let gps = resolve_gps(&tags).expect("gps resolved");
        assert!(gps.latitude < 0.0);
        assert!(gps.longitude > 0.0);
    }

    #[test]
    fn missing_gps_tags_resolve_to_none() {
        let mut tags = TagMap::new();
        tags.insert("Make".to_string(), text("Canon"));
        assert!(resolve_gps(&tags).is_none());

        // An unparsable raw tag is treated the same as an absent one.
        tags.insert("GPSLatitude".to_string(), text("not a number"));
        tags.insert("GPSLongitude".to_string(), text("129.0"));
        assert!(resolve_gps(&tags).is_none());
    }

    #[test]
    fn capture_time_falls_back_to_datetime() {
        let taken = NaiveDate::from_ymd_opt(2024, 5, 12)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();

        let mut tags = TagMap::new();
        tags.insert("DateTime".to_string(), TagValue::Timestamp(taken));
        assert_eq!(capture_time(&tags), Some(taken));

        let original = taken - chrono::Duration::hours(1);
        tags.insert("DateTimeOriginal".to_string(), TagValue::Timestamp(original));
        assert_eq!(capture_time(&tags), Some(original));
    }

    #[test]
    fn simplify_keeps_scalars_and_drops_blobs() {
        let taken = NaiveDate::from_ymd_opt(2024, 5, 12)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();

        let mut tags = TagMap::new();
        tags.insert("Make".to_string(), text("Canon"));
        tags.insert("ISOSpeedRatings".to_string(), TagValue::Number(200.0));
        tags.insert("DateTimeOriginal".to_string(), TagValue::Timestamp(taken));
        tags.insert("MakerNote".to_string(), TagValue::Bytes(vec![0, 1, 2]));
        tags.insert(
            "GPSLatitude".to_string(),
            TagValue::Nested(vec![TagValue::Number(37.0), TagValue::Number(33.0)]),
        );

        let simple = simplify(tags);
        assert_eq!(simple.get("Make"), Some(&serde_json::json!("Canon")));
        assert_eq!(
            simple.get("ISOSpeedRatings"),
            Some(&serde_json::json!(200.0))
        );
        assert_eq!(
            simple.get("DateTimeOriginal"),
            Some(&serde_json::json!("2024-05-12T14:30:05"))
        );
        assert!(!simple.contains_key("MakerNote"));
        assert!(!simple.contains_key("GPSLatitude"));
    }

    #[test]
    fn parses_exif_datetime_separator_variants() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(8, 4, 59)
            .unwrap();

        assert_eq!(parse_exif_datetime("2023:01:15 08:04:59"), Some(expected));
        assert_eq!(parse_exif_datetime("2023-01-15 08:04:59"), Some(expected));
        assert_eq!(parse_exif_datetime("garbage"), None);
    }
}
