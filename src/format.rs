//! Display helpers: byte sizes and Steam asset URLs.

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const STEAM_CDN: &str = "https://steamcdn-a.akamaihd.net/steam/apps";

/// Format a byte count with binary (1024) units.
///
/// Trailing zeros are trimmed, so `1536` becomes `"1.5 KB"` and `2048`
/// becomes `"2 KB"`.
///
/// ```
/// use compactgui_catalog::format::format_bytes;
///
/// assert_eq!(format_bytes(0, 2), "0 Bytes");
/// assert_eq!(format_bytes(1536, 2), "1.5 KB");
/// assert_eq!(format_bytes(5 * 1024 * 1024 * 1024, 2), "5 GB");
/// ```
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    // halves round up, as in the web catalog
    let factor = 10f64.powi(decimals as i32);
    let value = (bytes as f64 / scale as f64 * factor).round() / factor;
    let mut text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    format!("{} {}", text, UNITS[unit])
}

/// Portrait library cover
pub fn cover_url(steam_id: &str) -> String {
    format!("{}/{}/library_600x900_2x.jpg", STEAM_CDN, steam_id)
}

/// Landscape capsule used when the portrait cover is missing
pub fn fallback_cover_url(steam_id: &str) -> String {
    format!("{}/{}/capsule_616x353.jpg", STEAM_CDN, steam_id)
}

/// Small capsule for the compact table
pub fn thumb_url(steam_id: &str) -> String {
    format!("{}/{}/capsule_231x87.jpg", STEAM_CDN, steam_id)
}

/// Steam store page
pub fn store_url(steam_id: &str) -> String {
    format!("https://store.steampowered.com/app/{}", steam_id)
}
