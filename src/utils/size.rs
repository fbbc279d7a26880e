/// Human-readable file size: KB below one megabyte, MB above.
///
/// At most two decimals, trailing zeros trimmed (`1.50 KB` → `1.5 KB`).
pub fn format_file_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    if kb >= 1024.0 {
        format!("{} MB", trim_decimals(kb / 1024.0))
    } else {
        format!("{} KB", trim_decimals(kb))
    }
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Preview label: `Size: 12.5 KB | Format: JPEG`
pub fn size_label(bytes: u64, mime_type: &str) -> String {
    let format = crate::utils::mime_subtype(mime_type).to_uppercase();
    format!("Size: {} | Format: {}", format_file_size(bytes), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilobytes_trim_trailing_zeros() {
        assert_eq!(format_file_size(0), "0 KB");
        assert_eq!(format_file_size(512), "0.5 KB");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1000), "0.98 KB");
    }

    #[test]
    fn switches_to_megabytes_at_1024_kb() {
        assert_eq!(format_file_size(1024 * 1023), "1023 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 + 300 * 1024), "3.29 MB");
    }

    #[test]
    fn label_shows_uppercase_subtype() {
        assert_eq!(size_label(2048, "image/png"), "Size: 2 KB | Format: PNG");
    }
}
