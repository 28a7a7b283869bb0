/// Human-readable byte count using decimal (SI) units, one decimal place.
///
/// `1` → `"1 Byte"`, `512` → `"512 Bytes"`, `12_345_678` → `"12.3 MB"`.
pub fn human_size(bytes: u64) -> String {
    const BASE: f64 = 1000.0;
    const SUFFIXES: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

    if bytes == 1 {
        return "1 Byte".to_string();
    }
    if bytes < 1000 {
        return format!("{bytes} Bytes");
    }

    let value = bytes as f64;
    let mut unit = BASE;
    for suffix in SUFFIXES {
        let next = unit * BASE;
        if value < next {
            return format!("{:.1} {suffix}", value / unit);
        }
        unit = next;
    }
    format!("{:.1} YB", value / (unit / BASE))
}
