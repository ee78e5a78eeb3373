#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use millroll::libs::formatter::{format_amount, format_days, format_hours, format_time};
    use millroll::libs::glyph::{glyph, legend, GlyphMode, Mark};

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(NaiveTime::from_hms_opt(6, 0, 0)), "06:00");
        assert_eq!(format_time(NaiveTime::from_hms_opt(17, 30, 45)), "17:30");
        assert_eq!(format_time(None), "-");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8.0), "8.00");
        assert_eq!(format_hours(9.5), "9.50");
        assert_eq!(format_hours(-1.0), "0.00");
    }

    #[test]
    fn test_format_days() {
        assert_eq!(format_days(5.0), "5");
        assert_eq!(format_days(4.5), "4.5");
        assert_eq!(format_days(0.0), "0");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(4000.0), "4000.00");
        assert_eq!(format_amount(890.63), "890.63");
    }

    #[test]
    fn test_glyph_modes_agree() {
        let short: Vec<&str> = Mark::ALL.iter().map(|&m| glyph(m, GlyphMode::Short)).collect();
        let full: Vec<&str> = Mark::ALL.iter().map(|&m| glyph(m, GlyphMode::Full)).collect();

        assert_eq!(short, vec!["P", "H", "L", "A"]);
        assert_eq!(full, vec!["Present", "Half Day", "Leave", "Absent"]);
        assert!(short.iter().zip(&full).all(|(s, f)| f.starts_with(*s)));
    }

    #[test]
    fn test_legend() {
        assert_eq!(legend(), "P = Present, H = Half Day, L = Leave, A = Absent");
    }
}
