use chrono::{Datelike, NaiveDate};
use shared::month_name;

/// Today's date in the browser's local time zone
pub fn today() -> Option<NaiveDate> {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Format a date for display (e.g., "January 15, 2025")
pub fn format_date_for_display(date: NaiveDate) -> String {
    let month = month_name(date.month()).unwrap_or("January");
    format!("{} {}, {}", month, date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_today_matches_js_clock() {
        let today = today().expect("browser clock should give a real date");
        let now = js_sys::Date::new_0();

        assert_eq!(today.year(), now.get_full_year() as i32);
        assert_eq!(today.month0(), now.get_month());
    }

    #[wasm_bindgen_test]
    fn test_format_date_for_display() {
        let date = NaiveDate::from_ymd_opt(1990, 12, 10).unwrap();
        assert_eq!(format_date_for_display(date), "December 10, 1990");
    }
}
