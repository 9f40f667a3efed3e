//! Turning spreadsheet cells into strings, and strings into dates and amounts.
use calamine::Data;
use time::format_description::FormatItem;
use time::macros::format_description;

static DATE_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[year]/[month padding:none]/[day padding:none]"),
    format_description!("[year].[month padding:none].[day padding:none]"),
    format_description!("[month padding:none]/[day padding:none]/[year]"),
    format_description!("[month padding:none].[day padding:none].[year]"),
    format_description!("[month padding:none]-[day padding:none]-[year]"),
    format_description!("[day padding:none]/[month padding:none]/[year]"),
    format_description!("[day padding:none].[month padding:none].[year]"),
    format_description!("[day padding:none]-[month padding:none]-[year]"),
];

static TIME_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[hour padding:none]:[minute]:[second].[subsecond]"),
    format_description!("[hour padding:none]:[minute]:[second]"),
    format_description!("[hour padding:none]:[minute]"),
];

static OFFSET_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    format_description!("[offset_hour sign:mandatory][offset_minute]"),
    format_description!("[offset_hour sign:mandatory]"),
];

static NORMALIZED_DATE: &[FormatItem<'static>] = format_description!("[year]/[month]/[day]");

/// Parse `input` as a calendar date with an optional time of day and return it as `YYYY/MM/DD`.
///
/// Dates are year first, or year last with the month before the day unless that can't be.
/// `YYYYMMDD` is accepted as well. The time of day and its UTC offset, if present, must be valid
/// but are otherwise dropped.
pub fn normalize_date(input: &str) -> Option<String> {
    let input = input.trim();
    let (day, time_of_day) = match input.find(|c: char| c == ' ' || c == 'T') {
        Some(pos) => (&input[..pos], Some(input[pos + 1..].trim_start())),
        None => (input, None),
    };
    if let Some(time_of_day) = time_of_day {
        let time_of_day = strip_offset(time_of_day)?;
        TIME_FORMATS
            .iter()
            .find_map(|format| time::Time::parse(time_of_day, format).ok())?;
    }
    let compact;
    let day = if day.len() == 8 && day.bytes().all(|b| b.is_ascii_digit()) {
        compact = format!("{}-{}-{}", &day[..4], &day[4..6], &day[6..]);
        compact.as_str()
    } else {
        day
    };
    DATE_FORMATS
        .iter()
        .find_map(|format| time::Date::parse(day, format).ok())?
        .format(NORMALIZED_DATE)
        .ok()
}

/// Remove a trailing `Z` or UTC offset from `time_of_day`, or return `None` if the offset is invalid.
fn strip_offset(time_of_day: &str) -> Option<&str> {
    if let Some(time_of_day) = time_of_day.strip_suffix('Z') {
        return Some(time_of_day);
    }
    match time_of_day.rfind(|c: char| c == '+' || c == '-') {
        Some(pos) => {
            let offset = &time_of_day[pos..];
            OFFSET_FORMATS
                .iter()
                .find_map(|format| time::UtcOffset::parse(offset, format).ok())?;
            Some(time_of_day[..pos].trim_end())
        }
        None => Some(time_of_day),
    }
}

/// Parse an amount, returning `None` for anything that isn't a number.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| !number.is_nan())
}

/// Render a cell the way it reads in the spreadsheet, or `None` if it is empty.
pub fn cell_to_string(cell: &Data) -> Option<String> {
    Some(match cell {
        Data::Empty => return None,
        Data::String(text) if text.is_empty() => return None,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Int(number) => number.to_string(),
        Data::Float(number) => format_number(*number),
        Data::Bool(true) => "True".into(),
        Data::Bool(false) => "False".into(),
        Data::DateTime(serial) => match serial.as_datetime() {
            Some(date_time) if !serial.is_duration() => date_time.to_string(),
            _ => format_number(serial.as_f64()),
        },
        Data::Error(error) => error.to_string(),
    })
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        (number as i64).to_string()
    } else {
        number.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_in_various_layouts() {
        for (input, expected) in [
            ("2024-03-05", "2024/03/05"),
            ("2024/03/05", "2024/03/05"),
            ("2024.03.05", "2024/03/05"),
            ("  2024-03-05 ", "2024/03/05"),
            ("2024-03-05 00:00:00", "2024/03/05"),
            ("2024-03-05T13:45", "2024/03/05"),
            ("2024-12-31 23:59:59.250", "2024/12/31"),
            ("2024-3-5", "2024/03/05"),
            ("2024/3/5 9:30", "2024/03/05"),
            ("20240305", "2024/03/05"),
            ("2024-03-05T10:00:00Z", "2024/03/05"),
            ("2024-03-05 10:00:00+01:00", "2024/03/05"),
            ("2024-03-05T10:00:00-0500", "2024/03/05"),
            ("05/03/2024", "2024/05/03"),
            ("13/03/2024", "2024/03/13"),
            ("5.3.2024", "2024/05/03"),
            ("31.12.2024 08:15", "2024/12/31"),
        ] {
            assert_eq!(normalize_date(input).as_deref(), Some(expected), "{input}");
        }
    }

    #[test]
    fn invalid_dates() {
        for input in [
            "not-a-date",
            "",
            "2024-02-30",
            "2024-13-01",
            "2024-03-05 garbage",
            "05/03",
            "2024-03-05 10:00:00+99:00",
            "2024-03-05 25:00",
            "13/13/2024",
            "2024030",
        ] {
            assert_eq!(normalize_date(input), None, "{input:?}");
        }
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("12.5"), Some(12.5));
        assert_eq!(parse_amount(" -3 "), Some(-3.0));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("1 000,50"), None);
    }

    #[test]
    fn cells_render_like_they_read() {
        assert_eq!(cell_to_string(&Data::Empty), None);
        assert_eq!(cell_to_string(&Data::String(String::new())), None);
        assert_eq!(
            cell_to_string(&Data::String("Kaffe".into())).as_deref(),
            Some("Kaffe")
        );
        assert_eq!(cell_to_string(&Data::Int(42)).as_deref(), Some("42"));
        assert_eq!(cell_to_string(&Data::Float(100.0)).as_deref(), Some("100"));
        assert_eq!(cell_to_string(&Data::Float(-12.75)).as_deref(), Some("-12.75"));
        assert_eq!(cell_to_string(&Data::Bool(true)).as_deref(), Some("True"));
    }

    #[test]
    fn date_cells_follow_the_workbook_epoch() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        let render = |serial, is_1904| {
            cell_to_string(&Data::DateTime(ExcelDateTime::new(
                serial,
                ExcelDateTimeType::DateTime,
                is_1904,
            )))
        };
        assert_eq!(render(45356.0, false).as_deref(), Some("2024-03-05 00:00:00"));
        assert_eq!(render(45356.5, false).as_deref(), Some("2024-03-05 12:00:00"));
        assert_eq!(render(43894.0, true).as_deref(), Some("2024-03-05 00:00:00"));
        assert_eq!(render(61.0, false).as_deref(), Some("1900-03-01 00:00:00"));
        assert_eq!(
            normalize_date(&render(43894.0, true).unwrap()).as_deref(),
            Some("2024/03/05")
        );
    }

    #[test]
    fn durations_stay_numbers() {
        let cell = Data::DateTime(calamine::ExcelDateTime::new(
            1.5,
            calamine::ExcelDateTimeType::TimeDelta,
            false,
        ));
        assert_eq!(cell_to_string(&cell).as_deref(), Some("1.5"));
    }
}
