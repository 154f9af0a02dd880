use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};

/// Parse the due-date shorthand accepted by the `add` command and the form:
/// `today`/`tod`, `tomorrow`/`tom`, relative `+Nd`/`+Nw`, or `YYYY-MM-DD`.
/// All of them resolve to end-of-day in the user's zone, converted to UTC.
pub fn parse_human_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let today = Local::now().date_naive();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return end_of_day(today),
        "tomorrow" | "tom" => return end_of_day(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('+') {
        if rest.len() >= 2 {
            let (num_str, unit) = rest.split_at(rest.len() - 1);
            let count: i64 = num_str
                .parse()
                .map_err(|_| anyhow!("Invalid relative date: {}", input))?;
            let target = match unit {
                "d" => today + Duration::days(count),
                "w" => today + Duration::weeks(count),
                _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
            };
            return end_of_day(target);
        }
        return Err(anyhow!("Invalid relative date: {}", input));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return end_of_day(date);
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn end_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    let local_dt = date
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| anyhow!("Invalid date: {}", date))?;
    let local = Local
        .from_local_datetime(&local_dt)
        .earliest()
        .ok_or_else(|| anyhow!("Date does not exist in local time: {}", date))?;
    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_iso_date() {
        let parsed = parse_human_date("2030-06-15").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2030, 6, 15).unwrap());
    }

    #[test]
    fn test_parse_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(
            parse_human_date("today").unwrap().with_timezone(&Local).date_naive(),
            today
        );
        assert_eq!(
            parse_human_date("Tomorrow").unwrap().with_timezone(&Local).date_naive(),
            today + Duration::days(1)
        );
    }

    #[test]
    fn test_parse_relative() {
        let today = Local::now().date_naive();
        assert_eq!(
            parse_human_date("+3d").unwrap().with_timezone(&Local).date_naive(),
            today + Duration::days(3)
        );
        assert_eq!(
            parse_human_date("+2w").unwrap().with_timezone(&Local).date_naive(),
            today + Duration::weeks(2)
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_human_date("next thursday-ish").is_err());
        assert!(parse_human_date("+d").is_err());
        assert!(parse_human_date("2030-13-40").is_err());
        assert!(parse_human_date("").is_err());
    }

    #[test]
    fn test_resolves_to_end_of_day() {
        let parsed = parse_human_date("2030-06-15").unwrap().with_timezone(&Local);
        assert_eq!(parsed.date_naive().day(), 15);
        assert_eq!((parsed.time().hour(), parsed.time().minute()), (23, 59));
    }
}
