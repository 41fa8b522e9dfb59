use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, macros::format_description};

/// Argo files flag absent times with large fill values in the JULD axis.
const JULD_FILL_THRESHOLD: f64 = 100_000.0;

/// An absolute timestamp for one profile. `estimated` marks values fabricated
/// from the run's wall clock because the file carried no usable time metadata;
/// the flag is persisted so fabricated times stay distinguishable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileTime {
	pub at: OffsetDateTime,
	pub estimated: bool,
}

/// Parses a CF-style epoch declaration such as
/// `days since 1950-01-01 00:00:00 UTC`.
pub fn parse_units_epoch(units: &str) -> Option<OffsetDateTime> {
	let trimmed = units.trim();
	let rest = trimmed
		.get(..10)
		.filter(|prefix| prefix.eq_ignore_ascii_case("days since"))
		.map(|_| trimmed[10..].trim())?;
	let datetime_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
	let date_format = format_description!("[year]-[month]-[day]");

	// get() rather than indexing: a cut point inside a multibyte character
	// must read as malformed metadata, not panic.
	if let Some(prefix) = rest.get(..19)
		&& let Ok(parsed) = PrimitiveDateTime::parse(prefix, datetime_format)
	{
		return Some(parsed.assume_utc());
	}
	if let Some(prefix) = rest.get(..10)
		&& let Ok(parsed) = Date::parse(prefix, date_format)
	{
		return Some(parsed.midnight().assume_utc());
	}

	None
}

/// Parses an Argo `REFERENCE_DATE_TIME` string, `YYYYMMDDHHMMSS`.
pub fn parse_reference_date(raw: &str) -> Option<OffsetDateTime> {
	let trimmed = raw.trim().trim_end_matches('\0').trim();

	if trimmed.len() != 14 {
		return None;
	}

	let format = format_description!("[year][month][day][hour][minute][second]");

	PrimitiveDateTime::parse(trimmed, format).ok().map(PrimitiveDateTime::assume_utc)
}

/// Resolves one profile's numeric time offset against the file epoch. Missing
/// or malformed inputs fall back to the caller-supplied timestamp with
/// `estimated = true`.
pub fn resolve(offset_days: Option<f64>, epoch: Option<OffsetDateTime>, fallback: OffsetDateTime) -> ProfileTime {
	let Some(days) = offset_days else {
		return ProfileTime { at: fallback, estimated: true };
	};
	let Some(epoch) = epoch else {
		return ProfileTime { at: fallback, estimated: true };
	};

	if !days.is_finite() || days.abs() >= JULD_FILL_THRESHOLD {
		return ProfileTime { at: fallback, estimated: true };
	}

	ProfileTime { at: epoch + Duration::seconds_f64(days * 86_400.0), estimated: false }
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn parses_full_epoch_declarations() {
		let epoch = parse_units_epoch("days since 1950-01-01 00:00:00 UTC");

		assert_eq!(epoch, Some(datetime!(1950-01-01 0:00 UTC)));
	}

	#[test]
	fn parses_date_only_epoch_declarations() {
		let epoch = parse_units_epoch("days since 1950-01-01");

		assert_eq!(epoch, Some(datetime!(1950-01-01 0:00 UTC)));
	}

	#[test]
	fn rejects_foreign_unit_declarations() {
		assert_eq!(parse_units_epoch("seconds since 1970-01-01 00:00:00"), None);
		assert_eq!(parse_units_epoch("days since later"), None);
	}

	#[test]
	fn multibyte_epoch_declarations_do_not_split_characters() {
		// Both cut points (19 for date-time, 10 for date) land inside 'é'.
		assert_eq!(
			parse_units_epoch("days since 1950-01-01 00:00:0\u{e9}"),
			Some(datetime!(1950-01-01 0:00 UTC))
		);
		assert_eq!(parse_units_epoch("days since 1950-01-0\u{e9}"), None);
	}

	#[test]
	fn parses_argo_reference_dates() {
		let epoch = parse_reference_date("19500101000000");

		assert_eq!(epoch, Some(datetime!(1950-01-01 0:00 UTC)));
		assert_eq!(parse_reference_date("1950"), None);
	}

	#[test]
	fn resolves_offsets_against_the_epoch() {
		let epoch = Some(datetime!(1950-01-01 0:00 UTC));
		let fallback = datetime!(2024-06-01 0:00 UTC);
		let resolved = resolve(Some(1.5), epoch, fallback);

		assert!(!resolved.estimated);
		assert_eq!(resolved.at, datetime!(1950-01-02 12:00 UTC));
	}

	#[test]
	fn fill_values_and_missing_metadata_are_estimated() {
		let epoch = Some(datetime!(1950-01-01 0:00 UTC));
		let fallback = datetime!(2024-06-01 0:00 UTC);

		for resolved in [
			resolve(Some(999_999.0), epoch, fallback),
			resolve(Some(f64::NAN), epoch, fallback),
			resolve(None, epoch, fallback),
			resolve(Some(1.0), None, fallback),
		] {
			assert!(resolved.estimated);
			assert_eq!(resolved.at, fallback);
		}
	}
}
