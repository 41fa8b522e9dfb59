mod error;
pub mod timeconv;

pub use error::{Error, Result};
pub use timeconv::ProfileTime;

use std::path::Path;

use serde_json::{Map, Value};
use time::OffsetDateTime;

use floatchat_domain::ChannelMap;

const PROFILE_DIM: &str = "N_PROF";
const REFERENCE_DATE_VARIABLE: &str = "REFERENCE_DATE_TIME";

/// A profile-structured NetCDF file. The handle closes when the value drops,
/// on every exit path.
pub struct ProfileFile {
	file: netcdf::File,
}

/// Per-file time metadata, resolved once before walking profiles.
#[derive(Clone, Debug)]
pub struct TimeAxis {
	variable: Option<String>,
	epoch: Option<OffsetDateTime>,
}
impl TimeAxis {
	pub fn epoch(&self) -> Option<OffsetDateTime> {
		self.epoch
	}
}

/// One value channel of a profile: per-level readings plus their QC flags.
#[derive(Clone, Debug)]
pub struct ChannelSeries {
	pub label: &'static str,
	pub values: Vec<f64>,
	pub qc: Vec<Option<u8>>,
}
impl ChannelSeries {
	pub fn qc_at(&self, level: usize) -> Option<u8> {
		self.qc.get(level).copied().flatten()
	}
}

/// One profile's position, timestamp, and located channel series.
#[derive(Clone, Debug)]
pub struct ProfileSlice {
	pub profile_index: usize,
	pub latitude: f64,
	pub longitude: f64,
	pub time: ProfileTime,
	pub channels: Vec<ChannelSeries>,
}
impl ProfileSlice {
	pub fn level_count(&self) -> usize {
		self.channels.iter().map(|series| series.values.len()).max().unwrap_or(0)
	}

	/// Depth pairing for a level, taken from the pressure channel when present.
	pub fn depth_at(&self, level: usize) -> Option<f64> {
		self.channels
			.iter()
			.find(|series| series.label == "pressure")
			.and_then(|series| series.values.get(level))
			.copied()
			.filter(|depth| depth.is_finite())
	}

	pub fn candidate_count(&self) -> usize {
		self.channels.iter().map(|series| series.values.len()).sum()
	}

	pub fn has_position(&self) -> bool {
		self.latitude.is_finite() && self.longitude.is_finite()
	}
}

impl ProfileFile {
	pub fn open(path: &Path) -> Result<Self> {
		let file = netcdf::open(path)
			.map_err(|err| Error::UnsupportedFileFormat { path: path.to_path_buf(), source: err })?;

		Ok(Self { file })
	}

	pub fn variable_names(&self) -> Vec<String> {
		self.file.variables().map(|variable| variable.name().to_string()).collect()
	}

	/// Dimension catalog as stored on the dataset row.
	pub fn dimension_summary(&self) -> Value {
		let mut dimensions = Map::new();

		for dimension in self.file.dimensions() {
			dimensions.insert(dimension.name().to_string(), Value::from(dimension.len() as u64));
		}

		Value::Object(dimensions)
	}

	/// Size of the profile dimension; flat files count as a single profile.
	pub fn profile_count(&self) -> usize {
		self.file.dimension(PROFILE_DIM).map(|dimension| dimension.len()).unwrap_or(1)
	}

	/// Resolves the file's time metadata: the located time variable plus the
	/// declared epoch (`units` attribute first, then `REFERENCE_DATE_TIME`).
	pub fn time_axis(&self, channels: &ChannelMap) -> TimeAxis {
		let variable = channels.time.clone();
		let mut epoch = None;

		if let Some(name) = variable.as_deref()
			&& let Some(time_variable) = self.file.variable(name)
			&& let Some(Ok(netcdf::AttributeValue::Str(units))) =
				time_variable.attribute_value("units")
		{
			epoch = timeconv::parse_units_epoch(&units);
		}
		if epoch.is_none()
			&& let Some(reference) = self.read_text(REFERENCE_DATE_VARIABLE)
		{
			epoch = timeconv::parse_reference_date(&reference);
		}

		TimeAxis { variable, epoch }
	}

	/// Reads one profile: scalar position and timestamp plus one series per
	/// located value channel. `fallback_now` stamps profiles whose time cannot
	/// be decoded, with `estimated = true`.
	pub fn read_profile(
		&self,
		channels: &ChannelMap,
		axis: &TimeAxis,
		profile_index: usize,
		fallback_now: OffsetDateTime,
	) -> Result<ProfileSlice> {
		let latitude = self.scalar(&channels.latitude, profile_index)?;
		let longitude = self.scalar(&channels.longitude, profile_index)?;
		let offset_days = match axis.variable.as_deref() {
			Some(name) => self.scalar(name, profile_index).ok(),
			None => None,
		};
		let time = timeconv::resolve(offset_days, axis.epoch, fallback_now);
		let mut series = Vec::new();

		for (label, name) in channels.value_channels() {
			let values = self.series(name, profile_index)?;
			let qc = self.qc_series(name, profile_index, values.len());

			series.push(ChannelSeries { label, values, qc });
		}

		Ok(ProfileSlice { profile_index, latitude, longitude, time, channels: series })
	}

	/// Per-profile scalar: handles `[N_PROF]`, shared 1-D, and 0-D layouts.
	fn scalar(&self, name: &str, profile_index: usize) -> Result<f64> {
		let values = self.series(name, profile_index)?;

		values.first().copied().ok_or_else(|| Error::UnsupportedShape { name: name.to_string(), rank: 0 })
	}

	/// Per-profile value series for the three supported array shapes:
	/// `[profile, level]`, `[level]` shared across profiles, and scalar.
	fn series(&self, name: &str, profile_index: usize) -> Result<Vec<f64>> {
		let Some(variable) = self.file.variable(name) else {
			return Ok(Vec::new());
		};
		let rank = variable.dimensions().len();

		match rank {
			0 => Ok(variable.get_values::<f64, _>(netcdf::Extents::All)?),
			1 =>
				if self.is_profile_dimension(&variable, 0) {
					Ok(vec![variable.get_value::<f64, _>([profile_index])?])
				} else {
					Ok(variable.get_values::<f64, _>(netcdf::Extents::All)?)
				},
			2 => {
				let levels = variable.dimensions()[1].len();

				Ok(variable
					.get_values::<f64, _>([profile_index..(profile_index + 1), 0..levels])?)
			},
			_ => Err(Error::UnsupportedShape { name: name.to_string(), rank }),
		}
	}

	/// QC flags for a channel's companion `<VAR>_QC` variable, when present.
	/// Decodes both ASCII digit characters and small integer codes.
	fn qc_series(&self, name: &str, profile_index: usize, levels: usize) -> Vec<Option<u8>> {
		let qc_name = format!("{name}_QC");
		let Some(variable) = self.file.variable(&qc_name) else {
			return vec![None; levels];
		};
		let raw = match variable.dimensions().len() {
			1 => self.raw_bytes(&variable, netcdf::Extents::All, variable.len()),
			2 => {
				let span = variable.dimensions()[1].len();

				self.raw_bytes(&variable, [profile_index..(profile_index + 1), 0..span], span)
			},
			_ => None,
		};
		let Some(raw) = raw else {
			return vec![None; levels];
		};
		let mut flags: Vec<Option<u8>> = raw.iter().map(|byte| decode_qc_byte(*byte)).collect();

		flags.resize(levels, None);

		flags
	}

	fn raw_bytes<E>(
		&self,
		variable: &netcdf::Variable<'_>,
		extents: E,
		count: usize,
	) -> Option<Vec<u8>>
	where
		E: TryInto<netcdf::Extents>,
		E::Error: Into<netcdf::Error>,
	{
		use netcdf::types::{BasicType, VariableType};

		match variable.vartype() {
			VariableType::Basic(BasicType::Char | BasicType::Byte | BasicType::Ubyte) => {
				let mut buffer = vec![0_u8; count];

				variable.get_raw_values(&mut buffer, extents).ok()?;

				Some(buffer)
			},
			VariableType::Basic(_) => {
				let values = variable.get_values::<f64, _>(extents).ok()?;

				Some(
					values
						.into_iter()
						.map(|value| if (0.0..=9.0).contains(&value) { value as u8 } else { u8::MAX })
						.collect(),
				)
			},
			_ => None,
		}
	}

	/// Trimmed text content of a character variable, e.g. the reference date.
	fn read_text(&self, name: &str) -> Option<String> {
		let variable = self.file.variable(name)?;
		let mut buffer = vec![0_u8; variable.len()];

		variable.get_raw_values(&mut buffer, netcdf::Extents::All).ok()?;

		let text = String::from_utf8_lossy(&buffer).into_owned();
		let trimmed = text.trim().trim_end_matches('\0').trim().to_string();

		(!trimmed.is_empty()).then_some(trimmed)
	}

	fn is_profile_dimension(&self, variable: &netcdf::Variable<'_>, index: usize) -> bool {
		variable
			.dimensions()
			.get(index)
			.map(|dimension| dimension.name() == PROFILE_DIM)
			.unwrap_or(false)
	}
}

fn decode_qc_byte(byte: u8) -> Option<u8> {
	match byte {
		flag @ 0..=9 => Some(flag),
		digit @ b'0'..=b'9' => Some(digit - b'0'),
		_ => None,
	}
}
