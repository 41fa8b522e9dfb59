#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Channel {
	Time,
	Latitude,
	Longitude,
	Pressure,
	Temperature,
	Salinity,
}
impl Channel {
	pub fn label(&self) -> &'static str {
		match self {
			Self::Time => "time",
			Self::Latitude => "latitude",
			Self::Longitude => "longitude",
			Self::Pressure => "pressure",
			Self::Temperature => "temperature",
			Self::Salinity => "salinity",
		}
	}
}

/// Alias table keyed by canonical channel. The default entries mirror Argo
/// float conventions; adjusted variants rank behind the primary names so the
/// first match wins deterministically.
pub type AliasTable = &'static [(Channel, &'static [&'static str])];

pub const DEFAULT_ALIASES: AliasTable = &[
	(Channel::Time, &["juld", "time", "date_time"]),
	(Channel::Latitude, &["latitude", "lat"]),
	(Channel::Longitude, &["longitude", "lon"]),
	(Channel::Pressure, &["pres", "pressure", "depth", "pres_adjusted"]),
	(Channel::Temperature, &["temp", "temperature", "temp_adjusted"]),
	(Channel::Salinity, &["psal", "salinity", "sal", "psal_adjusted"]),
];

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
	#[error("Required variable for channel {channel} is missing from the file.")]
	MissingRequiredVariable { channel: &'static str },
}

/// Mapping from canonical channels to the variable names actually present in a
/// file. Position channels are mandatory; the rest degrade to `None`.
#[derive(Clone, Debug)]
pub struct ChannelMap {
	pub latitude: String,
	pub longitude: String,
	pub time: Option<String>,
	pub pressure: Option<String>,
	pub temperature: Option<String>,
	pub salinity: Option<String>,
}
impl ChannelMap {
	pub fn locate(variable_names: &[String]) -> Result<Self, LocateError> {
		Self::locate_with(variable_names, DEFAULT_ALIASES)
	}

	pub fn locate_with(variable_names: &[String], aliases: AliasTable) -> Result<Self, LocateError> {
		let find = |channel: Channel| -> Option<String> {
			let (_, names) = aliases.iter().find(|(c, _)| *c == channel)?;

			for alias in *names {
				if let Some(name) =
					variable_names.iter().find(|name| name.eq_ignore_ascii_case(alias))
				{
					return Some(name.clone());
				}
			}

			None
		};
		let latitude = find(Channel::Latitude).ok_or(LocateError::MissingRequiredVariable {
			channel: Channel::Latitude.label(),
		})?;
		let longitude = find(Channel::Longitude).ok_or(LocateError::MissingRequiredVariable {
			channel: Channel::Longitude.label(),
		})?;

		Ok(Self {
			latitude,
			longitude,
			time: find(Channel::Time),
			pressure: find(Channel::Pressure),
			temperature: find(Channel::Temperature),
			salinity: find(Channel::Salinity),
		})
	}

	/// Channels that yield measurement records, paired with their canonical
	/// labels, in a fixed traversal order.
	pub fn value_channels(&self) -> Vec<(&'static str, &str)> {
		let mut channels = Vec::new();

		if let Some(name) = self.temperature.as_deref() {
			channels.push((Channel::Temperature.label(), name));
		}
		if let Some(name) = self.salinity.as_deref() {
			channels.push((Channel::Salinity.label(), name));
		}
		if let Some(name) = self.pressure.as_deref() {
			channels.push((Channel::Pressure.label(), name));
		}

		channels
	}
}
