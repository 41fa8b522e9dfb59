pub mod channel;
pub mod filter;
pub mod measurement;
pub mod region;
pub mod status;
pub mod summary;

pub use channel::{Channel, ChannelMap, LocateError};
pub use filter::{RawSample, SampleFilter};
pub use measurement::Measurement;
pub use region::{BoundingBox, NamedRegion, SUB_REGIONS};
pub use status::DatasetStatus;
