use utility::id::{HasId, Id};

/// A tracker reporting fixes. Devices are identified by their publish topic
/// (e.g. `owntracks/user/phone`), or by their short tracker id.
#[derive(Debug, Clone)]
pub struct Device;

impl HasId for Device {
    type IdType = String;
}

impl Device {
    /// The stream used for fixes that carry neither a topic nor a tracker id.
    pub const DEFAULT: &'static str = "default";

    pub fn default_id() -> Id<Device> {
        Id::new(Self::DEFAULT.to_owned())
    }
}
