//! Domain entities that cross the service boundary.

mod ballistics;
mod catalog;
mod legacy;
mod settings;
mod stretch;

pub use ballistics::{
    AdditionalBallistics, Impulse, KeplerianElements, StandardBallisticInformation, StatusVector,
    ADDITIONAL_BALLISTICS, IMPULSE, KEPLERIAN_ELEMENTS, STANDARD_BALLISTIC_INFORMATION,
    STATUS_VECTOR,
};
pub use catalog::{Frame, FrameCode, SpaceObject, User, FRAME, REDACTED_PASSWORD, SPACE_OBJECT, USER};
pub use legacy::{LegacyOrbitRecord, LEGACY_ORBIT_RECORD};
pub use settings::{Settings, Tristate, SETTINGS};
pub use stretch::{Stretch, STRETCH};
