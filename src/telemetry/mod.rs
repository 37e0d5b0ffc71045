pub mod loader;
pub mod types;

pub use loader::load_export;
pub use types::{
    DriverClassification, FinalClassification, LapData, OvertakeRecord, Overtakes,
    ParticipantData, RaceTelemetryExport, SessionInfo,
};
