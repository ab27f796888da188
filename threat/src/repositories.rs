pub mod error;
pub mod spell_threat;
