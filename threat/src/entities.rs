pub mod hated_by;
pub mod object_guid;
pub mod spell_mods;
pub mod threat_modifiers;
