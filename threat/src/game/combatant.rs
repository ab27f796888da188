use enumflags2::BitFlags;

use crate::{
    datastore::DataStore,
    entities::object_guid::ObjectGuid,
    shared::constants::{AuraInterruptFlag, SpellModOp, SpellSchoolMask},
};

use super::hostile_reference::HostileReference;

pub trait SpellModOwner {
    fn apply_spell_mod(&self, spell_id: u32, op: SpellModOp, base_value: f32) -> f32;
}

// Everything the threat system needs to know about a unit, either as the owner of a threat list
// (always a creature) or as a target in it. Range queries are always asked to the owner.
pub trait Combatant {
    fn guid(&self) -> ObjectGuid;

    fn is_player(&self) -> bool {
        self.guid().is_player()
    }

    fn is_alive(&self) -> bool;
    fn is_game_master(&self) -> bool;
    fn is_in_flight(&self) -> bool;

    fn map_id(&self) -> u32;
    fn instance_id(&self) -> u32;
    fn phase_mask(&self) -> u32;

    fn is_in_map(&self, other: &dyn Combatant) -> bool {
        self.map_id() == other.map_id() && self.instance_id() == other.instance_id()
    }

    fn in_same_phase(&self, other: &dyn Combatant) -> bool {
        self.phase_mask() & other.phase_mask() != 0
    }

    // The player owning or controlling this unit (the unit itself for players)
    fn spell_mod_owner(&self) -> Option<&dyn SpellModOwner>;
    fn apply_total_threat_modifier(&self, threat: f32, school_mask: BitFlags<SpellSchoolMask>)
        -> f32;

    fn redirect_threat_percent(&self) -> u32;
    fn redirect_threat_target(&self) -> Option<ObjectGuid>;

    fn is_in_accessible_place_for(&self, creature: &dyn Combatant) -> bool;
    fn combat_distance(&self) -> f32;
    fn is_within_combat_range(&self, target: &dyn Combatant, distance: f32) -> bool;
    fn is_within_melee_range(&self, target: &dyn Combatant) -> bool;
    fn can_creature_attack(&self, target: &dyn Combatant) -> bool;

    fn melee_damage_school_mask(&self) -> BitFlags<SpellSchoolMask>;
    fn is_immune_to_damage(&self, school_mask: BitFlags<SpellSchoolMask>) -> bool;
    fn has_negative_aura_with_interrupt_flag(&self, flags: BitFlags<AuraInterruptFlag>) -> bool;

    fn is_in_combat_with(&self, other: &ObjectGuid) -> bool;
    fn set_in_combat_with(&self, other: ObjectGuid);

    fn add_hated_by(&self, owner: ObjectGuid);
    fn remove_hated_by(&self, owner: ObjectGuid);

    fn send_change_current_victim(&self, victim: &HostileReference);
    fn send_remove_from_threat_list(&self, reference: &HostileReference);
}

pub trait UnitAccessor {
    fn get_unit(&self, guid: ObjectGuid) -> Option<&dyn Combatant>;
}

// What a threat manager needs from the outside world during one call
pub struct ThreatContext<'a> {
    pub owner: &'a dyn Combatant,
    pub units: &'a dyn UnitAccessor,
    pub data_store: &'a DataStore,
}

impl<'a> ThreatContext<'a> {
    pub fn new(
        owner: &'a dyn Combatant,
        units: &'a dyn UnitAccessor,
        data_store: &'a DataStore,
    ) -> Self {
        Self {
            owner,
            units,
            data_store,
        }
    }
}
