use enumflags2::BitFlags;

use crate::{
    datastore::{data_types::SpellRecord, DataStore},
    shared::constants::{SpellModOp, SpellSchoolMask},
};

use super::combatant::Combatant;

pub struct ThreatCalcHelper;

impl ThreatCalcHelper {
    // The hating unit is not used yet
    pub fn calc_threat(
        hated_unit: &dyn Combatant,
        _hating_unit: &dyn Combatant,
        threat: f32,
        school_mask: BitFlags<SpellSchoolMask>,
        threat_spell: Option<&SpellRecord>,
        data_store: &DataStore,
    ) -> f32 {
        let mut threat = threat;

        if let Some(spell) = threat_spell {
            if let Some(entry) = data_store.get_spell_threat_entry(spell.id) {
                if entry.pct_mod != 1.0 {
                    threat *= entry.pct_mod;
                }
            }

            // Energize is not affected by mods
            if spell.has_energize_effect() {
                return threat;
            }

            if let Some(mod_owner) = hated_unit.spell_mod_owner() {
                threat = mod_owner.apply_spell_mod(spell.id, SpellModOp::Threat, threat);
            }
        }

        hated_unit.apply_total_threat_modifier(threat, school_mask)
    }

    // Whether the hating unit (a creature) may put the hated unit in its threat list
    pub fn is_valid_process(
        hated_unit: &dyn Combatant,
        hating_unit: &dyn Combatant,
        threat_spell: Option<&SpellRecord>,
    ) -> bool {
        if hated_unit.guid() == hating_unit.guid() {
            return false;
        }

        if hated_unit.is_player() && hated_unit.is_game_master() {
            return false;
        }

        if !hated_unit.is_alive() || !hating_unit.is_alive() {
            return false;
        }

        if !hated_unit.is_in_map(hating_unit) || !hated_unit.in_same_phase(hating_unit) {
            return false;
        }

        if threat_spell.is_some_and(|spell| !spell.causes_threat()) {
            return false;
        }

        debug_assert!(
            !hating_unit.is_player(),
            "only creatures can own a threat list"
        );

        true
    }
}
