use enumflags2::BitFlags;
use log::warn;

use crate::shared::constants::{
    AuraType, SpellAttributeEx, SpellEffect, SpellSchoolMask, MAX_SPELL_EFFECTS,
};

#[derive(Debug, Clone, Copy)]
pub struct SpellEffectInfo {
    pub effect: SpellEffect,
    pub apply_aura_name: AuraType,
}

impl SpellEffectInfo {
    pub fn none() -> Self {
        Self {
            effect: SpellEffect::None,
            apply_aura_name: AuraType::None,
        }
    }

    pub fn is_energize(&self) -> bool {
        self.effect == SpellEffect::Energize || self.apply_aura_name == AuraType::PeriodicEnergize
    }
}

#[derive(Debug, Clone)]
pub struct SpellRecord {
    pub id: u32,
    pub attributes_ex: BitFlags<SpellAttributeEx>,
    pub school_mask: BitFlags<SpellSchoolMask>,
    pub effects: [SpellEffectInfo; MAX_SPELL_EFFECTS],
}

impl SpellRecord {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            attributes_ex: BitFlags::empty(),
            school_mask: SpellSchoolMask::Normal.into(),
            effects: [SpellEffectInfo::none(); MAX_SPELL_EFFECTS],
        }
    }

    pub fn with_attributes_ex(mut self, attributes_ex: BitFlags<SpellAttributeEx>) -> Self {
        self.attributes_ex = attributes_ex;
        self
    }

    pub fn with_school_mask(mut self, school_mask: BitFlags<SpellSchoolMask>) -> Self {
        self.school_mask = school_mask;
        self
    }

    pub fn with_effect(mut self, index: usize, effect: SpellEffect, aura: AuraType) -> Self {
        match self.effects.get_mut(index) {
            Some(slot) => {
                *slot = SpellEffectInfo {
                    effect,
                    apply_aura_name: aura,
                }
            }
            None => warn!("spell {}: ignoring effect at out of range index {}", self.id, index),
        }
        self
    }

    pub fn causes_threat(&self) -> bool {
        !self.attributes_ex.contains(SpellAttributeEx::NoThreat)
    }

    // Energize effects generate a flat amount of threat, unaffected by any modifier
    pub fn has_energize_effect(&self) -> bool {
        self.effects.iter().any(|e| e.is_energize())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpellThreatEntry {
    pub flat_mod: i32,
    pub pct_mod: f32,
    pub ap_pct_mod: f32,
}
