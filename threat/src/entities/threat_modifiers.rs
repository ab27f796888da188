use enumflags2::BitFlags;
use strum::IntoEnumIterator;

use crate::shared::constants::{SpellSchool, SpellSchoolMask, MAX_SPELL_SCHOOL};

// Multipliers applied to all the threat generated by a unit, per spell school (fed by
// SPELL_AURA_MOD_THREAT auras)
#[derive(Debug, Clone)]
pub struct ThreatModifiers {
    multipliers: [f32; MAX_SPELL_SCHOOL],
}

impl ThreatModifiers {
    pub fn new() -> Self {
        Self {
            multipliers: [1.0; MAX_SPELL_SCHOOL],
        }
    }

    pub fn multiplier(&self, school: SpellSchool) -> f32 {
        self.multipliers[school as usize]
    }

    pub fn apply_pct_modifier(
        &mut self,
        school_mask: BitFlags<SpellSchoolMask>,
        pct: f32,
        apply: bool,
    ) {
        let factor = (100.0 + pct) / 100.0;

        for school in SpellSchool::iter().filter(|s| school_mask.contains(s.mask())) {
            let multiplier = &mut self.multipliers[school as usize];
            if apply {
                *multiplier *= factor;
            } else if factor != 0.0 {
                *multiplier /= factor;
            }
        }
    }

    // Negative threat (threat reductions) is never scaled
    pub fn apply_total_threat_modifier(
        &self,
        threat: f32,
        school_mask: BitFlags<SpellSchoolMask>,
    ) -> f32 {
        if threat < 0.0 {
            return threat;
        }

        threat * self.multiplier(Self::first_school_in_mask(school_mask))
    }

    pub fn first_school_in_mask(school_mask: BitFlags<SpellSchoolMask>) -> SpellSchool {
        SpellSchool::iter()
            .find(|s| school_mask.contains(s.mask()))
            .unwrap_or(SpellSchool::Normal)
    }
}

impl Default for ThreatModifiers {
    fn default() -> Self {
        Self::new()
    }
}
