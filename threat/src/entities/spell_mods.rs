use crate::{
    game::combatant::SpellModOwner,
    shared::constants::{SpellModOp, SpellModType},
};

#[derive(Debug, Clone, Copy)]
pub struct SpellModifier {
    pub spell_id: u32,
    pub op: SpellModOp,
    pub mod_type: SpellModType,
    pub value: f32,
}

// Spell modifiers granted to a player by talents and auras
#[derive(Debug, Default)]
pub struct SpellModifiers {
    modifiers: Vec<SpellModifier>,
}

impl SpellModifiers {
    pub fn new() -> Self {
        Self {
            modifiers: Vec::new(),
        }
    }

    pub fn add(&mut self, modifier: SpellModifier) {
        self.modifiers.push(modifier);
    }

    pub fn remove(&mut self, spell_id: u32, op: SpellModOp) {
        self.modifiers
            .retain(|m| !(m.spell_id == spell_id && m.op == op));
    }
}

impl SpellModOwner for SpellModifiers {
    fn apply_spell_mod(&self, spell_id: u32, op: SpellModOp, base_value: f32) -> f32 {
        let mut total_flat = 0.0;
        let mut total_mul = 1.0;

        for modifier in self
            .modifiers
            .iter()
            .filter(|m| m.spell_id == spell_id && m.op == op)
        {
            match modifier.mod_type {
                SpellModType::Flat => total_flat += modifier.value,
                SpellModType::Pct => total_mul *= 1.0 + modifier.value / 100.0,
            }
        }

        (base_value + total_flat) * total_mul
    }
}
