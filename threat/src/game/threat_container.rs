use log::error;

use crate::{
    entities::object_guid::ObjectGuid,
    shared::constants::{
        AuraInterruptFlag, THREAT_MELEE_SWITCH_RATIO, THREAT_RANGED_SWITCH_RATIO,
        THREAT_SWITCH_MARGIN,
    },
};

use super::{
    combatant::{Combatant, ThreatContext, UnitAccessor},
    hostile_reference::HostileReference,
    threat_event::ThreatEvents,
};

// References ordered by effective threat, highest first. The order is only restored by update(),
// when the list was marked dirty.
#[derive(Debug, Default)]
pub struct ThreatContainer {
    threat_list: Vec<HostileReference>,
    dirty: bool,
}

impl ThreatContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.threat_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threat_list.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn iter(&self) -> impl Iterator<Item = &HostileReference> {
        self.threat_list.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut HostileReference> {
        self.threat_list.iter_mut()
    }

    pub fn most_hated(&self) -> Option<&HostileReference> {
        self.threat_list.first()
    }

    pub fn add_reference(&mut self, reference: HostileReference) {
        debug_assert!(
            self.get_reference_by_target(reference.unit_guid()).is_none(),
            "duplicate threat reference"
        );

        self.threat_list.push(reference);
        self.dirty = true;
    }

    // Unlinks the reference from the list and hands it back
    pub fn remove(&mut self, unit_guid: ObjectGuid) -> Option<HostileReference> {
        self.threat_list
            .iter()
            .position(|r| r.unit_guid() == unit_guid)
            .map(|index| self.threat_list.remove(index))
    }

    pub fn clear_references(&mut self, units: &dyn UnitAccessor) {
        for reference in self.threat_list.iter_mut() {
            reference.unlink(units);
        }

        self.threat_list.clear();
    }

    pub fn get_reference_by_target(&self, unit_guid: ObjectGuid) -> Option<&HostileReference> {
        self.threat_list.iter().find(|r| r.unit_guid() == unit_guid)
    }

    pub fn get_reference_by_target_mut(
        &mut self,
        unit_guid: ObjectGuid,
    ) -> Option<&mut HostileReference> {
        self.threat_list
            .iter_mut()
            .find(|r| r.unit_guid() == unit_guid)
    }

    // Add the threat if we have a reference on this target
    pub fn add_threat(
        &mut self,
        ctx: &ThreatContext,
        victim: ObjectGuid,
        threat: f32,
        events: &mut ThreatEvents,
    ) -> Option<&HostileReference> {
        let reference = self.get_reference_by_target_mut(victim)?;
        reference.add_threat(ctx, threat, events);
        Some(reference)
    }

    pub fn modify_threat_percent(
        &mut self,
        ctx: &ThreatContext,
        victim: ObjectGuid,
        percent: i32,
        events: &mut ThreatEvents,
    ) {
        if let Some(reference) = self.get_reference_by_target_mut(victim) {
            reference.add_threat_percent(ctx, percent, events);
        }
    }

    pub fn update(&mut self) {
        if self.dirty && self.threat_list.len() > 1 {
            // Stable: equal threats keep their insertion order, taunts first
            self.threat_list.sort_by(|a, b| {
                b.effective_threat()
                    .total_cmp(&a.effective_threat())
                    .then_with(|| b.is_taunting().cmp(&a.is_taunting()))
            });
        }

        self.dirty = false;
    }

    // Damaging these would be wasted (immunity) or would break a crowd control
    fn is_second_choice_target(attacker: &dyn Combatant, target: &dyn Combatant) -> bool {
        target.is_immune_to_damage(attacker.melee_damage_school_mask())
            || target.has_negative_aura_with_interrupt_flag(AuraInterruptFlag::TakeDamage.into())
    }

    // Return the next best victim, which could be the current victim
    pub fn select_next_victim(
        &self,
        attacker: &dyn Combatant,
        units: &dyn UnitAccessor,
        current_victim: Option<ObjectGuid>,
    ) -> Option<ObjectGuid> {
        let mut current_victim =
            current_victim.and_then(|guid| self.get_reference_by_target(guid));
        let mut second_choice_skipped = false;

        let found = self.scan_for_victim(
            attacker,
            units,
            &mut current_victim,
            Some(&mut second_choice_skipped),
        );

        // Everyone worth attacking was a second choice target: take the one with the highest
        // threat among them
        if found.is_none() && second_choice_skipped {
            return self.scan_for_victim(attacker, units, &mut current_victim, None);
        }

        found
    }

    // First taunting reference ranked above the current victim that can be attacked right now
    fn attackable_taunter_before(
        &self,
        attacker: &dyn Combatant,
        units: &dyn UnitAccessor,
        victim: &HostileReference,
    ) -> Option<ObjectGuid> {
        self.threat_list
            .iter()
            .take_while(|r| r.unit_guid() != victim.unit_guid())
            .filter(|r| r.is_taunting())
            .find(|r| {
                r.target(units).is_some_and(|t| {
                    !Self::is_second_choice_target(attacker, t) && attacker.can_creature_attack(t)
                })
            })
            .map(|r| r.unit_guid())
    }

    fn scan_for_victim<'a>(
        &'a self,
        attacker: &dyn Combatant,
        units: &dyn UnitAccessor,
        current_victim: &mut Option<&'a HostileReference>,
        mut second_choice_skipped: Option<&mut bool>,
    ) -> Option<ObjectGuid> {
        for reference in self.threat_list.iter() {
            let target = reference.target(units);
            // If the reference is online, the target must be there
            debug_assert!(target.is_some(), "online threat reference without target");
            let Some(target) = target else {
                error!(
                    "threat reference {} is online but its target cannot be found",
                    reference.unit_guid()
                );
                continue;
            };

            if let Some(skipped) = second_choice_skipped.as_deref_mut() {
                if Self::is_second_choice_target(attacker, target) {
                    *skipped = true;

                    // Don't compare the other candidates against a second choice victim
                    if current_victim.is_some_and(|v| v.unit_guid() == reference.unit_guid()) {
                        *current_victim = None;
                    }
                    continue;
                }
            }

            // Skip the targets that cannot be attacked right now
            if !attacker.can_creature_attack(target) {
                continue;
            }

            let Some(victim) = *current_victim else {
                return Some(reference.unit_guid());
            };

            // The list is sorted, reaching the current victim means nothing is better
            if victim.unit_guid() == reference.unit_guid() {
                return Some(victim.unit_guid());
            }

            if reference.is_taunting() && !victim.is_taunting() {
                return Some(reference.unit_guid());
            }

            // A taunter further down still beats a close candidate kept by the 110% band
            if !victim.is_taunting() {
                if let Some(taunter) = self.attackable_taunter_before(attacker, units, victim) {
                    return Some(taunter);
                }
            }

            let threat = reference.effective_threat();
            let victim_threat = victim.effective_threat();

            if threat <= THREAT_MELEE_SWITCH_RATIO * victim_threat {
                let victim_attackable = victim
                    .target(units)
                    .is_some_and(|t| attacker.can_creature_attack(t));

                return Some(if victim_attackable {
                    victim.unit_guid()
                } else {
                    reference.unit_guid()
                });
            }

            // 110% threat rule for targets in melee range, 130% rule for targets at range
            if threat > THREAT_RANGED_SWITCH_RATIO * victim_threat + THREAT_SWITCH_MARGIN
                || (threat > THREAT_MELEE_SWITCH_RATIO * victim_threat + THREAT_SWITCH_MARGIN
                    && attacker.is_within_melee_range(target))
            {
                return Some(reference.unit_guid());
            }
        }

        None
    }
}
