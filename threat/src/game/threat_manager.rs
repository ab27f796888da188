use std::time::Duration;

use enumflags2::BitFlags;
use log::{debug, error, trace, warn};
use shipyard::Component;

use crate::{
    datastore::data_types::SpellRecord,
    entities::object_guid::ObjectGuid,
    shared::constants::{SpellSchoolMask, THREAT_MELEE_SWITCH_RATIO},
};

use super::{
    combatant::{Combatant, ThreatContext},
    hostile_reference::HostileReference,
    threat_calc::ThreatCalcHelper,
    threat_container::ThreatContainer,
    threat_event::{ThreatEvents, ThreatRefStatusChangeEvent, ThreatRefStatusChangeEventType},
};

// The threat list of a creature. Online references take part in the victim selection, offline
// ones (targets in flight, out of reach, ...) are kept aside with their threat.
#[derive(Component, Debug)]
pub struct ThreatManager {
    owner_guid: ObjectGuid,
    threat_container: ThreatContainer,
    threat_offline_container: ThreatContainer,
    current_victim: Option<ObjectGuid>,
    update_timer: Duration,
    update_interval: Duration,
}

impl ThreatManager {
    pub fn new(owner_guid: ObjectGuid, update_interval: Duration) -> Self {
        Self {
            owner_guid,
            threat_container: ThreatContainer::new(),
            threat_offline_container: ThreatContainer::new(),
            current_victim: None,
            update_timer: update_interval,
            update_interval,
        }
    }

    pub fn owner_guid(&self) -> ObjectGuid {
        self.owner_guid
    }

    pub fn online_container(&self) -> &ThreatContainer {
        &self.threat_container
    }

    pub fn offline_container(&self) -> &ThreatContainer {
        &self.threat_offline_container
    }

    // The online references, e.g. to build the client threat list
    pub fn threat_list(&self) -> impl Iterator<Item = &HostileReference> {
        self.threat_container.iter()
    }

    pub fn is_threat_list_empty(&self) -> bool {
        self.threat_container.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.threat_container.is_dirty()
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.threat_container.set_dirty(dirty);
    }

    pub fn current_victim(&self) -> Option<&HostileReference> {
        self.current_victim
            .and_then(|guid| self.threat_container.get_reference_by_target(guid))
    }

    pub fn clear_references(&mut self, ctx: &ThreatContext) {
        self.threat_container.clear_references(ctx.units);
        self.threat_offline_container.clear_references(ctx.units);
        self.current_victim = None;
        self.update_timer = self.update_interval;
    }

    pub fn add_threat(
        &mut self,
        ctx: &ThreatContext,
        victim: &dyn Combatant,
        threat: f32,
        school_mask: BitFlags<SpellSchoolMask>,
        threat_spell: Option<&SpellRecord>,
    ) {
        if !ThreatCalcHelper::is_valid_process(victim, ctx.owner, threat_spell) {
            return;
        }

        let threat = ThreatCalcHelper::calc_threat(
            victim,
            ctx.owner,
            threat,
            school_mask,
            threat_spell,
            ctx.data_store,
        );
        self.do_add_threat(ctx, victim, threat);
    }

    // Same as add_threat for a victim only known by its guid; unknown units are ignored
    pub fn add_threat_to(
        &mut self,
        ctx: &ThreatContext,
        victim: ObjectGuid,
        threat: f32,
        school_mask: BitFlags<SpellSchoolMask>,
        threat_spell: Option<&SpellRecord>,
    ) {
        match ctx.units.get_unit(victim) {
            Some(unit) => self.add_threat(ctx, unit, threat, school_mask, threat_spell),
            None => trace!("ignoring threat towards unknown unit {}", victim),
        }
    }

    // Threat caused by a spell known by its id, in the school of the spell
    pub fn add_spell_threat_to(
        &mut self,
        ctx: &ThreatContext,
        victim: ObjectGuid,
        threat: f32,
        spell_id: u32,
    ) {
        let Some(spell) = ctx.data_store.get_spell_record(spell_id) else {
            warn!("ignoring threat from unknown spell {}", spell_id);
            return;
        };

        self.add_threat_to(ctx, victim, threat, spell.school_mask, Some(spell));
    }

    // Splits the threat between the victim and its redirect target, if any
    fn do_add_threat(&mut self, ctx: &ThreatContext, victim: &dyn Combatant, threat: f32) {
        let mut threat = threat;

        // Must check > 0.0, otherwise redirects could bounce negative threat around
        let redirect_pct = victim.redirect_threat_percent();
        if threat > 0.0 && redirect_pct > 0 {
            if let Some(redirect_guid) = victim.redirect_threat_target() {
                match ctx.units.get_unit(redirect_guid) {
                    Some(redirect_target) => {
                        if !ctx.owner.is_in_combat_with(&redirect_guid) {
                            ctx.owner.set_in_combat_with(redirect_guid);
                        }

                        let redirect_threat = threat * redirect_pct as f32 / 100.0;
                        threat -= redirect_threat;
                        self.add_threat_internal(ctx, redirect_target, redirect_threat);
                    }
                    None => warn!(
                        "threat redirect target {} of {} not found",
                        redirect_guid,
                        victim.guid()
                    ),
                }
            }
        }

        self.add_threat_internal(ctx, victim, threat);
    }

    fn add_threat_internal(&mut self, ctx: &ThreatContext, victim: &dyn Combatant, threat: f32) {
        let victim_guid = victim.guid();
        let mut events = ThreatEvents::new();

        let found = self
            .threat_container
            .add_threat(ctx, victim_guid, threat, &mut events)
            .is_some()
            || self
                .threat_offline_container
                .add_threat(ctx, victim_guid, threat, &mut events)
                .is_some();

        if !found {
            // Created and given its first threat in one go, so only one threat change is fired
            let mut reference = HostileReference::new(victim, self.owner_guid, 0.0);
            reference.add_threat(ctx, threat, &mut events);

            if victim.is_player() && victim.is_game_master() {
                // GM is always offline
                reference.set_online_offline_state(false, &mut events);
            }

            self.threat_container.add_reference(reference);

            if self
                .threat_container
                .get_reference_by_target(victim_guid)
                .is_none()
            {
                error!(
                    "ThreatManager::add_threat_internal still missing threat reference after manually adding: {} {}",
                    victim_guid, threat
                );
            }
        }

        self.process_threat_events(ctx, events);
    }

    pub fn modify_threat_percent(&mut self, ctx: &ThreatContext, victim: ObjectGuid, percent: i32) {
        let mut events = ThreatEvents::new();
        self.threat_container
            .modify_threat_percent(ctx, victim, percent, &mut events);
        self.process_threat_events(ctx, events);
    }

    pub fn threat(&self, victim: ObjectGuid, also_search_offline_list: bool) -> f32 {
        if let Some(reference) = self.threat_container.get_reference_by_target(victim) {
            return reference.threat();
        }

        if also_search_offline_list {
            if let Some(reference) = self.threat_offline_container.get_reference_by_target(victim)
            {
                return reference.threat();
            }
        }

        0.0
    }

    // Sorts the list if needed and returns the unit the owner should attack
    pub fn get_hostile_target(&mut self, ctx: &ThreatContext) -> Option<ObjectGuid> {
        self.threat_container.update();

        if ctx.owner.is_player() {
            warn!("get_hostile_target called for player {}", ctx.owner.guid());
            return None;
        }

        let next_victim =
            self.threat_container
                .select_next_victim(ctx.owner, ctx.units, self.current_victim);
        if next_victim != self.current_victim {
            self.set_current_victim(ctx, next_victim);
        }

        self.current_victim
    }

    fn set_current_victim(&mut self, ctx: &ThreatContext, victim: Option<ObjectGuid>) {
        if let Some(guid) = victim {
            if self.current_victim != Some(guid) {
                if let Some(reference) = self.threat_container.get_reference_by_target(guid) {
                    debug!("{} switches its victim to {}", self.owner_guid, guid);
                    ctx.owner.send_change_current_victim(reference);
                }
            }
        }

        self.current_victim = victim;
    }

    pub fn taunt_apply(&mut self, ctx: &ThreatContext, taunter: ObjectGuid) {
        let Some(victim_threat) = self.current_victim().map(|v| v.effective_threat()) else {
            return;
        };

        // The taunter is raised to the top of the list, which may be above the victim
        self.threat_container.update();
        let top_threat = self
            .threat_container
            .most_hated()
            .map_or(victim_threat, |r| r.effective_threat().max(victim_threat));

        let mut events = ThreatEvents::new();
        if let Some(reference) = self.threat_container.get_reference_by_target_mut(taunter) {
            // Temp threat must be unused
            if reference.effective_threat() < top_threat
                && reference.temp_threat_modifier() == 0.0
            {
                reference.set_temp_threat(top_threat, &mut events);
            }
        }
        self.process_threat_events(ctx, events);
    }

    pub fn taunt_fade_out(&mut self, ctx: &ThreatContext, taunter: ObjectGuid) {
        let mut events = ThreatEvents::new();
        if let Some(reference) = self.threat_container.get_reference_by_target_mut(taunter) {
            reference.reset_temp_threat(&mut events);
        }
        self.process_threat_events(ctx, events);
    }

    // Reset all aggro without modifying the threat list
    pub fn reset_all_aggro(&mut self) {
        if self.threat_container.is_empty() {
            return;
        }

        for reference in self.threat_container.iter_mut() {
            reference.set_threat(0.0);
        }

        self.set_dirty(true);
    }

    pub fn is_need_update_to_client(&mut self, elapsed: Duration) -> bool {
        if self.is_threat_list_empty() && !self.threat_container.is_dirty() {
            return false;
        }

        if elapsed >= self.update_timer {
            self.update_timer = self.update_interval;
            return true;
        }

        self.update_timer -= elapsed;
        false
    }

    // The state of the target changed (flight, teleport, GM mode, ...)
    pub fn update_online_status(&mut self, ctx: &ThreatContext, target: ObjectGuid) {
        let mut events = ThreatEvents::new();
        let reference = match self.threat_container.get_reference_by_target_mut(target) {
            Some(reference) => Some(reference),
            None => self
                .threat_offline_container
                .get_reference_by_target_mut(target),
        };

        if let Some(reference) = reference {
            reference.update_online_status(ctx, &mut events);
        }
        self.process_threat_events(ctx, events);
    }

    pub fn update_online_statuses(&mut self, ctx: &ThreatContext) {
        let targets: Vec<ObjectGuid> = self
            .threat_container
            .iter()
            .chain(self.threat_offline_container.iter())
            .map(|r| r.unit_guid())
            .collect();

        for target in targets {
            self.update_online_status(ctx, target);
        }
    }

    // The target is gone (death, despawn, logout)
    pub fn remove_reference(&mut self, ctx: &ThreatContext, target: ObjectGuid) {
        let mut events = ThreatEvents::new();
        let reference = match self.threat_container.get_reference_by_target_mut(target) {
            Some(reference) => Some(reference),
            None => self
                .threat_offline_container
                .get_reference_by_target_mut(target),
        };

        if let Some(reference) = reference {
            reference.remove_reference(ctx.units, &mut events);
        }
        self.process_threat_events(ctx, events);
    }

    fn process_threat_events(&mut self, ctx: &ThreatContext, events: ThreatEvents) {
        for event in events {
            self.process_threat_event(ctx, &event);
        }
    }

    pub fn process_threat_event(
        &mut self,
        ctx: &ThreatContext,
        event: &ThreatRefStatusChangeEvent,
    ) {
        let guid = event.unit_guid;
        let previous_victim = self.current_victim;
        let is_current_victim = self.current_victim == Some(guid);

        match event.event_type {
            ThreatRefStatusChangeEventType::ThreatChange(delta) => {
                // The order in the threat list might have changed
                if (is_current_victim && delta <= 0.0) || (!is_current_victim && delta > 0.0) {
                    self.set_dirty(true);
                }
            }
            ThreatRefStatusChangeEventType::OnlineStatus { online: false } => {
                if is_current_victim {
                    self.set_current_victim(ctx, None);
                    self.set_dirty(true);
                }

                match self.threat_container.remove(guid) {
                    Some(reference) => {
                        ctx.owner.send_remove_from_threat_list(&reference);
                        trace!("{}: {} moved to the offline threat list", self.owner_guid, guid);
                        self.threat_offline_container.add_reference(reference);
                    }
                    None => error!(
                        "{}: {} went offline but is not in the online threat list",
                        self.owner_guid, guid
                    ),
                }
            }
            ThreatRefStatusChangeEventType::OnlineStatus { online: true } => {
                match self.threat_offline_container.remove(guid) {
                    Some(reference) => {
                        let victim_threat = self.current_victim().map(|v| v.effective_threat());
                        if victim_threat.map_or(true, |threat| {
                            reference.effective_threat() > THREAT_MELEE_SWITCH_RATIO * threat
                        }) {
                            self.set_dirty(true);
                        }

                        trace!("{}: {} moved to the online threat list", self.owner_guid, guid);
                        self.threat_container.add_reference(reference);
                    }
                    None => error!(
                        "{}: {} came online but is not in the offline threat list",
                        self.owner_guid, guid
                    ),
                }
            }
            ThreatRefStatusChangeEventType::AccessibleStatus { accessible } => {
                trace!(
                    "{}: {} accessible status changed to {}",
                    self.owner_guid,
                    guid,
                    accessible
                );
            }
            ThreatRefStatusChangeEventType::RemoveFromList => {
                if is_current_victim {
                    self.set_current_victim(ctx, None);
                    self.set_dirty(true);
                }

                let reference = match self.threat_container.remove(guid) {
                    Some(reference) => Some(reference),
                    None => self.threat_offline_container.remove(guid),
                };

                match reference {
                    Some(reference) => {
                        debug_assert!(!reference.is_valid(), "removed reference still linked");
                        ctx.owner.send_remove_from_threat_list(&reference);
                    }
                    None => error!(
                        "{}: cannot remove unknown threat reference {}",
                        self.owner_guid, guid
                    ),
                }
            }
        }

        self.threat_container.update();

        // Pick a replacement right away so that the owner is told about it
        if previous_victim.is_some() && self.current_victim.is_none() {
            self.get_hostile_target(ctx);
        }
    }
}
