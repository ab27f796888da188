use log::trace;

use crate::entities::object_guid::ObjectGuid;

use super::{
    combatant::{Combatant, ThreatContext, UnitAccessor},
    threat_event::{ThreatEvents, ThreatRefStatusChangeEvent, ThreatRefStatusChangeEventType},
};

// One entry in the threat list of an owner: how much the owner hates a target. The target is only
// known by its guid so that the reference survives the target being temporarily unreachable.
#[derive(Debug)]
pub struct HostileReference {
    unit_guid: ObjectGuid,
    owner_guid: ObjectGuid,
    threat: f32,
    temp_threat_modifier: f32, // Non-zero while a taunt is active
    online: bool,
    accessible: bool,
    valid: bool,
}

impl HostileReference {
    pub fn new(target: &dyn Combatant, owner_guid: ObjectGuid, threat: f32) -> Self {
        let mut reference = Self {
            unit_guid: target.guid(),
            owner_guid,
            threat,
            temp_threat_modifier: 0.0,
            online: true,
            accessible: true,
            valid: false,
        };
        reference.link(target);
        reference
    }

    pub fn unit_guid(&self) -> ObjectGuid {
        self.unit_guid
    }

    pub fn owner_guid(&self) -> ObjectGuid {
        self.owner_guid
    }

    pub fn threat(&self) -> f32 {
        self.threat
    }

    pub fn temp_threat_modifier(&self) -> f32 {
        self.temp_threat_modifier
    }

    // The threat used to order references and to pick a victim
    pub fn effective_threat(&self) -> f32 {
        if self.temp_threat_modifier != 0.0 {
            self.temp_threat_modifier
        } else {
            self.threat
        }
    }

    pub fn is_taunting(&self) -> bool {
        self.temp_threat_modifier != 0.0
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn target<'a>(&self, units: &'a dyn UnitAccessor) -> Option<&'a dyn Combatant> {
        if !self.valid {
            return None;
        }

        units.get_unit(self.unit_guid)
    }

    // Tell the target that we have a link
    fn link(&mut self, target: &dyn Combatant) {
        target.add_hated_by(self.owner_guid);
        self.valid = true;
    }

    // Tell the target that the link is cut
    pub fn unlink(&mut self, units: &dyn UnitAccessor) {
        if let Some(target) = self.target(units) {
            target.remove_hated_by(self.owner_guid);
        }
        self.valid = false;
    }

    fn fire_status_changed(
        &self,
        event_type: ThreatRefStatusChangeEventType,
        events: &mut ThreatEvents,
    ) {
        trace!("threat reference {} fired {:?}", self.unit_guid, event_type);
        events.push(ThreatRefStatusChangeEvent::new(event_type, self.unit_guid));
    }

    // Lowest level of adding threat
    pub fn add_threat(&mut self, ctx: &ThreatContext, mod_threat: f32, events: &mut ThreatEvents) {
        self.threat += mod_threat;

        // The threat changed, the target has to be available again if the link was cut before
        if !self.is_online() {
            self.update_online_status(ctx, events);
        }

        if mod_threat != 0.0 {
            self.fire_status_changed(
                ThreatRefStatusChangeEventType::ThreatChange(mod_threat),
                events,
            );
        }
    }

    pub fn add_threat_percent(
        &mut self,
        ctx: &ThreatContext,
        percent: i32,
        events: &mut ThreatEvents,
    ) {
        let mod_threat = self.threat * percent as f32 / 100.0;
        self.add_threat(ctx, mod_threat, events);
    }

    // Overwrites the threat without notifying anyone
    pub fn set_threat(&mut self, threat: f32) {
        self.threat = threat;
    }

    // Reported as a threat change of the effective threat, as this may reorder the list
    pub fn set_temp_threat(&mut self, threat: f32, events: &mut ThreatEvents) {
        let previous = self.effective_threat();
        self.temp_threat_modifier = threat;

        let delta = self.effective_threat() - previous;
        if delta != 0.0 {
            self.fire_status_changed(ThreatRefStatusChangeEventType::ThreatChange(delta), events);
        }
    }

    pub fn reset_temp_threat(&mut self, events: &mut ThreatEvents) {
        self.set_temp_threat(0.0, events);
    }

    // Check whether the owner can reach the target and update the status accordingly
    pub fn update_online_status(&mut self, ctx: &ThreatContext, events: &mut ThreatEvents) {
        if !self.valid {
            if let Some(target) = ctx.units.get_unit(self.unit_guid) {
                self.link(target);
            }
        }

        let (online, accessible) = match self.target(ctx.units) {
            Some(target)
                if !(target.is_player() && target.is_game_master())
                    && !target.is_in_flight()
                    && target.is_in_map(ctx.owner)
                    && target.in_same_phase(ctx.owner) =>
            {
                if target.is_in_accessible_place_for(ctx.owner) {
                    (true, true)
                } else if ctx
                    .owner
                    .is_within_combat_range(target, ctx.owner.combat_distance())
                {
                    // Not accessible but stays online
                    (true, false)
                } else {
                    (false, false)
                }
            }
            Some(_) => (false, false),
            None => {
                self.valid = false;
                (false, false)
            }
        };

        // Keep accessible => online true between the two notifications
        if online {
            self.set_online_offline_state(true, events);
            self.set_accessible_state(accessible, events);
        } else {
            self.set_online_offline_state(false, events);
        }
    }

    pub fn set_online_offline_state(&mut self, is_online: bool, events: &mut ThreatEvents) {
        if self.online != is_online {
            self.online = is_online;
            if !self.online {
                self.set_accessible_state(false, events);
            }

            self.fire_status_changed(
                ThreatRefStatusChangeEventType::OnlineStatus { online: is_online },
                events,
            );
        }
    }

    pub fn set_accessible_state(&mut self, is_accessible: bool, events: &mut ThreatEvents) {
        if self.accessible != is_accessible {
            self.accessible = is_accessible;

            self.fire_status_changed(
                ThreatRefStatusChangeEventType::AccessibleStatus {
                    accessible: is_accessible,
                },
                events,
            );
        }
    }

    // Called on behalf of the target (death, despawn): the manager drops the reference once it
    // handled the event
    pub fn remove_reference(&mut self, units: &dyn UnitAccessor, events: &mut ThreatEvents) {
        self.unlink(units);
        self.fire_status_changed(ThreatRefStatusChangeEventType::RemoveFromList, events);
    }
}
