use std::collections::{HashMap, HashSet};

use enumflags2::BitFlags;
use parking_lot::RwLock;

use crate::{
    datastore::DataStore,
    entities::{
        hated_by::HatedBy, object_guid::ObjectGuid, spell_mods::SpellModifiers,
        threat_modifiers::ThreatModifiers,
    },
    shared::constants::{AuraInterruptFlag, SpellSchoolMask},
};

use super::{
    combatant::{Combatant, SpellModOwner, ThreatContext, UnitAccessor},
    hostile_reference::HostileReference,
};

pub fn player_guid(counter: u32) -> ObjectGuid {
    ObjectGuid::player(counter)
}

pub fn creature_guid(counter: u32) -> ObjectGuid {
    ObjectGuid::creature(299, counter)
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    ChangeCurrentVictim(ObjectGuid),
    RemoveFromThreatList(ObjectGuid),
}

pub struct MockUnit {
    pub guid: ObjectGuid,
    pub alive: bool,
    pub game_master: bool,
    pub in_flight: bool,
    pub map_id: u32,
    pub instance_id: u32,
    pub phase_mask: u32,
    pub accessible: bool,
    pub immune_mask: BitFlags<SpellSchoolMask>,
    pub breakable_crowd_control: bool,
    pub redirect: Option<(u32, ObjectGuid)>,
    pub threat_modifiers: ThreatModifiers,
    pub spell_mods: Option<SpellModifiers>,
    pub hated_by: HatedBy,
    // Owner side
    pub combat_distance: f32,
    pub melee_damage_school_mask: BitFlags<SpellSchoolMask>,
    pub melee_range: HashSet<ObjectGuid>,
    pub combat_range: HashSet<ObjectGuid>,
    pub cannot_attack: HashSet<ObjectGuid>,
    pub in_combat_with: RwLock<HashSet<ObjectGuid>>,
    pub notifications: RwLock<Vec<Notification>>,
}

impl MockUnit {
    pub fn new(guid: ObjectGuid) -> Self {
        Self {
            guid,
            alive: true,
            game_master: false,
            in_flight: false,
            map_id: 0,
            instance_id: 0,
            phase_mask: 0x1,
            accessible: true,
            immune_mask: BitFlags::empty(),
            breakable_crowd_control: false,
            redirect: None,
            threat_modifiers: ThreatModifiers::new(),
            spell_mods: None,
            hated_by: HatedBy::new(),
            combat_distance: 0.0,
            melee_damage_school_mask: SpellSchoolMask::Normal.into(),
            melee_range: HashSet::new(),
            combat_range: HashSet::new(),
            cannot_attack: HashSet::new(),
            in_combat_with: RwLock::new(HashSet::new()),
            notifications: RwLock::new(Vec::new()),
        }
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.write())
    }
}

impl Combatant for MockUnit {
    fn guid(&self) -> ObjectGuid {
        self.guid
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_game_master(&self) -> bool {
        self.game_master
    }

    fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    fn map_id(&self) -> u32 {
        self.map_id
    }

    fn instance_id(&self) -> u32 {
        self.instance_id
    }

    fn phase_mask(&self) -> u32 {
        self.phase_mask
    }

    fn spell_mod_owner(&self) -> Option<&dyn SpellModOwner> {
        self.spell_mods.as_ref().map(|m| m as &dyn SpellModOwner)
    }

    fn apply_total_threat_modifier(
        &self,
        threat: f32,
        school_mask: BitFlags<SpellSchoolMask>,
    ) -> f32 {
        self.threat_modifiers
            .apply_total_threat_modifier(threat, school_mask)
    }

    fn redirect_threat_percent(&self) -> u32 {
        self.redirect.map(|(pct, _)| pct).unwrap_or(0)
    }

    fn redirect_threat_target(&self) -> Option<ObjectGuid> {
        self.redirect.map(|(_, target)| target)
    }

    fn is_in_accessible_place_for(&self, _creature: &dyn Combatant) -> bool {
        self.accessible
    }

    fn combat_distance(&self) -> f32 {
        self.combat_distance
    }

    fn is_within_combat_range(&self, target: &dyn Combatant, _distance: f32) -> bool {
        self.combat_range.contains(&target.guid())
    }

    fn is_within_melee_range(&self, target: &dyn Combatant) -> bool {
        self.melee_range.contains(&target.guid())
    }

    fn can_creature_attack(&self, target: &dyn Combatant) -> bool {
        target.is_alive() && !self.cannot_attack.contains(&target.guid())
    }

    fn melee_damage_school_mask(&self) -> BitFlags<SpellSchoolMask> {
        self.melee_damage_school_mask
    }

    fn is_immune_to_damage(&self, school_mask: BitFlags<SpellSchoolMask>) -> bool {
        !school_mask.is_empty() && self.immune_mask.contains(school_mask)
    }

    fn has_negative_aura_with_interrupt_flag(&self, flags: BitFlags<AuraInterruptFlag>) -> bool {
        self.breakable_crowd_control && flags.contains(AuraInterruptFlag::TakeDamage)
    }

    fn is_in_combat_with(&self, other: &ObjectGuid) -> bool {
        self.in_combat_with.read().contains(other)
    }

    fn set_in_combat_with(&self, other: ObjectGuid) {
        self.in_combat_with.write().insert(other);
    }

    fn add_hated_by(&self, owner: ObjectGuid) {
        self.hated_by.add(owner);
    }

    fn remove_hated_by(&self, owner: ObjectGuid) {
        self.hated_by.remove(owner);
    }

    fn send_change_current_victim(&self, victim: &HostileReference) {
        self.notifications
            .write()
            .push(Notification::ChangeCurrentVictim(victim.unit_guid()));
    }

    fn send_remove_from_threat_list(&self, reference: &HostileReference) {
        self.notifications
            .write()
            .push(Notification::RemoveFromThreatList(reference.unit_guid()));
    }
}

pub struct MockWorld {
    units: HashMap<ObjectGuid, MockUnit>,
    pub data_store: DataStore,
}

impl MockWorld {
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
            data_store: DataStore::new(),
        }
    }

    pub fn insert(&mut self, unit: MockUnit) -> ObjectGuid {
        let guid = unit.guid;
        self.units.insert(guid, unit);
        guid
    }

    pub fn remove(&mut self, guid: ObjectGuid) -> MockUnit {
        self.units.remove(&guid).expect("unknown mock unit")
    }

    pub fn unit(&self, guid: ObjectGuid) -> &MockUnit {
        &self.units[&guid]
    }

    pub fn unit_mut(&mut self, guid: ObjectGuid) -> &mut MockUnit {
        self.units.get_mut(&guid).expect("unknown mock unit")
    }

    pub fn ctx(&self, owner: ObjectGuid) -> ThreatContext<'_> {
        ThreatContext::new(self.unit(owner), self, &self.data_store)
    }
}

impl UnitAccessor for MockWorld {
    fn get_unit(&self, guid: ObjectGuid) -> Option<&dyn Combatant> {
        self.units.get(&guid).map(|u| u as &dyn Combatant)
    }
}
