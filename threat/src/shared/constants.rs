use std::time::Duration;

use enumflags2::bitflags;
use enumn::N;
use strum::EnumIter;

pub const MAX_SPELL_EFFECTS: usize = 3;
pub const MAX_SPELL_SCHOOL: usize = 7;

// How often the client-side threat list of an owner is refreshed
pub const THREAT_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

// 110% rule in melee range, 130% rule at range
pub const THREAT_MELEE_SWITCH_RATIO: f32 = 1.1;
pub const THREAT_RANGED_SWITCH_RATIO: f32 = 1.3;
pub const THREAT_SWITCH_MARGIN: f32 = 1.0;

// Only the unit kinds that can appear in a threat list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, N)]
#[repr(u32)]
pub enum HighGuidType {
    Player = 0x0000,
    Unit = 0xF130,
    Pet = 0xF140,
}

impl HighGuidType {
    pub fn has_entry_part(self) -> bool {
        self != HighGuidType::Player
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, N)]
#[repr(u32)]
pub enum SpellSchool {
    Normal = 0, // Physical
    Holy = 1,
    Fire = 2,
    Nature = 3,
    Frost = 4,
    Shadow = 5,
    Arcane = 6,
}

impl SpellSchool {
    pub fn mask(&self) -> SpellSchoolMask {
        match self {
            SpellSchool::Normal => SpellSchoolMask::Normal,
            SpellSchool::Holy => SpellSchoolMask::Holy,
            SpellSchool::Fire => SpellSchoolMask::Fire,
            SpellSchool::Nature => SpellSchoolMask::Nature,
            SpellSchool::Frost => SpellSchoolMask::Frost,
            SpellSchool::Shadow => SpellSchoolMask::Shadow,
            SpellSchool::Arcane => SpellSchoolMask::Arcane,
        }
    }
}

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellSchoolMask {
    Normal = 0x01,
    Holy = 0x02,
    Fire = 0x04,
    Nature = 0x08,
    Frost = 0x10,
    Shadow = 0x20,
    Arcane = 0x40,
}

#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, N)]
#[repr(u32)]
pub enum SpellEffect {
    None = 0,
    Instakill = 1,
    SchoolDamage = 2,
    Dummy = 3,
    ApplyAura = 6,
    Heal = 10,
    Energize = 30,
    WeaponDamageNoSchool = 17,
    AttackMe = 114,
}

#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, N)]
#[repr(u32)]
pub enum AuraType {
    None = 0,
    PeriodicDamage = 3,
    ModConfuse = 5,
    ModFear = 7,
    PeriodicHeal = 8,
    ModThreat = 10,
    ModTaunt = 11,
    ModStun = 12,
    ModRoot = 26,
    PeriodicEnergize = 24,
}

// SpellRecord::attributes_ex
#[allow(dead_code)]
#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellAttributeEx {
    DismissPet = 0x00000001,
    DrainAllPower = 0x00000002,
    Channeled1 = 0x00000004,
    CantBeRedirected = 0x00000008,
    NotBreakStealth = 0x00000020,
    Channeled2 = 0x00000040,
    CantBeReflected = 0x00000080,
    CantTargetInCombat = 0x00000100,
    MeleeCombatStart = 0x00000200,
    NoThreat = 0x00000400,
    IsPickpocket = 0x00001000,
    FarSight = 0x00002000,
    ChannelTrackTarget = 0x00004000,
    DispelAurasOnImmunity = 0x00008000,
    UnaffectedBySchoolImmune = 0x00010000,
}

#[allow(dead_code)]
#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuraInterruptFlag {
    HitBySpell = 0x00000001,
    TakeDamage = 0x00000002,
    Cast = 0x00000004,
    Move = 0x00000008,
    Turning = 0x00000010,
    Jump = 0x00000020,
    NotMounted = 0x00000040,
    NotAboveWater = 0x00000080,
    NotUnderWater = 0x00000100,
    NotSheathed = 0x00000200,
    Talk = 0x00000400,
    Use = 0x00000800,
    MeleeAttack = 0x00001000,
}

#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, N)]
#[repr(u32)]
pub enum SpellModOp {
    Damage = 0,
    Duration = 1,
    Threat = 2,
    Effect1 = 3,
    Charges = 4,
    Range = 5,
    Radius = 6,
    CriticalChance = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, N)]
#[repr(u32)]
pub enum SpellModType {
    Flat = 107, // SPELL_AURA_ADD_FLAT_MODIFIER
    Pct = 108,  // SPELL_AURA_ADD_PCT_MODIFIER
}
