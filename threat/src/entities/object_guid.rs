use crate::shared::constants::HighGuidType;

const ENTRY_MASK: u64 = 0xFF_FFFF;

// 16 bits of HighGuidType, then a 32-bit counter for players or a 24-bit entry and a 24-bit
// counter for creatures and pets
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Debug)]
pub struct ObjectGuid(u64);

impl ObjectGuid {
    pub fn player(counter: u32) -> Self {
        Self(Self::high_bits(HighGuidType::Player) | counter as u64)
    }

    pub fn creature(entry: u32, counter: u32) -> Self {
        Self::with_entry(HighGuidType::Unit, entry, counter)
    }

    pub fn pet(entry: u32, counter: u32) -> Self {
        Self::with_entry(HighGuidType::Pet, entry, counter)
    }

    fn with_entry(high_guid_type: HighGuidType, entry: u32, counter: u32) -> Self {
        Self(
            Self::high_bits(high_guid_type)
                | ((entry as u64 & ENTRY_MASK) << 24)
                | (counter as u64 & ENTRY_MASK),
        )
    }

    fn high_bits(high_guid_type: HighGuidType) -> u64 {
        (high_guid_type as u64) << 48
    }

    // Rejects guids of objects that cannot take part in combat (items, game objects, ...)
    pub fn from_raw(raw: u64) -> Option<Self> {
        HighGuidType::n((raw >> 48) as u32).map(|_| Self(raw))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn high_guid_type(&self) -> Option<HighGuidType> {
        HighGuidType::n((self.0 >> 48) as u32)
    }

    pub fn is_player(&self) -> bool {
        self.high_guid_type() == Some(HighGuidType::Player)
    }

    pub fn is_creature_or_pet(&self) -> bool {
        matches!(
            self.high_guid_type(),
            Some(HighGuidType::Unit | HighGuidType::Pet)
        )
    }

    pub fn entry(&self) -> Option<u32> {
        self.high_guid_type()
            .filter(|high| high.has_entry_part())
            .map(|_| ((self.0 >> 24) & ENTRY_MASK) as u32)
    }

    pub fn counter(&self) -> u32 {
        match self.entry() {
            Some(_) => (self.0 & ENTRY_MASK) as u32,
            None => self.0 as u32,
        }
    }
}

impl std::fmt::Display for ObjectGuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.high_guid_type() {
            Some(high) => write!(f, "{:?}:0x{:016X}", high, self.0),
            None => write!(f, "0x{:016X}", self.0),
        }
    }
}
