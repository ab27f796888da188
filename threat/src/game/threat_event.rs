use crate::entities::object_guid::ObjectGuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThreatRefStatusChangeEventType {
    ThreatChange(f32),
    OnlineStatus { online: bool },
    AccessibleStatus { accessible: bool },
    RemoveFromList,
}

// Sent by a HostileReference to its ThreatManager when its state changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatRefStatusChangeEvent {
    pub event_type: ThreatRefStatusChangeEventType,
    pub unit_guid: ObjectGuid,
}

impl ThreatRefStatusChangeEvent {
    pub fn new(event_type: ThreatRefStatusChangeEventType, unit_guid: ObjectGuid) -> Self {
        Self {
            event_type,
            unit_guid,
        }
    }
}

pub type ThreatEvents = Vec<ThreatRefStatusChangeEvent>;
