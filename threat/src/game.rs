pub mod combatant;
pub mod hostile_reference;
pub mod threat_calc;
pub mod threat_container;
pub mod threat_event;
pub mod threat_manager;

#[cfg(test)]
pub mod test_support;
