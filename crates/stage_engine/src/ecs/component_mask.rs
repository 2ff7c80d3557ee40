//! Component presence bitmask
//!
//! Tracks which engine system types an actor currently holds so systems can
//! skip actors without scanning their component maps.

use bitflags::bitflags;

use crate::ecs::SystemType;

bitflags! {
    /// One bit per engine system type. `Custom` has no bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ComponentMask: u64 {
        /// A transform component is present
        const TRANSFORM = 1 << 0;
        /// A graphical component is present
        const GRAPHICAL = 1 << 1;
        /// A physics component is present
        const PHYSICS = 1 << 2;
    }
}

impl ComponentMask {
    /// Bit for `system_type` (empty for `Custom`)
    pub const fn bit(system_type: SystemType) -> Self {
        match system_type {
            SystemType::Transform => Self::TRANSFORM,
            SystemType::Graphical => Self::GRAPHICAL,
            SystemType::Physics => Self::PHYSICS,
            SystemType::Custom => Self::empty(),
        }
    }

    /// Mark `system_type` as present. No-op for `Custom`.
    pub fn add_system(&mut self, system_type: SystemType) {
        self.insert(Self::bit(system_type));
    }

    /// Whether `system_type` is present. Always `false` for `Custom`.
    pub const fn check_system(&self, system_type: SystemType) -> bool {
        let bit = Self::bit(system_type);
        !bit.is_empty() && self.contains(bit)
    }

    /// Mark `system_type` as absent
    pub fn remove_system(&mut self, system_type: SystemType) {
        self.remove(Self::bit(system_type));
    }
}

impl Default for ComponentMask {
    fn default() -> Self {
        Self::empty()
    }
}
