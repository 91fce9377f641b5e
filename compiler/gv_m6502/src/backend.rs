use gv_capability::CapabilityProvider;
use gv_ir::{CapabilityProfile, CapabilityTier, TargetArch};

/// The Atari 2600 target: a plain 6502 (L1) with two software extensions.
///
/// | Extension | Injected tier |
/// |---|---|
/// | `Ext.Math.Fast` | L3 |
/// | `Ext.Snd.Polyphonic` | L4 |
#[derive(Copy, Clone, Debug, Default)]
pub struct Atari2600;

impl Atari2600 {
    pub const TARGET: TargetArch = TargetArch::Atari2600;

    pub fn profile() -> CapabilityProfile {
        CapabilityProfile::new(CapabilityTier::L1)
            .with_extension("Ext.Math.Fast", CapabilityTier::L3)
            .with_extension("Ext.Snd.Polyphonic", CapabilityTier::L4)
    }
}

impl CapabilityProvider for Atari2600 {
    fn capability_profile(&self) -> CapabilityProfile {
        Self::profile()
    }
}
