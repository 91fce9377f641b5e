//! Hardware capability tiers and backend capability profiles.
//!
//! Every target advertises a base [`CapabilityTier`] plus a set of optional
//! extensions. An extension is a named hardware add-on (a coprocessor on the
//! cartridge, an expansion sound chip) that can unlock behavior of a higher
//! tier for one subsystem without raising the baseline of the whole target.
//!
//! Tiers are totally ordered: `L1 < L2 < … < L7`.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

/// Hardware capability tier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapabilityTier {
    /// Bare-metal baseline (Atari 2600, RCA Studio II).
    #[default]
    L1,
    /// Fixed display and multi-channel IO (Atari 7800, ColecoVision).
    L2,
    /// Scrolling and dynamic viewports (NES, Master System, Atari 5200).
    L3,
    /// Multi-layer graphics and FM synthesis (Genesis, TurboGrafx-16).
    L4,
    /// Affine transformation and PCM audio (SNES, Neo Geo).
    L5,
    /// Geometric pipeline and media streaming (PS1, Saturn).
    L6,
    /// Filtered pipeline and vector precision (N64).
    L7,
}

impl CapabilityTier {
    /// All tiers in ascending order.
    pub const ALL: [CapabilityTier; 7] = [
        CapabilityTier::L1,
        CapabilityTier::L2,
        CapabilityTier::L3,
        CapabilityTier::L4,
        CapabilityTier::L5,
        CapabilityTier::L6,
        CapabilityTier::L7,
    ];

    /// One-based tier number (`L3` → 3).
    pub const fn number(self) -> u8 {
        match self {
            CapabilityTier::L1 => 1,
            CapabilityTier::L2 => 2,
            CapabilityTier::L3 => 3,
            CapabilityTier::L4 => 4,
            CapabilityTier::L5 => 5,
            CapabilityTier::L6 => 6,
            CapabilityTier::L7 => 7,
        }
    }
}

impl fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.number())
    }
}

/// Error returned when a tier name is not `L1`..`L7`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTierError(pub String);

impl fmt::Display for ParseTierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown capability tier '{}' (expected L1..L7)", self.0)
    }
}

impl std::error::Error for ParseTierError {}

impl FromStr for CapabilityTier {
    type Err = ParseTierError;

    /// Accepts `L3`, `l3`, and the project-file spelling `GV.Spec.L3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let short = trimmed.strip_prefix("GV.Spec.").unwrap_or(trimmed);
        let digits = short
            .strip_prefix('L')
            .or_else(|| short.strip_prefix('l'))
            .ok_or_else(|| ParseTierError(s.to_string()))?;
        match digits {
            "1" => Ok(CapabilityTier::L1),
            "2" => Ok(CapabilityTier::L2),
            "3" => Ok(CapabilityTier::L3),
            "4" => Ok(CapabilityTier::L4),
            "5" => Ok(CapabilityTier::L5),
            "6" => Ok(CapabilityTier::L6),
            "7" => Ok(CapabilityTier::L7),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

/// What a backend can do: base tier, extensions, and per-extension injected tiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapabilityProfile {
    /// Tier every part of the target satisfies.
    pub base: CapabilityTier,
    /// Supported extension ids, in declaration order.
    pub extensions: Vec<String>,
    /// Tier an extension raises its subsystem to.
    pub injected: FxHashMap<String, CapabilityTier>,
}

impl CapabilityProfile {
    /// Profile with a base tier and no extensions.
    pub fn new(base: CapabilityTier) -> Self {
        CapabilityProfile {
            base,
            extensions: Vec::new(),
            injected: FxHashMap::default(),
        }
    }

    /// Add an extension that injects `tier` into its subsystem.
    #[must_use]
    pub fn with_extension(mut self, id: impl Into<String>, tier: CapabilityTier) -> Self {
        let id = id.into();
        if !self.supports(&id) {
            self.extensions.push(id.clone());
        }
        self.injected.insert(id, tier);
        self
    }

    /// Whether `id` is one of the advertised extensions.
    pub fn supports(&self, id: &str) -> bool {
        self.extensions.iter().any(|ext| ext == id)
    }

    /// Tier injected by extension `id`, if the profile has one.
    pub fn injected_tier(&self, id: &str) -> Option<CapabilityTier> {
        self.injected.get(id).copied()
    }
}

impl fmt::Display for CapabilityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for ext in &self.extensions {
            match self.injected_tier(ext) {
                Some(tier) => write!(f, " +{ext}@{tier}")?,
                None => write!(f, " +{ext}")?,
            }
        }
        Ok(())
    }
}
