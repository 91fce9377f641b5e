use gv_ir::CapabilityProfile;

/// A backend's capability advertisement.
///
/// Implementors must be shareable across threads so one compiler can serve
/// concurrent compilations.
pub trait CapabilityProvider: Send + Sync {
    /// Base tier, extensions and injected tiers of the backend.
    fn capability_profile(&self) -> CapabilityProfile;

    /// Extension ids the backend grants. Defaults to the profile's list.
    fn supported_extensions(&self) -> Vec<String> {
        self.capability_profile().extensions
    }
}
