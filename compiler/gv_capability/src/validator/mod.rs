use gv_ir::{CapabilityProfile, CapabilityTier, CompileOptions, HlProgram};
use tracing::debug;

/// The allow rule for one base tier and granted extension set.
///
/// A requirement is met when the base tier is at least the required tier,
/// or when the requirement names an extension that is granted. An empty
/// extension name counts as no extension. Injected tiers are not consulted:
/// granting the extension is enough.
#[derive(Clone, Debug)]
pub struct CapabilityValidator<'a> {
    base: CapabilityTier,
    granted: &'a [String],
}

impl<'a> CapabilityValidator<'a> {
    pub fn new(base: CapabilityTier, granted: &'a [String]) -> Self {
        CapabilityValidator { base, granted }
    }

    pub fn is_allowed(&self, required: CapabilityTier, required_extension: Option<&str>) -> bool {
        if self.base >= required {
            return true;
        }
        match required_extension {
            Some(ext) if !ext.is_empty() => self.granted.iter().any(|g| g == ext),
            _ => false,
        }
    }
}

/// Check every function of `program`; one message per disallowed function,
/// in declaration order.
#[tracing::instrument(level = "debug", skip_all, fields(base = %base, granted = granted.len()))]
pub fn validate(program: &HlProgram, base: CapabilityTier, granted: &[String]) -> Vec<String> {
    let validator = CapabilityValidator::new(base, granted);
    let violations: Vec<String> = program
        .functions()
        .filter(|f| !validator.is_allowed(f.required_tier, f.required_extension.as_deref()))
        .map(|f| format!("Function '{}' requires {}", f.name, f.required_tier))
        .collect();
    debug!(count = violations.len(), "capability validation complete");
    violations
}

/// Check what the project asks for against what the backend offers.
pub fn check_request(options: &CompileOptions, profile: &CapabilityProfile) -> Vec<String> {
    let mut violations = Vec::new();
    if options.tier > profile.base {
        violations.push(format!(
            "Requested profile {} exceeds backend base capability {}",
            options.tier, profile.base
        ));
    }
    for ext in &options.extensions {
        if !profile.supports(ext) {
            violations.push(format!("Backend does not support extension '{ext}'"));
        }
    }
    violations
}
