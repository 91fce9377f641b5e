//! Compilation options shared by every stage.

use std::fmt;
use std::str::FromStr;

use crate::capability::CapabilityTier;

/// Target hardware family.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TargetArch {
    Genesis,
    Nes,
    Snes,
    Gba,
    N64,
    #[default]
    Atari2600,
}

impl TargetArch {
    pub const ALL: [TargetArch; 6] = [
        TargetArch::Genesis,
        TargetArch::Nes,
        TargetArch::Snes,
        TargetArch::Gba,
        TargetArch::N64,
        TargetArch::Atari2600,
    ];

    /// Lowercase identifier used on the command line and in project files.
    pub const fn id(self) -> &'static str {
        match self {
            TargetArch::Genesis => "genesis",
            TargetArch::Nes => "nes",
            TargetArch::Snes => "snes",
            TargetArch::Gba => "gba",
            TargetArch::N64 => "n64",
            TargetArch::Atari2600 => "atari2600",
        }
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How capability violations are treated.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Enforcement {
    /// Any violation fails compilation.
    #[default]
    Strict,
    /// Violations are reported as warnings; compilation continues.
    Advisory,
}

impl fmt::Display for Enforcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enforcement::Strict => f.write_str("strict"),
            Enforcement::Advisory => f.write_str("advisory"),
        }
    }
}

/// Optimization level. Each level includes everything below it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptLevel {
    /// Passes copy their input verbatim.
    #[default]
    None,
    Basic,
    Aggressive,
    Full,
}

impl fmt::Display for OptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptLevel::None => f.write_str("none"),
            OptLevel::Basic => f.write_str("basic"),
            OptLevel::Aggressive => f.write_str("aggressive"),
            OptLevel::Full => f.write_str("full"),
        }
    }
}

/// Runtime dispatch model for generated code. Carried through to code
/// generation untouched.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DispatchStrategy {
    #[default]
    DirectThreaded,
    TokenThreaded,
    SubroutineThreaded,
    Native,
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchStrategy::DirectThreaded => f.write_str("direct-threaded"),
            DispatchStrategy::TokenThreaded => f.write_str("token-threaded"),
            DispatchStrategy::SubroutineThreaded => f.write_str("subroutine-threaded"),
            DispatchStrategy::Native => f.write_str("native"),
        }
    }
}

/// Error for an option value that does not name a known variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownOption {}

fn unknown(kind: &'static str, value: &str) -> UnknownOption {
    UnknownOption {
        kind,
        value: value.to_string(),
    }
}

impl FromStr for TargetArch {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TargetArch::ALL
            .into_iter()
            .find(|arch| arch.id() == lower || (lower == "2600" && *arch == TargetArch::Atari2600))
            .ok_or_else(|| unknown("target", s))
    }
}

impl FromStr for Enforcement {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Enforcement::Strict),
            "advisory" => Ok(Enforcement::Advisory),
            _ => Err(unknown("enforcement mode", s)),
        }
    }
}

impl FromStr for OptLevel {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(OptLevel::None),
            "basic" | "1" => Ok(OptLevel::Basic),
            "aggressive" | "2" => Ok(OptLevel::Aggressive),
            "full" | "3" => Ok(OptLevel::Full),
            _ => Err(unknown("optimization level", s)),
        }
    }
}

impl FromStr for DispatchStrategy {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "direct-threaded" => Ok(DispatchStrategy::DirectThreaded),
            "token" | "token-threaded" => Ok(DispatchStrategy::TokenThreaded),
            "subroutine" | "subroutine-threaded" => Ok(DispatchStrategy::SubroutineThreaded),
            "native" => Ok(DispatchStrategy::Native),
            _ => Err(unknown("dispatch strategy", s)),
        }
    }
}

/// Everything the orchestrator needs to know about one compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub target: TargetArch,
    /// Tier the project asks for. Checked against the backend's base tier.
    pub tier: CapabilityTier,
    pub enforcement: Enforcement,
    /// Extensions the project asks for. Checked against the backend's list.
    pub extensions: Vec<String>,
    /// Run the optimizer stages at all.
    pub optimize: bool,
    pub opt_level: OptLevel,
    pub debug_info: bool,
    pub dispatch: DispatchStrategy,
}

impl CompileOptions {
    /// Level the optimizer stages should run at (`None` when disabled).
    pub fn effective_opt_level(&self) -> OptLevel {
        if self.optimize {
            self.opt_level
        } else {
            OptLevel::None
        }
    }

    /// The subset of options the code generator sees.
    pub fn codegen(&self) -> CodeGenOptions {
        CodeGenOptions {
            target: self.target,
            dispatch: self.dispatch,
            debug_info: self.debug_info,
            optimize: self.optimize,
        }
    }
}

/// Options for the low→final transform and the code generator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeGenOptions {
    pub target: TargetArch,
    pub dispatch: DispatchStrategy,
    pub debug_info: bool,
    pub optimize: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opt_levels_are_ordered() {
        assert!(OptLevel::None < OptLevel::Basic);
        assert!(OptLevel::Basic < OptLevel::Aggressive);
        assert!(OptLevel::Aggressive < OptLevel::Full);
    }

    #[test]
    fn parse_targets_case_insensitively() {
        assert_eq!("Atari2600".parse(), Ok(TargetArch::Atari2600));
        assert_eq!("2600".parse(), Ok(TargetArch::Atari2600));
        assert_eq!("NES".parse(), Ok(TargetArch::Nes));
        assert_eq!(
            "c64".parse::<TargetArch>(),
            Err(UnknownOption {
                kind: "target",
                value: "c64".to_string()
            })
        );
    }

    #[test]
    fn parse_levels_and_modes() {
        assert_eq!("aggressive".parse(), Ok(OptLevel::Aggressive));
        assert_eq!("2".parse(), Ok(OptLevel::Aggressive));
        assert_eq!("Advisory".parse(), Ok(Enforcement::Advisory));
        assert_eq!("token".parse(), Ok(DispatchStrategy::TokenThreaded));
        assert!("fastest".parse::<OptLevel>().is_err());
    }

    #[test]
    fn disabled_optimizer_runs_at_none() {
        let options = CompileOptions {
            optimize: false,
            opt_level: OptLevel::Full,
            ..CompileOptions::default()
        };
        assert_eq!(options.effective_opt_level(), OptLevel::None);

        let options = CompileOptions {
            optimize: true,
            ..options
        };
        assert_eq!(options.effective_opt_level(), OptLevel::Full);
    }

    #[test]
    fn codegen_options_follow_compile_options() {
        let options = CompileOptions {
            debug_info: true,
            dispatch: DispatchStrategy::Native,
            ..CompileOptions::default()
        };
        let codegen = options.codegen();
        assert!(codegen.debug_info);
        assert_eq!(codegen.dispatch, DispatchStrategy::Native);
        assert_eq!(codegen.target, TargetArch::Atari2600);
    }
}
