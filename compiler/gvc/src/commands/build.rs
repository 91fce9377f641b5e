//! The `build` command: compile a source file to a ROM image or an IR dump.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gv_ir::{CapabilityTier, CompileOptions, DispatchStrategy, Enforcement, OptLevel, TargetArch};

use crate::compiler::extension_of;
use crate::config::{ConfigError, ProjectConfig, PROJECT_FILE};
use crate::{Artifacts, Compiler};

/// What `build` writes out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EmitType {
    Hlir,
    Mlir,
    Llir,
    /// Final IR assembly listing.
    Asm,
    /// Cartridge image.
    #[default]
    Rom,
}

impl FromStr for EmitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hlir" => Ok(EmitType::Hlir),
            "mlir" => Ok(EmitType::Mlir),
            "llir" => Ok(EmitType::Llir),
            "asm" => Ok(EmitType::Asm),
            "rom" | "bin" => Ok(EmitType::Rom),
            _ => Err(format!(
                "unknown emit type '{s}' (expected hlir, mlir, llir, asm, rom)"
            )),
        }
    }
}

/// Options parsed from the command line.
///
/// Compile settings are `None` unless given, so they can be layered over
/// the project file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// `--target=<id>`
    pub target: Option<TargetArch>,
    /// `--profile=L<n>`
    pub profile: Option<CapabilityTier>,
    /// `--enforce=strict|advisory`
    pub enforcement: Option<Enforcement>,
    /// `--ext=<id>`, repeatable
    pub extensions: Vec<String>,
    /// `--opt=none|basic|aggressive|full`
    pub opt_level: Option<OptLevel>,
    /// `--debug`
    pub debug_info: bool,
    /// `--dispatch=<strategy>`
    pub dispatch: Option<DispatchStrategy>,
    /// `--emit=<type>`
    pub emit: EmitType,
    /// `-o <path>` / `--output=<path>`
    pub output: Option<PathBuf>,
    /// `--project=<path>`
    pub project: Option<PathBuf>,
}

/// Bad command line value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionError(pub String);

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_value<T>(value: &str) -> Result<T, OptionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| OptionError(e.to_string()))
}

/// Parse flags following `build <file>` / `check <file>`.
///
/// Unknown flags are reported and ignored; malformed values are errors.
pub fn parse_build_options(args: &[String]) -> Result<BuildOptions, OptionError> {
    let mut options = BuildOptions::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        if arg == "-o" {
            let Some(path) = args.next() else {
                return Err(OptionError("-o requires a path".to_string()));
            };
            options.output = Some(PathBuf::from(path));
        } else if let Some(output) = arg.strip_prefix("--output=") {
            options.output = Some(PathBuf::from(output));
        } else if let Some(target) = arg.strip_prefix("--target=") {
            options.target = Some(parse_value(target)?);
        } else if let Some(profile) = arg.strip_prefix("--profile=") {
            options.profile = Some(parse_value(profile)?);
        } else if let Some(mode) = arg.strip_prefix("--enforce=") {
            options.enforcement = Some(parse_value(mode)?);
        } else if let Some(ext) = arg.strip_prefix("--ext=") {
            if !ext.is_empty() && !options.extensions.iter().any(|e| e == ext) {
                options.extensions.push(ext.to_string());
            }
        } else if let Some(level) = arg.strip_prefix("--opt=") {
            options.opt_level = Some(parse_value(level)?);
        } else if arg == "--debug" {
            options.debug_info = true;
        } else if let Some(strategy) = arg.strip_prefix("--dispatch=") {
            options.dispatch = Some(parse_value(strategy)?);
        } else if let Some(emit) = arg.strip_prefix("--emit=") {
            options.emit = parse_value(emit)?;
        } else if let Some(project) = arg.strip_prefix("--project=") {
            options.project = Some(PathBuf::from(project));
        } else {
            eprintln!("warning: ignoring unknown option '{arg}'");
        }
    }

    Ok(options)
}

impl BuildOptions {
    /// Defaults, then the project file, then these flags.
    ///
    /// The project file is `--project`, else `gamevm.json` next to
    /// `source` if one exists.
    pub fn compile_options(&self, source: &Path) -> Result<CompileOptions, ConfigError> {
        let mut options = CompileOptions::default();

        let project = self.project.clone().or_else(|| {
            let candidate = source.with_file_name(PROJECT_FILE);
            candidate.is_file().then_some(candidate)
        });
        if let Some(project) = project {
            ProjectConfig::load(project)?.apply(&mut options)?;
        }

        self.apply(&mut options);
        Ok(options)
    }

    fn apply(&self, options: &mut CompileOptions) {
        if let Some(target) = self.target {
            options.target = target;
        }
        if let Some(tier) = self.profile {
            options.tier = tier;
        }
        if let Some(enforcement) = self.enforcement {
            options.enforcement = enforcement;
        }
        for ext in &self.extensions {
            if !options.extensions.contains(ext) {
                options.extensions.push(ext.clone());
            }
        }
        if let Some(level) = self.opt_level {
            options.optimize = level > OptLevel::None;
            options.opt_level = level;
        }
        if self.debug_info {
            options.debug_info = true;
        }
        if let Some(dispatch) = self.dispatch {
            options.dispatch = dispatch;
        }
    }

    /// Where a ROM goes when `-o` is absent: the source path with `.bin`.
    pub fn rom_path(&self, source: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| source.with_extension("bin"))
    }
}

/// Text of the requested IR dump.
pub fn render_emit(artifacts: &Artifacts, emit: EmitType) -> Option<String> {
    match emit {
        EmitType::Hlir => Some(artifacts.hlir.to_string()),
        EmitType::Mlir => Some(artifacts.mlir.to_string()),
        EmitType::Llir => Some(artifacts.llir.to_string()),
        EmitType::Asm => Some(artifacts.final_ir.to_string()),
        EmitType::Rom => None,
    }
}

/// Run the `build` command. Exits the process on failure.
pub fn build_file(path: &str, build: &BuildOptions) {
    let source = Path::new(path);
    let options = match build.compile_options(source) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let compiler = match Compiler::for_target(options.target) {
        Ok(compiler) => compiler,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if build.emit == EmitType::Rom {
        let result = compiler.compile_file(source, &options);
        super::print_warnings(&result.warnings);
        if !result.success {
            super::fail(&result);
        }
        let out = build.rom_path(source);
        if let Err(e) = std::fs::write(&out, &result.code) {
            eprintln!("error: cannot write '{}': {e}", out.display());
            std::process::exit(1);
        }
        println!(
            "Built {} ({} bytes, {}, {})",
            out.display(),
            result.code.len(),
            result.target,
            result.tier
        );
        return;
    }

    let text = match super::read_file(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let extension = extension_of(source);

    let mut warnings = Vec::new();
    let built = compiler.build_ir(&text, path, &extension, &options, &mut warnings);
    super::print_warnings(&warnings);
    let artifacts = match built {
        Ok(artifacts) => artifacts,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let Some(dump) = render_emit(&artifacts, build.emit) else {
        return;
    };
    match &build.output {
        Some(out) => {
            if let Err(e) = std::fs::write(out, dump) {
                eprintln!("error: cannot write '{}': {e}", out.display());
                std::process::exit(1);
            }
        }
        None => print!("{dump}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_every_flag() {
        let parsed = parse_build_options(&args(&[
            "--target=atari2600",
            "--profile=L3",
            "--enforce=advisory",
            "--ext=Ext.Math.Fast",
            "--ext=Ext.Snd.Polyphonic",
            "--ext=Ext.Math.Fast",
            "--opt=aggressive",
            "--debug",
            "--dispatch=token",
            "--emit=asm",
            "-o",
            "out.s",
            "--project=game.json",
        ]))
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(
            parsed,
            BuildOptions {
                target: Some(TargetArch::Atari2600),
                profile: Some(CapabilityTier::L3),
                enforcement: Some(Enforcement::Advisory),
                extensions: vec!["Ext.Math.Fast".to_string(), "Ext.Snd.Polyphonic".to_string()],
                opt_level: Some(OptLevel::Aggressive),
                debug_info: true,
                dispatch: Some(DispatchStrategy::TokenThreaded),
                emit: EmitType::Asm,
                output: Some(PathBuf::from("out.s")),
                project: Some(PathBuf::from("game.json")),
            }
        );
    }

    #[test]
    fn bad_values_are_errors() {
        let err = parse_build_options(&args(&["--profile=L8"]));
        assert!(err.is_err());
        let err = parse_build_options(&args(&["--target=c64"]));
        assert_eq!(err, Err(OptionError("unknown target 'c64'".to_string())));
        let err = parse_build_options(&args(&["-o"]));
        assert!(err.is_err());
        let err = parse_build_options(&args(&["--emit=elf"]));
        assert!(err.is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let build = BuildOptions {
            profile: Some(CapabilityTier::L2),
            opt_level: Some(OptLevel::None),
            ..BuildOptions::default()
        };
        let options = build
            .compile_options(Path::new("/nonexistent/dir/main.pas"))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(options.tier, CapabilityTier::L2);
        assert!(!options.optimize);
    }

    #[test]
    fn rom_path_defaults_next_to_source() {
        let build = BuildOptions::default();
        assert_eq!(
            build.rom_path(Path::new("games/pong.pas")),
            PathBuf::from("games/pong.bin")
        );
    }
}
