//! The `check` command: parse and validate capabilities without generating
//! code.

use std::path::Path;

use super::{print_warnings, read_file, BuildOptions};
use crate::compiler::extension_of;
use crate::Compiler;

/// Check a file. Exits the process on failure.
pub fn check_file(path: &str, build: &BuildOptions) {
    let options = match build.compile_options(Path::new(path)) {
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
    let source = match read_file(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let extension = extension_of(Path::new(path));

    let result = compiler.check(&source, path, &extension, &options);
    print_warnings(&result.warnings);
    if !result.success {
        super::fail(&result);
    }
    println!(
        "OK: {path} ({}, {}, {} warning(s))",
        result.target,
        result.tier,
        result.warnings.len()
    );
}
