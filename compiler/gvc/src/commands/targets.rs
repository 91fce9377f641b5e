//! The `targets` command: list target families and their backends.

use gv_ir::TargetArch;

use crate::Compiler;

pub fn list_targets() {
    println!("Targets:");
    println!();
    for target in TargetArch::ALL {
        match Compiler::for_target(target) {
            Ok(compiler) => {
                let profile = compiler.capability_profile();
                println!("  {:<10} {profile}", target.id());
            }
            Err(_) => println!("  {:<10} (no backend)", target.id()),
        }
    }
}
