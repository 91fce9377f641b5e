//! GameVM compiler CLI.

use gvc::commands::{build_file, check_file, list_targets, parse_build_options, BuildOptions};

fn main() {
    gvc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "build" => {
            if args.len() < 3 {
                eprintln!("Usage: gvc build <file.pas> [options]");
                eprintln!();
                print_build_options();
                std::process::exit(1);
            }
            build_file(&args[2], &options_or_exit(&args[3..]));
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: gvc check <file.pas> [options]");
                std::process::exit(1);
            }
            check_file(&args[2], &options_or_exit(&args[3..]));
        }
        "targets" => list_targets(),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("gvc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn options_or_exit(args: &[String]) -> BuildOptions {
    match parse_build_options(args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("GameVM compiler");
    println!();
    println!("Usage: gvc <command> [options]");
    println!();
    println!("Commands:");
    println!("  build <file.pas>     Compile to a ROM image (or an IR dump with --emit)");
    println!("  check <file.pas>     Parse and validate capabilities only");
    println!("  targets              List target families and backend profiles");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    print_build_options();
    println!();
    println!("Environment:");
    println!("  RUST_LOG=<filter>    Enable logging (e.g. gvc=debug,gv_opt=trace)");
    println!("  GVC_LOG_TREE=1       Hierarchical log output");
    println!();
    println!("Examples:");
    println!("  gvc build pong.pas                       # writes pong.bin");
    println!("  gvc build pong.pas --opt=full -o pong.a26");
    println!("  gvc build pong.pas --emit=asm --debug    # listing with jumps");
    println!("  gvc check fx.pas --enforce=advisory");
}

fn print_build_options() {
    println!("Build/check options:");
    println!("  --target=<id>        Target family (default: atari2600)");
    println!("  --profile=L<n>       Requested capability tier (default: L1)");
    println!("  --enforce=<mode>     strict (default) or advisory");
    println!("  --ext=<id>           Request an extension (repeatable)");
    println!("  --opt=<level>        none (default), basic, aggressive, full");
    println!("  --debug              Keep jumps as comments in the listing");
    println!("  --dispatch=<kind>    direct, token, subroutine, native");
    println!("  --emit=<type>        hlir, mlir, llir, asm, rom (default)");
    println!("  -o <path>            Output file");
    println!("  --project=<path>     Project file (default: gamevm.json beside the source)");
}
