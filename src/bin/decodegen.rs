//! Reads an instruction-set description from stdin and writes the generated decode tables to
//! stdout. Diagnostics go to stderr; set `RUST_LOG` to adjust their verbosity.
//!
//! ```text
//! decodegen < instr_dict.json > instructions.zig
//! ```

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use decodegen::{
    CompilerConfig, DuplicatePolicy, StrayBitsPolicy, TableCompiler, TargetKind,
    UnknownLayoutPolicy,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Language of the generated source.
    #[arg(long, value_enum, env = "DECODEGEN_TARGET", default_value_t = TargetKind::Zig)]
    target: TargetKind,

    /// Handling of instructions that share a mask and match value.
    #[arg(long, value_enum, env = "DECODEGEN_DUPLICATES", default_value_t = DuplicatePolicy::Reject)]
    duplicates: DuplicatePolicy,

    /// Handling of match bits that lie outside the mask.
    #[arg(long, value_enum, env = "DECODEGEN_STRAY_BITS", default_value_t = StrayBitsPolicy::Reject)]
    stray_bits: StrayBitsPolicy,

    /// Handling of instructions without a canonical layout.
    #[arg(long, value_enum, env = "DECODEGEN_UNKNOWN_LAYOUT", default_value_t = UnknownLayoutPolicy::Keep)]
    unknown_layout: UnknownLayoutPolicy,
}

impl Cli {
    fn config(&self) -> CompilerConfig {
        CompilerConfig::new()
            .with_target(self.target)
            .with_duplicates(self.duplicates)
            .with_stray_bits(self.stray_bits)
            .with_unknown_layout(self.unknown_layout)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let compiler = TableCompiler::new(cli.config());
    let compiled = match compiler.compile_reader(io::stdin().lock()) {
        Ok(compiled) => compiled,
        Err(err) => {
            eprintln!("decodegen: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(compiled.source.as_bytes())
        .and_then(|_| stdout.flush())
    {
        eprintln!("decodegen: failed to write output: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
