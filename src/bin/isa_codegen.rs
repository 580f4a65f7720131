//! Standalone entry point that loads a spec directory, reports what was
//! assembled, and optionally emits generated Rust fragments.
//!
//! Usage: `isa_codegen <spec-dir> [output-dir]`. Without an output directory
//! the model is loaded and summarized only, which is useful for checking a
//! spec edit for dropped rows.

use std::env;
use std::path::PathBuf;
use std::process;

use rvmeta::generate::generate_fragments;
use rvmeta::loader::IsaLoader;

fn main() {
    let mut args = env::args().skip(1);
    let Some(spec_dir) = args.next().map(PathBuf::from) else {
        eprintln!("usage: isa_codegen <spec-dir> [output-dir]");
        process::exit(2);
    };
    let output_dir = args.next().map(PathBuf::from);

    let mut loader = IsaLoader::new(&spec_dir);
    let model = match loader.load_model() {
        Ok(model) => model,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    for diagnostic in loader.diagnostics() {
        eprintln!("{diagnostic}");
    }

    println!(
        "{}: {} major opcodes, {} codecs, {} operands, {} operations, {} expansions",
        spec_dir.display(),
        model.major_opcodes.len(),
        model.codecs.len(),
        model.operands.len(),
        model.operations.len(),
        model.expansions.len(),
    );

    if let Some(output_dir) = output_dir {
        if let Err(err) = generate_fragments(&output_dir, &model) {
            eprintln!("{err}");
            process::exit(1);
        }
        println!("wrote fragments to {}", output_dir.display());
    }
}
