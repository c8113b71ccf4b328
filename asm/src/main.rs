use std::path::Path;
use std::process::ExitCode;

use color_print::cprintln;

use armasm::{assemble_with, collect_labels, dump};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.s")]
    input: String,

    /// Output file (defaults to the input with a .bin extension)
    #[clap(short, long)]
    output: Option<String>,

    /// Dump the assembled listing
    #[clap(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    let output = args.output.clone().unwrap_or_else(|| {
        Path::new(&args.input)
            .with_extension("bin")
            .to_string_lossy()
            .into_owned()
    });

    let src = match std::fs::read_to_string(&args.input) {
        Ok(src) => src,
        Err(e) => {
            cprintln!("<red,bold>error</>: failed to read `{}`: {}", args.input, e);
            return ExitCode::FAILURE;
        }
    };

    let labels = match collect_labels(&src) {
        Ok(labels) => labels,
        Err(e) => {
            e.print_diag(&args.input);
            return ExitCode::FAILURE;
        }
    };

    // Assemble into memory first so a pass-2 error leaves no partial
    // file behind.
    let mut image: Vec<u8> = Vec::new();
    if let Err(e) = assemble_with(&src, &labels, &mut image) {
        e.print_diag(&args.input);
        return ExitCode::FAILURE;
    }

    if let Err(e) = std::fs::write(&output, &image) {
        cprintln!("<red,bold>error</>: failed to write `{}`: {}", output, e);
        return ExitCode::FAILURE;
    }
    println!("  > {}", output);

    if args.dump {
        // Encoding already succeeded, the listing cannot fail.
        let _ = dump(&src, &labels);
    }
    ExitCode::SUCCESS
}
