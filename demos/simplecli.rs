#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::{fmt::Display, path::PathBuf};

use clap::{Parser, ValueEnum};
use dither4444::{classify_path, AssetClass, Classification, TextureImportPipeline};

#[derive(Copy, Clone, ValueEnum)]
enum CliClass {
    Dither16,
    Plain16,
    Compressed,
}

impl From<CliClass> for AssetClass {
    fn from(value: CliClass) -> Self {
        match value {
            CliClass::Dither16 => AssetClass::Dither16,
            CliClass::Plain16 => AssetClass::Plain16,
            CliClass::Compressed => AssetClass::Compressed,
        }
    }
}

impl Display for CliClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CliClass::Dither16 => "dither16",
                CliClass::Plain16 => "plain16",
                CliClass::Compressed => "compressed",
            }
        )
    }
}

#[derive(Parser)]
struct Options {
    /// Derive the class from the input path instead of --class.
    #[arg(long)]
    classify: bool,

    #[arg(long, default_value_t = CliClass::Dither16)]
    class: CliClass,

    #[arg(long)]
    verbose: bool,

    input: PathBuf,

    output: PathBuf,
}

fn main() {
    let Options { classify, class, verbose, input, output } = Options::parse();

    macro_rules! log {
        ($name: literal, $val: expr) => {
            if verbose {
                let time = std::time::Instant::now();
                let value = $val;
                println!("{} took {}ms", $name, time.elapsed().as_millis());
                value
            } else {
                $val
            }
        };
    }

    let class = if classify {
        match classify_path(&input) {
            Classification::Class(class) => class,
            Classification::UnrecognizedDirectory => {
                eprintln!("warning: {} is not in a recognized class directory", input.display());
                class.into()
            }
            Classification::OutsideRoot => {
                eprintln!("warning: {} is outside the asset root", input.display());
                class.into()
            }
        }
    } else {
        class.into()
    };

    let image = log!("read image", image::open(&input).unwrap().into_rgba8());

    let pipeline = TextureImportPipeline::from_rgba_image(&image, class);
    let image = log!("dither and requantize", pipeline.quantized_rgba_image());

    log!("write image", image.save(output).unwrap())
}
