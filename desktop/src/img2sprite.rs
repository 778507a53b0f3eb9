use std::io::Write;
use std::process::ExitCode;

use argh::FromArgs;
use log::{debug, info};
use sprite_core::{
    AccessError, Dimensions, Error, SpriteLiteral,
    image::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
    loader,
};

use crate::std_fs::StdFile;

mod std_fs;

#[derive(FromArgs)]
/// Convert a raw RGB888 image into an RGB565 sprite array literal
struct Args {
    /// raw RGB input file, width * height * 3 bytes
    #[argh(positional)]
    input: Option<String>,

    /// image width in pixels
    #[argh(option, short = 'w', default = "DEFAULT_WIDTH")]
    width: usize,

    /// image height in pixels
    #[argh(option, short = 'H', default = "DEFAULT_HEIGHT")]
    height: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = argh::from_env();

    let literal = match convert(&args) {
        Ok(literal) => literal,
        Err(err) => {
            eprintln!("img2sprite: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match writeln!(stdout, "{literal}").and_then(|()| stdout.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("Failed to write literal: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Loads, validates and packs the input, returning the finished literal.
fn convert(args: &Args) -> Result<String, Error> {
    let path = args.input.as_deref().ok_or(AccessError::MissingArgument)?;
    let dimensions = Dimensions::new(args.width, args.height)?;

    let image = {
        let mut file = StdFile::open(path)?;
        debug!("Expecting {} bytes, file has {}", dimensions.byte_len(), file.size());
        loader::load_image(&mut file, dimensions)?
    };

    let packed = image.pack();
    let size = image.dimensions();
    info!(
        "Packed {} pixels of a {}x{} sprite",
        packed.len(),
        size.width(),
        size.height()
    );
    Ok(SpriteLiteral(&packed).to_string())
}
