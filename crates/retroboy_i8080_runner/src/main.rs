use anyhow::{bail, Context, Result};
use retroboy_i8080_runner::{parse_number, run, RunConfig};

const USAGE: &str = "Usage: i8080-run <image> [origin] [max_steps]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next() else {
        bail!("{}", USAGE);
    };

    let origin = match args.next() {
        Some(text) => {
            let value = parse_number(&text)?;
            u16::try_from(value).with_context(|| format!("Origin {} is out of range", text))?
        }
        None => 0x0000,
    };
    let max_steps = match args.next() {
        Some(text) => parse_number(&text)?,
        None => 10_000_000,
    };

    log::info!("Running image: '{}'", image_path);
    let image = std::fs::read(&image_path)
        .with_context(|| format!("Failed to read image file '{}'", image_path))?;

    let config = RunConfig::builder()
        .origin(origin)
        .max_steps(max_steps)
        .build();
    let report = run(&config, &image)?;
    println!("{}", report);
    Ok(())
}
