use anyhow::{Context, Result};
use retroboy_i8080::{Cpu8080, FlatMemory, Machine, RunOutcome};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, TypedBuilder)]
pub struct RunConfig {
    /// Address the image is copied to.
    #[builder(default = 0x0000)]
    pub origin: u16,
    /// Reset PC. Falls back to `origin`.
    #[builder(default, setter(strip_option))]
    pub entry: Option<u16>,
    #[builder(default = 10_000_000)]
    pub max_steps: u64,
    /// Stop as soon as PC leaves the loaded image.
    #[builder(default = true)]
    pub stop_outside_image: bool,
}

impl RunConfig {
    pub fn entry_point(&self) -> u16 {
        self.entry.unwrap_or(self.origin)
    }
}

/// Final state of a run.
#[derive(Clone, Debug)]
pub struct Report {
    pub outcome: RunOutcome,
    pub steps: u64,
    pub cpu: Cpu8080,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?} after {} steps", self.outcome, self.steps)?;
        write!(f, "{}", self.cpu)
    }
}

/// Load `image` into a fresh 64 KiB memory and run it.
pub fn run(config: &RunConfig, image: &[u8]) -> Result<Report> {
    let memory = FlatMemory::with_image(config.origin, image)
        .with_context(|| format!("Failed to load image at {:04X}h", config.origin))?;

    let entry = config.entry_point();
    log::info!(
        "Loaded {} bytes at {:04X}h, entry {:04X}h",
        image.len(),
        config.origin,
        entry
    );

    let start = config.origin as usize;
    let end = start + image.len();
    let check_bounds = config.stop_outside_image;

    let mut machine = Machine::new(entry, memory);
    let (outcome, steps) = machine.run(config.max_steps, |cpu| {
        let pc = cpu.regs.pc as usize;
        check_bounds && !(start..end).contains(&pc)
    });

    let cpu = *machine.cpu();
    log::info!("{:?} after {} steps at PC={:04X}h", outcome, steps, cpu.regs.pc);

    Ok(Report {
        outcome,
        steps,
        cpu,
    })
}

/// Parse a decimal number or a `0x`-prefixed hexadecimal one.
pub fn parse_number(text: &str) -> Result<u64> {
    let value = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    value.with_context(|| format!("Invalid number '{}'", text))
}
