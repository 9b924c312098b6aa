use std::fmt;
use std::ops::{Index, IndexMut, Range};

use crate::cpu::Bus8080;
use crate::{ADDRESS_SPACE, NUM_PORTS};

/// Error returned when a program image does not fit in the address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadError {
    pub origin: u16,
    pub len: usize,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "image of {} bytes does not fit at {:04X}h ({} bytes available)",
            self.len,
            self.origin,
            ADDRESS_SPACE - self.origin as usize
        )
    }
}

impl std::error::Error for LoadError {}

/// Flat 64 KiB RAM with optional IO port latches.
///
/// Input ports answer only after a value has been set with
/// [`FlatMemory::set_input`]; output ports remember the last byte written.
pub struct FlatMemory {
    ram: Box<[u8; ADDRESS_SPACE]>,
    inputs: [Option<u8>; NUM_PORTS],
    outputs: [u8; NUM_PORTS],
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self {
            ram: Box::new([0; ADDRESS_SPACE]),
            inputs: [None; NUM_PORTS],
            outputs: [0; NUM_PORTS],
        }
    }
}

impl FlatMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a memory with `image` copied to `origin`.
    pub fn with_image(origin: u16, image: &[u8]) -> Result<Self, LoadError> {
        let mut memory = Self::new();
        memory.load(origin, image)?;
        Ok(memory)
    }

    /// Copy `image` into memory starting at `origin`.
    ///
    /// The image must fit below the top of the address space; it is never
    /// wrapped around to address 0.
    pub fn load(&mut self, origin: u16, image: &[u8]) -> Result<(), LoadError> {
        let start = origin as usize;
        let end = start + image.len();
        if end > ADDRESS_SPACE {
            return Err(LoadError {
                origin,
                len: image.len(),
            });
        }
        self.ram[start..end].copy_from_slice(image);
        Ok(())
    }

    /// Make `IN port` return `value` from now on.
    pub fn set_input(&mut self, port: u8, value: u8) {
        self.inputs[port as usize] = Some(value);
    }

    /// Disconnect an input port again.
    pub fn clear_input(&mut self, port: u8) {
        self.inputs[port as usize] = None;
    }

    /// Last value written to `port` by `OUT`.
    pub fn output(&self, port: u8) -> u8 {
        self.outputs[port as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.ram[..]
    }
}

impl Bus8080 for FlatMemory {
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    fn port_in(&mut self, port: u8) -> Option<u8> {
        self.inputs[port as usize]
    }

    fn port_out(&mut self, port: u8, value: u8) {
        self.outputs[port as usize] = value;
    }
}

impl Index<u16> for FlatMemory {
    type Output = u8;
    fn index(&self, index: u16) -> &Self::Output {
        &self.ram[index as usize]
    }
}

impl IndexMut<u16> for FlatMemory {
    fn index_mut(&mut self, index: u16) -> &mut Self::Output {
        &mut self.ram[index as usize]
    }
}

impl Index<Range<u16>> for FlatMemory {
    type Output = [u8];
    fn index(&self, index: Range<u16>) -> &Self::Output {
        &self.ram[index.start as usize..index.end as usize]
    }
}

impl IndexMut<Range<u16>> for FlatMemory {
    fn index_mut(&mut self, index: Range<u16>) -> &mut Self::Output {
        &mut self.ram[index.start as usize..index.end as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_copies_image_at_origin() {
        let mut memory = FlatMemory::new();
        memory.load(0x0100, &[0x3E, 0x05, 0x76]).unwrap();
        assert_eq!(&memory[0x0100..0x0103], &[0x3E, 0x05, 0x76]);
        assert_eq!(memory[0x00FF], 0);
        assert_eq!(memory[0x0103], 0);
    }

    #[test]
    fn load_fills_the_top_of_memory_exactly() {
        let mut memory = FlatMemory::new();
        memory.load(0xFFFE, &[0xAA, 0xBB]).unwrap();
        assert_eq!(memory[0xFFFF], 0xBB);
    }

    #[test]
    fn load_rejects_images_past_the_top() {
        let mut memory = FlatMemory::new();
        let err = memory.load(0xFFFF, &[1, 2]).unwrap_err();
        assert_eq!(err, LoadError { origin: 0xFFFF, len: 2 });
        assert_eq!(memory[0xFFFF], 0);
        assert!(err.to_string().contains("FFFFh"));
    }

    #[test]
    fn bus_writes_are_visible_to_reads() {
        let mut memory = FlatMemory::new();
        for addr in [0x0000u16, 0x1234, 0xFFFF] {
            memory.write_byte(addr, addr as u8 ^ 0x5A);
            assert_eq!(memory.read_byte(addr), addr as u8 ^ 0x5A);
        }
    }

    #[test]
    fn ports_are_latched() {
        let mut memory = FlatMemory::new();
        assert_eq!(memory.port_in(0x10), None);
        memory.set_input(0x10, 0x99);
        assert_eq!(memory.port_in(0x10), Some(0x99));
        memory.clear_input(0x10);
        assert_eq!(memory.port_in(0x10), None);

        memory.port_out(0x02, 0x41);
        assert_eq!(memory.output(0x02), 0x41);
    }
}
