/// Bus interface for the Intel 8080 core.
///
/// The CPU uses this trait to reach memory and IO ports without knowing
/// anything about the concrete machine behind them. Every 16-bit address is
/// valid from the core's point of view; what happens outside populated memory
/// (mirroring, open bus, panicking) is the implementor's choice.
pub trait Bus8080 {
    fn read_byte(&mut self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, value: u8);

    /// Read a byte for inspection only, as the disassembler and tracing do.
    ///
    /// The default forwards to [`Bus8080::read_byte`]. Hosts whose reads have
    /// side effects (memory-mapped IO) should override this so that tracing
    /// never shows up on the bus.
    fn peek_byte(&mut self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    /// Read from an input port for `IN port`.
    ///
    /// Returning `None` means no device answers on this port and leaves the
    /// accumulator unchanged. The default wires no ports at all.
    fn port_in(&mut self, _port: u8) -> Option<u8> {
        None
    }

    /// Write the accumulator to an output port for `OUT port`.
    fn port_out(&mut self, _port: u8, _value: u8) {}
}

impl<B: Bus8080 + ?Sized> Bus8080 for &mut B {
    fn read_byte(&mut self, addr: u16) -> u8 {
        (**self).read_byte(addr)
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        (**self).write_byte(addr, value)
    }

    fn peek_byte(&mut self, addr: u16) -> u8 {
        (**self).peek_byte(addr)
    }

    fn port_in(&mut self, port: u8) -> Option<u8> {
        (**self).port_in(port)
    }

    fn port_out(&mut self, port: u8, value: u8) {
        (**self).port_out(port, value)
    }
}

/// A bus built from a pair of host callbacks.
///
/// This is the smallest possible host: a `read_byte` closure and a
/// `write_byte` closure. IO ports stay unwired.
pub struct FnBus<R, W> {
    read: R,
    write: W,
}

impl<R, W> FnBus<R, W>
where
    R: FnMut(u16) -> u8,
    W: FnMut(u16, u8),
{
    pub fn new(read: R, write: W) -> Self {
        Self { read, write }
    }
}

impl<R, W> Bus8080 for FnBus<R, W>
where
    R: FnMut(u16) -> u8,
    W: FnMut(u16, u8),
{
    fn read_byte(&mut self, addr: u16) -> u8 {
        (self.read)(addr)
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        (self.write)(addr, value)
    }
}
