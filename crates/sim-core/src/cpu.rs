//! CPU core trait.

/// A CPU core.
///
/// Unlike bus-sharing designs, a teaching CPU owns its memory outright, so
/// `tick()` takes no bus argument. One tick is one clock phase.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Fatal fault raised while advancing.
    type Error;

    /// Advance the CPU by one clock phase.
    ///
    /// Returns `Ok(true)` once the CPU has halted. Calling `tick()` on a
    /// halted CPU does nothing and keeps returning `Ok(true)`.
    fn tick(&mut self) -> Result<bool, Self::Error>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU is halted.
    fn is_halted(&self) -> bool;

    /// Reset the CPU to its initial state. Memory contents survive a reset.
    fn reset(&mut self);
}
