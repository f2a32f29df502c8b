//! Trait for chips advanced in lockstep with CPU time.

/// A component that advances in lockstep with the CPU.
///
/// After every instruction (or every single forced cycle while the CPU is
/// halted on a sync latch), the bus fans the elapsed cycle count out to
/// each chip. Chips that run faster than the CPU convert internally
/// (the TIA runs three pixel clocks per CPU cycle).
pub trait Tickable {
    /// Advance the component by `cycles` CPU clock cycles.
    fn clock(&mut self, cycles: u32);
}
