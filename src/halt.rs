use x86_64::instructions::{hlt, interrupts};

/// Parks the current CPU for good.
///
/// Interrupts are masked first so `hlt` can only be left by an NMI or SMI, and
/// the loop puts the CPU straight back to sleep if that happens.
#[inline]
pub fn park() -> ! {
    interrupts::disable();
    loop {
        hlt();
    }
}
