use crate::logger;
use bootloader::BootInfo;
use log::info;

/// Common start of day for the kernel and its test binaries.
///
/// Brings up serial logging and hands over to `kmain`. Nothing here touches
/// the display.
pub fn kstart(boot_info: &'static BootInfo, kmain: fn() -> !) -> ! {
    logger::init();
    info!(
        "Starting kernel... ({} memory regions from bootloader)",
        boot_info.memory_map.iter().count()
    );

    kmain()
}
