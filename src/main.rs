#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(hello_kern::test_runner)]
#![reexport_test_harness_main = "test_main"]

use bootloader::BootInfo;
use core::panic::PanicInfo;

extern crate hello_kern;

#[cfg(not(test))]
fn kmain() -> ! {
    hello_kern::greeting::run()
}

#[cfg(test)]
fn run_tests() -> ! {
    test_main();
    hello_kern::halt::park()
}

#[no_mangle]
#[cfg(not(test))]
pub unsafe extern "C" fn _start(boot_info: &'static BootInfo) -> ! {
    hello_kern::init::kstart(boot_info, kmain)
}

/// Entry point for `cargo test`
#[cfg(test)]
#[no_mangle]
pub unsafe extern "C" fn _start(boot_info: &'static BootInfo) -> ! {
    hello_kern::init::kstart(boot_info, run_tests)
}

/// This function is called on panic.
#[cfg(not(test))]
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    log::error!("{}", info);
    hello_kern::halt::park()
}

#[cfg(test)]
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    hello_kern::test_panic_handler(info)
}
