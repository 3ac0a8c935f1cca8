use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Debug vs Release configurations
    if env::var("PROFILE").map(|p| p == "debug").unwrap_or(false) {
        println!("cargo:rustc-cfg=feature=\"debug\"");
    }

    // Host builds only run the unit tests, nothing to link for the MCU
    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        return;
    }

    // Configure for ATmega32
    println!("cargo:rustc-link-arg=-mmcu=atmega32");
    println!("cargo:warning=Building for ATmega32 at 8MHz");
}
