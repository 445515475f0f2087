use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Verbose serial logging in debug builds
    if env::var("PROFILE").unwrap() == "debug" {
        println!("cargo:rustc-cfg=feature=\"debug\"");
    }

    // Host builds only compile the game logic and its tests
    let target = env::var("TARGET").unwrap();
    if !target.contains("avr") {
        return;
    }

    println!("cargo:rustc-link-arg-bins=-mmcu=atmega328p");
    println!("cargo:warning=Building for ATmega328P at 16MHz");
}
