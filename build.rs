fn main() {
    // ESP-IDF link arguments are only needed for device builds; host builds
    // (tests, simulation) compile without the toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
