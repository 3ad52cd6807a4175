fn main() {
    // ESP-IDF linker arguments are only needed for the device binary;
    // host builds (tests, simulation) skip the toolchain probe.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
