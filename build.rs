fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (library + tests) have no ESP-IDF environment to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
