fn main() {
    // Emit the ESP-IDF build environment only for firmware builds.
    // Host-target test builds skip it entirely.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
