fn main() {
    // Emit ESP-IDF sysenv only for device builds; host test builds
    // (--no-default-features) skip it.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
