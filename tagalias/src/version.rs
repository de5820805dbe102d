/// Get the version string for tagalias and libtagalias
pub fn get_version_string() -> String {
    format!(
        "tagalias {}\nlibtagalias {}",
        env!("CARGO_PKG_VERSION"),
        libtagalias::version()
    )
}

/// Print version information to stdout
pub fn print_version() {
    println!("{}", get_version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
