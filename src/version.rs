/// Version with the commit and date the binary was built from (written to
/// OUT_DIR by build.rs). Shown by `--version`.
pub fn long_version() -> String {
    format!("{} (commit {}, built {})",
        env!("CARGO_PKG_VERSION"),
        include_str!(concat!(env!("OUT_DIR"), "/git-commit")),
        include_str!(concat!(env!("OUT_DIR"), "/compile-date")),
    )
}
