const PRETTY_LOG_ENV: &str = "RUST_LOG_PRETTY";

fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed={PRETTY_LOG_ENV}");

    let pretty = std::env::var(PRETTY_LOG_ENV).unwrap_or_default();
    if matches!(pretty.trim(), "1" | "true" | "yes") {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
