use std::path::PathBuf;

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bindings"));
    if let Err(err) = portfolio_core::bindings::export_ts_bindings(&out_dir) {
        eprintln!("failed to export TS bindings: {err}");
        std::process::exit(1);
    }
    println!("exported TS bindings to {}", out_dir.display());
}
