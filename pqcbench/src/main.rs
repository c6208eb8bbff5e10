fn main() {
    if let Err(e) = pqcbench::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
