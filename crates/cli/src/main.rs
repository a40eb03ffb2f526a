fn main() {
    if let Err(e) = qualscan_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
