fn main() {
    if let Err(e) = dumpscope_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
