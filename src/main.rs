fn main() {
    if let Err(e) = itx_visa_pipeline::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
