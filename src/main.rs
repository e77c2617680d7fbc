use std::process;

fn main() {
    let cli = fanlog::cli::parse_args();
    if let Err(err) = fanlog::run_with_cli(cli) {
        eprintln!("{}: {}", env!("CARGO_PKG_NAME"), err);
        process::exit(1);
    }
}
