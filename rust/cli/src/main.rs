use std::io;

fn main() {
    croupier_cli::logging::init_logging();
    let code = croupier_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
