use driftfield::Backdrop;

fn main() {
    if let Err(e) = Backdrop::new().with_seed(7).run() {
        eprintln!("driftfield exited with an error: {}", e);
        std::process::exit(1);
    }
}
