#![forbid(unsafe_code)]

fn main() {
    undoable_demo::init_tracing();
    if let Err(error) = undoable_demo::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
