#![forbid(unsafe_code)]

fn main() {
    panelctl_replay::init_tracing();
    if let Err(error) = panelctl_replay::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
