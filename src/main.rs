fn main() {
    if let Err(err) = github_card_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
