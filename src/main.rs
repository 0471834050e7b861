mod app;
mod config;
mod labels;
mod player;
mod runtime;
mod session;
mod trim;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
