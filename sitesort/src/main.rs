mod application;
mod config;
mod logging;

mod presentation {
    pub mod cli;
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    application::run()
}
