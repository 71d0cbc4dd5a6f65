use std::time::Duration;
use anyhow::Result;

use helpbot::app::App;
use helpbot::config::Config;
use helpbot::handler;
use helpbot::tui;
use helpbot::ui;

#[tokio::main]
async fn main() -> Result<()> {
    // An unreadable config degrades to defaults
    let config = Config::load().unwrap_or_else(|_| Config::new());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new(Duration::from_millis(300));
    let mut app = App::new(&config);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }

        // The tick keeps the loop turning, so a finished query is picked up
        // within one tick even without further input.
        if app.query_finished() {
            app.finish_query().await;
        }
    }

    Ok(())
}
