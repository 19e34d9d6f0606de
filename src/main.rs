//! Jobflow console client.
//!
//! Prints the first page of jobs, scholarships and events from the configured
//! backend, marking bookmarked items, followed by the saved-items summary.

use std::error::Error;

use jobflow::app::App;
use jobflow::logging;
use jobflow::managers::listing_view::{ListingController, ListingView, ViewRender};
use jobflow::managers::saved_items::SavedItems;
use jobflow::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use jobflow::types::listing::{Event, Job, ListingRecord, Scholarship};

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

async fn print_page<T: ListingRecord>(app: &App, title: &str) {
    section(title);

    let controller = ListingController::new(
        ListingView::<T>::with_page_size(app.page_size()),
        app.api.clone(),
    );
    controller.fetch().await;

    match controller.view().render(&app.bookmarks) {
        ViewRender::Loading { .. } => println!("  (still loading)"),
        ViewRender::Error { message, .. } => println!("  Error: {}", message),
        ViewRender::Empty { .. } => println!("  Nothing listed yet"),
        ViewRender::Results { cards, pagination } => {
            for card in &cards {
                let marker = if card.is_bookmarked() { "★" } else { " " };
                let badges: Vec<String> = card.badges().into_iter().map(|b| b.label).collect();
                println!(
                    "  {} #{:<5} {} | {} | {} [{}]",
                    marker,
                    card.id(),
                    card.title(),
                    card.organization(),
                    card.location(),
                    badges.join(", ")
                );
            }
            if let Some(p) = pagination {
                println!("  Page {} of {} ({} total)", p.current, p.total_pages, p.total);
            }
        }
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut settings = SettingsEngine::new(std::env::var("JOBFLOW_CONFIG").ok());
    let loaded = settings.load()?;
    logging::init(&loaded.logging.filter);

    let app = App::with_settings(settings)?;

    println!();
    println!("  Jobflow v{} @ {}", env!("CARGO_PKG_VERSION"), app.api.base_url());
    println!();

    print_page::<Job>(&app, "Jobs").await;
    print_page::<Scholarship>(&app, "Scholarships").await;
    print_page::<Event>(&app, "Events").await;

    section("Saved Items");
    let saved = SavedItems::load(&app.api, &app.bookmarks).await;
    println!(
        "  {} saved ({} jobs, {} scholarships, {} events)",
        saved.total(),
        saved.jobs.items.len(),
        saved.scholarships.items.len(),
        saved.events.items.len()
    );
    Ok(())
}
