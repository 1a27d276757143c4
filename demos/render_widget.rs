//! Renders the reputation and badges widgets into an in-memory buffer.
//!
//! In a browser host the same widgets write into a live DOM element; here an
//! `HtmlBuffer` stands in so the output can be printed or saved to a file.
//!
//! This example shows how to:
//! - Build a widget with display options and callbacks
//! - Mount it, update its configuration, and force a refresh
//! - Read the rendered HTML back out of the container
//!
//! Run with: `POLKASCORE_API_KEY=pk_... cargo run --example render_widget`

use polkascore::{Client, Error, HtmlBuffer, Theme, Widget, WidgetKind, WidgetUpdate};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("polkascore=debug,render_widget=info")
        .init();

    let api_key = std::env::var("POLKASCORE_API_KEY").unwrap_or_else(|_| "pk_demo".to_string());
    let client = Client::builder().api_key(api_key).build()?;

    let address = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    println!("=== Reputation Widget ===");
    let widget = Widget::builder(client.clone(), WidgetKind::Reputation)
        .address(address)
        .on_load(|_| println!("(widget rendered)"))
        .on_error(|err| println!("(widget failed: {err})"))
        .build()?;

    let target = HtmlBuffer::new();
    widget.mount(target.clone()).await?;
    println!("{}", target.html());
    println!();

    println!("=== Dark Theme ===");
    // The payload is still fresh in the shared cache, so this re-render
    // does not hit the network.
    widget
        .update(WidgetUpdate::new().theme(Theme::Dark))
        .await?;
    println!("{}", target.html());
    println!();

    println!("=== Badges Widget ===");
    let badges = Widget::builder(client, WidgetKind::Badges)
        .address(address)
        .max_badges(6)
        .show_locked(true)
        .build()?;

    let badges_target = HtmlBuffer::new();
    badges.mount(badges_target.clone()).await?;
    println!("{}", badges_target.html());

    // Bypass the cache when only the freshest data will do.
    badges.refresh().await?;

    widget.destroy()?;
    badges.destroy()?;

    Ok(())
}
