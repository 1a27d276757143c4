//! Fetches the profile, scores, and badges of one address.
//!
//! This example shows how to:
//! - Create a client with an API key
//! - Fetch the score breakdown and print per-category results
//! - Check a single badge and read the badge definitions
//!
//! Run with: `POLKASCORE_API_KEY=pk_... cargo run --example fetch_scores`

use polkascore::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("polkascore=debug,fetch_scores=info")
        .init();

    let api_key = std::env::var("POLKASCORE_API_KEY").unwrap_or_else(|_| "pk_demo".to_string());
    let client = Client::builder().api_key(api_key).build()?;

    let address = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    println!("=== Profile ===");
    let profile = client.get_profile(address, None).await?;
    println!("Name: {}", profile.display_name);
    if let Some(bio) = &profile.bio {
        println!("Bio: {bio}");
    }
    for identity in &profile.identities {
        println!(
            "Identity on {}: {} (verified: {})",
            identity.chain, identity.display, identity.verified
        );
    }
    println!();

    println!("=== Scores ===");
    let scores = client.get_scores(address, None).await?;
    println!("Total: {}", scores.total_score);
    if let Some(rank) = scores.rank {
        println!("Rank: #{rank}");
    }
    println!("Calculated at: {}", scores.calculated_at);
    for (key, category) in &scores.categories {
        println!("  {key}: {} ({})", category.score, category.reason);
    }
    println!();

    println!("=== Badges ===");
    let badges = client.get_badges(address, None).await?;
    for badge in &badges.badges {
        println!(
            "  {} at level {} ({})",
            badge.badge, badge.level, badge.level_title
        );
    }

    // An unearned badge comes back as earned=false, not as an error.
    let whale = client.get_badge(address, "whale", None).await?;
    if whale.earned {
        println!("whale badge earned at level {:?}", whale.level);
    } else {
        println!("whale badge not earned yet");
    }

    Ok(())
}
