//! # Polkascore - Rust SDK for the Polkascore reputation API
//!
//! Polkascore scores on-chain activity of Polkadot addresses across
//! categories (governance, staking, community, and so on) and awards
//! levelled badges. This crate wraps the HTTP API in a typed client and
//! ships framework-agnostic HTML widgets that render reputation data into
//! any container.
//!
//! ## Quick Start
//!
//! ```no_run
//! use polkascore::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), polkascore::Error> {
//!     let client = Client::builder()
//!         .api_key("pk_live_123")
//!         .build()?;
//!
//!     let addr = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
//!
//!     let scores = client.get_scores(addr, None).await?;
//!     println!("total: {} (rank {:?})", scores.total_score, scores.rank);
//!
//!     let badges = client.get_badges(addr, None).await?;
//!     for badge in &badges.badges {
//!         println!("{}: level {} ({})", badge.badge, badge.level, badge.level_title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Widgets
//!
//! A [`Widget`] binds a cache-backed fetch to a [`Container`] and re-renders
//! on every configuration change:
//!
//! ```no_run
//! use polkascore::{Client, HtmlBuffer, Widget, WidgetKind};
//!
//! # async fn example() -> Result<(), polkascore::Error> {
//! let client = Client::new("pk_live_123")?;
//! let widget = Widget::builder(client, WidgetKind::Badges)
//!     .address("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY")
//!     .max_badges(6)
//!     .build()?;
//!
//! let target = HtmlBuffer::new();
//! widget.mount(target.clone()).await?;
//! println!("{}", target.html());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Typed API surface** - One method per endpoint, deserializing into
//!   plain data structs
//! - **Widget response cache** - Process-wide TTL cache keyed by resource,
//!   address, and sub-key, shared by every widget instance
//! - **Cancellation** - Every fetch accepts a `CancellationToken`; widgets
//!   cancel their own stale fetches so the latest operation always wins
//! - **Rich error handling** - One error type carrying the HTTP status and
//!   raw body, with helpers for the common causes
//! - **HTML templates** - Pure, injection-safe rendering with light/dark
//!   themes, also usable standalone via [`templates`]
//! - **Structured logging** - Request and cache activity logged with
//!   `tracing`
//!
//! ## Error Handling
//!
//! Direct client methods propagate errors; widget lifecycle methods render
//! an in-place error state instead and only fail on lifecycle misuse:
//!
//! ```no_run
//! use polkascore::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("pk_live_123")?;
//! match client.get_profile("5Grw...", None).await {
//!     Ok(profile) => println!("{}", profile.display_name),
//!     Err(err) if err.is_not_found() => println!("address not scored yet"),
//!     Err(err) if err.is_rate_limited() => println!("slow down"),
//!     Err(Error::Api { status, body }) => {
//!         eprintln!("API error {status}: {body}");
//!     }
//!     Err(err) => eprintln!("request failed: {err}"),
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod error;
pub mod templates;
mod transport;
mod types;
mod widget;

pub use cache::{CacheKey, ResponseCache, WidgetResource};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::{
    BadgeDefinition, BadgeLevel, BadgeStatus, CategoryDefinition, CategoryScore, DataSource,
    PolkadotIdentity, ScoreReason, UserBadge, UserBadges, UserProfile, UserScores, WidgetBadges,
    WidgetCategory,
};
pub use widget::{
    Container, HtmlBuffer, Theme, Widget, WidgetBuilder, WidgetConfig, WidgetData, WidgetKind,
    WidgetState, WidgetUpdate,
};

// Re-exported so callers do not need a direct tokio-util dependency to
// cancel fetches.
pub use tokio_util::sync::CancellationToken;
