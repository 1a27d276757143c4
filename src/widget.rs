//! Widget controller: binds a cache-backed client call to a render target
//! and keeps the two in sync across configuration changes.
//!
//! A [`Widget`] walks a small state machine: `Unmounted` until [`mount`],
//! then `Loading` while a fetch is in flight, then `Ready` or `Error`.
//! [`update`] and [`refresh`] re-enter `Loading`; [`destroy`] is terminal.
//! Fetch failures never escape a lifecycle call: the widget renders an error
//! state in place and fires the optional error callback instead. The only
//! `Err` a lifecycle method returns is misuse of the lifecycle itself, such
//! as updating a destroyed widget.
//!
//! A widget allows one in-flight fetch at a time. Every new cycle cancels
//! the previous fetch and takes a fresh epoch; a response that comes back
//! under a stale epoch is dropped, so the most recently issued operation
//! always wins even when responses arrive out of order.
//!
//! [`mount`]: Widget::mount
//! [`update`]: Widget::update
//! [`refresh`]: Widget::refresh
//! [`destroy`]: Widget::destroy
//!
//! # Examples
//!
//! ```no_run
//! use polkascore::{Client, HtmlBuffer, Theme, Widget, WidgetKind, WidgetUpdate};
//!
//! # async fn example() -> Result<(), polkascore::Error> {
//! let client = Client::new("pk_live_123")?;
//! let widget = Widget::builder(client, WidgetKind::Reputation)
//!     .address("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY")
//!     .on_load(|_| println!("rendered"))
//!     .build()?;
//!
//! let target = HtmlBuffer::new();
//! widget.mount(target.clone()).await?;
//! println!("{}", target.html());
//!
//! // Re-render for a different address, in dark mode.
//! widget
//!     .update(
//!         WidgetUpdate::new()
//!             .address("5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty")
//!             .theme(Theme::Dark),
//!     )
//!     .await?;
//!
//! widget.destroy()?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::client::Client;
use crate::templates;
use crate::types::{UserProfile, UserScores, WidgetBadges, WidgetCategory};
use crate::{Error, Result};

/// A render target a widget writes HTML into.
///
/// In a browser-backed host this wraps a live DOM element; in tests and
/// server-side rendering an [`HtmlBuffer`] works the same way. Writes
/// replace the previous contents wholesale.
pub trait Container: Send + Sync {
    /// Replaces the container's contents with `html`.
    fn set_html(&self, html: &str);
}

/// An in-memory [`Container`] that keeps the last HTML written to it.
///
/// Clones share the same buffer, so a caller can keep one handle and hand
/// another to [`Widget::mount`].
#[derive(Clone, Default)]
pub struct HtmlBuffer {
    html: Arc<Mutex<String>>,
}

impl HtmlBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the HTML most recently written into the buffer.
    pub fn html(&self) -> String {
        self.html
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Container for HtmlBuffer {
    fn set_html(&self, html: &str) {
        *self.html.lock().unwrap_or_else(PoisonError::into_inner) = html.to_string();
    }
}

/// Which widget a controller renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Total score with a per-category bar chart.
    Reputation,
    /// Display name, avatar, bio, and social handles.
    Profile,
    /// Earned badges, optionally with locked ones.
    Badges,
    /// One category's score and its scoring reasons.
    Category,
}

/// Color scheme of a rendered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Rendering configuration of a widget instance.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// SS58 address the widget tracks.
    pub address: String,
    /// Color scheme.
    pub theme: Theme,
    /// Category key; only [`WidgetKind::Category`] widgets read this.
    pub category: Option<String>,
    /// Whether reputation and category widgets render their score
    /// breakdowns or just the headline number.
    pub show_details: bool,
    /// Whether the profile widget renders an avatar.
    pub show_avatar: bool,
    /// Whether the profile widget renders social handles.
    pub show_socials: bool,
    /// Whether the badges widget renders unearned badges in a locked state.
    pub show_locked: bool,
    /// Cap on earned badges rendered; the rest collapse into a "+N more"
    /// chip.
    pub max_badges: Option<usize>,
    /// Character cap on the profile bio. `None` leaves the bio untruncated.
    pub bio_limit: Option<usize>,
}

impl WidgetConfig {
    /// Creates a config for `address` with default display settings.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            theme: Theme::Light,
            category: None,
            show_details: true,
            show_avatar: true,
            show_socials: true,
            show_locked: true,
            max_badges: None,
            bio_limit: None,
        }
    }
}

/// A partial configuration change applied by [`Widget::update`].
///
/// Fields left unset keep their current value.
#[derive(Debug, Clone, Default)]
pub struct WidgetUpdate {
    address: Option<String>,
    theme: Option<Theme>,
    category: Option<String>,
    show_details: Option<bool>,
    show_avatar: Option<bool>,
    show_socials: Option<bool>,
    show_locked: Option<bool>,
    max_badges: Option<Option<usize>>,
    bio_limit: Option<Option<usize>>,
}

impl WidgetUpdate {
    /// Creates an empty update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the widget at a different address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Switches the color scheme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Switches a category widget to a different category key.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Shows or hides the score breakdown.
    pub fn show_details(mut self, show: bool) -> Self {
        self.show_details = Some(show);
        self
    }

    /// Shows or hides the profile avatar.
    pub fn show_avatar(mut self, show: bool) -> Self {
        self.show_avatar = Some(show);
        self
    }

    /// Shows or hides social handles on the profile widget.
    pub fn show_socials(mut self, show: bool) -> Self {
        self.show_socials = Some(show);
        self
    }

    /// Shows or hides locked badges on the badges widget.
    pub fn show_locked(mut self, show: bool) -> Self {
        self.show_locked = Some(show);
        self
    }

    /// Caps how many earned badges render, or lifts the cap with `None`.
    pub fn max_badges(mut self, max: Option<usize>) -> Self {
        self.max_badges = Some(max);
        self
    }

    /// Caps the bio length in characters, or lifts the cap with `None`.
    pub fn bio_limit(mut self, limit: Option<usize>) -> Self {
        self.bio_limit = Some(limit);
        self
    }

    fn apply_to(&self, config: &mut WidgetConfig) {
        if let Some(address) = &self.address {
            config.address = address.clone();
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(category) = &self.category {
            config.category = Some(category.clone());
        }
        if let Some(show) = self.show_details {
            config.show_details = show;
        }
        if let Some(show) = self.show_avatar {
            config.show_avatar = show;
        }
        if let Some(show) = self.show_socials {
            config.show_socials = show;
        }
        if let Some(show) = self.show_locked {
            config.show_locked = show;
        }
        if let Some(max) = self.max_badges {
            config.max_badges = max;
        }
        if let Some(limit) = self.bio_limit {
            config.bio_limit = limit;
        }
    }
}

/// Lifecycle state of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Not bound to a container, either not mounted yet or destroyed.
    #[default]
    Unmounted,
    /// A fetch is in flight; the container shows the loading placeholder.
    Loading,
    /// The last fetch rendered successfully.
    Ready,
    /// The last fetch failed; the container shows the error state.
    Error,
}

/// The payload a widget rendered, handed to the load callback.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetData {
    Reputation(UserScores),
    Profile(UserProfile),
    Badges(WidgetBadges),
    Category(WidgetCategory),
}

type LoadCallback = Box<dyn Fn(&WidgetData) + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&Error) + Send + Sync>;

/// A widget instance bound to one [`Client`].
///
/// Created through [`Widget::builder`]. All lifecycle methods take `&self`;
/// internal state lives behind a lock so a widget can be shared across
/// tasks.
pub struct Widget {
    client: Client,
    kind: WidgetKind,
    on_load: Option<LoadCallback>,
    on_error: Option<ErrorCallback>,
    inner: Mutex<WidgetInner>,
}

struct WidgetInner {
    config: WidgetConfig,
    state: WidgetState,
    destroyed: bool,
    container: Option<Arc<dyn Container>>,
    cancel: Option<CancellationToken>,
    // Incremented by every new cycle; a finished fetch only renders when its
    // epoch still matches.
    epoch: u64,
}

// Manual impl: the callbacks are opaque, and reading the live state would
// take the lock that is held while `set_html` runs.
impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Widget {
    /// Creates a builder for a widget of `kind` backed by `client`.
    pub fn builder(client: Client, kind: WidgetKind) -> WidgetBuilder {
        WidgetBuilder::new(client, kind)
    }

    /// Which widget this controller renders.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WidgetState {
        self.lock().state
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> WidgetConfig {
        self.lock().config.clone()
    }

    /// Binds the widget to a container and performs the initial
    /// fetch-and-render.
    ///
    /// A fetch failure renders the error state into the container and fires
    /// the error callback; it is not an `Err` of this method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lifecycle`] when the widget is destroyed or already
    /// mounted.
    pub async fn mount(&self, container: impl Container + 'static) -> Result<()> {
        let cycle = {
            let mut inner = self.lock();
            if inner.destroyed {
                return Err(Error::Lifecycle(
                    "mount called on a destroyed widget".to_string(),
                ));
            }
            if inner.container.is_some() {
                return Err(Error::Lifecycle("widget is already mounted".to_string()));
            }
            inner.container = Some(Arc::new(container));
            Self::begin_cycle(&mut inner)
        };
        self.run_cycle(cycle, false).await;
        Ok(())
    }

    /// Merges `update` into the configuration, then re-fetches and
    /// re-renders.
    ///
    /// The fetch goes through the widget cache; after an address change,
    /// call [`Widget::refresh`] instead when staleness is unacceptable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lifecycle`] when the widget is destroyed or not
    /// mounted.
    pub async fn update(&self, update: WidgetUpdate) -> Result<()> {
        let cycle = {
            let mut inner = self.lock();
            if inner.destroyed {
                return Err(Error::Lifecycle(
                    "update called on a destroyed widget".to_string(),
                ));
            }
            if inner.container.is_none() {
                return Err(Error::Lifecycle("update called before mount".to_string()));
            }
            update.apply_to(&mut inner.config);
            Self::begin_cycle(&mut inner)
        };
        self.run_cycle(cycle, false).await;
        Ok(())
    }

    /// Re-fetches the current configuration with the cache bypassed and
    /// re-renders.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lifecycle`] when the widget is destroyed or not
    /// mounted.
    pub async fn refresh(&self) -> Result<()> {
        let cycle = {
            let mut inner = self.lock();
            if inner.destroyed {
                return Err(Error::Lifecycle(
                    "refresh called on a destroyed widget".to_string(),
                ));
            }
            if inner.container.is_none() {
                return Err(Error::Lifecycle("refresh called before mount".to_string()));
            }
            Self::begin_cycle(&mut inner)
        };
        self.run_cycle(cycle, true).await;
        Ok(())
    }

    /// Detaches from the container, cancels any in-flight fetch, and moves
    /// the widget to its terminal state.
    ///
    /// The container keeps whatever HTML it last showed; nothing renders
    /// into it afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lifecycle`] when the widget is already destroyed.
    pub fn destroy(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.destroyed {
            return Err(Error::Lifecycle("widget is already destroyed".to_string()));
        }
        inner.destroyed = true;
        inner.state = WidgetState::Unmounted;
        inner.container = None;
        inner.epoch += 1;
        if let Some(cancel) = inner.cancel.take() {
            cancel.cancel();
        }
        Ok(())
    }

    /// Cancels any in-flight fetch and opens a new cycle: bumps the epoch,
    /// enters `Loading`, and writes the loading placeholder.
    ///
    /// Caller holds the state lock.
    fn begin_cycle(inner: &mut WidgetInner) -> Cycle {
        if let Some(prev) = inner.cancel.take() {
            prev.cancel();
        }
        let cancel = CancellationToken::new();
        inner.cancel = Some(cancel.clone());
        inner.epoch += 1;
        inner.state = WidgetState::Loading;
        if let Some(container) = &inner.container {
            container.set_html(&templates::loading_html(&inner.config));
        }
        Cycle {
            epoch: inner.epoch,
            cancel,
            config: inner.config.clone(),
        }
    }

    /// Runs one fetch-and-render cycle to completion.
    ///
    /// The fetch happens without the lock held. Afterwards the lock is
    /// re-taken and the epoch re-checked: a destroy or newer cycle in the
    /// meantime means this result is stale and must not touch the
    /// container.
    async fn run_cycle(&self, cycle: Cycle, force_refresh: bool) {
        tracing::debug!(kind = ?self.kind, epoch = cycle.epoch, "widget fetch started");
        let fetched = self.fetch(&cycle.config, force_refresh, &cycle.cancel).await;

        let outcome = {
            let mut inner = self.lock();
            if inner.destroyed || inner.epoch != cycle.epoch {
                None
            } else {
                match fetched {
                    Ok(data) => {
                        let html = render(&data, &cycle.config);
                        if let Some(container) = &inner.container {
                            container.set_html(&html);
                        }
                        inner.state = WidgetState::Ready;
                        inner.cancel = None;
                        Some(Ok(data))
                    }
                    // Cancellation means a newer cycle owns the container
                    // now.
                    Err(Error::Cancelled) => None,
                    Err(err) => {
                        let message = error_message(&err);
                        if let Some(container) = &inner.container {
                            container.set_html(&templates::error_html(&cycle.config, &message));
                        }
                        inner.state = WidgetState::Error;
                        inner.cancel = None;
                        Some(Err(err))
                    }
                }
            }
        };

        // Callbacks run with the lock released so they may call back into
        // the widget.
        match outcome {
            Some(Ok(data)) => {
                tracing::debug!(kind = ?self.kind, epoch = cycle.epoch, "widget rendered");
                if let Some(on_load) = &self.on_load {
                    on_load(&data);
                }
            }
            Some(Err(err)) => {
                tracing::warn!(kind = ?self.kind, error = %err, "widget fetch failed");
                if let Some(on_error) = &self.on_error {
                    on_error(&err);
                }
            }
            None => {
                tracing::debug!(kind = ?self.kind, epoch = cycle.epoch, "widget cycle abandoned");
            }
        }
    }

    async fn fetch(
        &self,
        config: &WidgetConfig,
        force_refresh: bool,
        cancel: &CancellationToken,
    ) -> Result<WidgetData> {
        match self.kind {
            WidgetKind::Reputation => self
                .client
                .get_widget_reputation(&config.address, force_refresh, Some(cancel))
                .await
                .map(WidgetData::Reputation),
            WidgetKind::Profile => self
                .client
                .get_widget_profile(&config.address, force_refresh, Some(cancel))
                .await
                .map(WidgetData::Profile),
            WidgetKind::Badges => self
                .client
                .get_widget_badges(&config.address, force_refresh, Some(cancel))
                .await
                .map(WidgetData::Badges),
            WidgetKind::Category => {
                // The builder guarantees a category key for this kind.
                let category = config.category.as_deref().unwrap_or("");
                self.client
                    .get_widget_category(&config.address, category, force_refresh, Some(cancel))
                    .await
                    .map(WidgetData::Category)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, WidgetInner> {
        // Renders are wholesale writes, so state stays consistent even if a
        // panic interrupted a previous holder. Recover instead of poisoning
        // every later lifecycle call.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One fetch-and-render cycle's identity: its epoch, its cancellation
/// token, and the config snapshot it renders with.
struct Cycle {
    epoch: u64,
    cancel: CancellationToken,
    config: WidgetConfig,
}

fn render(data: &WidgetData, config: &WidgetConfig) -> String {
    match data {
        WidgetData::Reputation(scores) => templates::reputation_html(scores, config),
        WidgetData::Profile(profile) => templates::profile_html(profile, config),
        WidgetData::Badges(badges) => templates::badges_html(badges, config),
        WidgetData::Category(category) => templates::category_html(category, config),
    }
}

/// Maps a fetch error to the short message shown inside the widget.
fn error_message(err: &Error) -> String {
    if err.is_not_found() {
        "No reputation data for this address yet".to_string()
    } else if err.is_auth_error() {
        "Invalid or expired API key".to_string()
    } else if err.is_rate_limited() {
        "Rate limited, please try again shortly".to_string()
    } else {
        "Could not load data".to_string()
    }
}

/// Builder for configuring and creating a [`Widget`].
pub struct WidgetBuilder {
    client: Client,
    kind: WidgetKind,
    config: WidgetConfig,
    on_load: Option<LoadCallback>,
    on_error: Option<ErrorCallback>,
}

impl WidgetBuilder {
    fn new(client: Client, kind: WidgetKind) -> Self {
        Self {
            client,
            kind,
            config: WidgetConfig::new(""),
            on_load: None,
            on_error: None,
        }
    }

    /// Sets the address the widget tracks. Required.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.config.address = address.into();
        self
    }

    /// Sets the color scheme (defaults to [`Theme::Light`]).
    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    /// Sets the category key. Required for [`WidgetKind::Category`].
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.config.category = Some(category.into());
        self
    }

    /// Shows or hides the score breakdown (defaults to shown).
    pub fn show_details(mut self, show: bool) -> Self {
        self.config.show_details = show;
        self
    }

    /// Shows or hides the profile avatar (defaults to shown).
    pub fn show_avatar(mut self, show: bool) -> Self {
        self.config.show_avatar = show;
        self
    }

    /// Shows or hides social handles (defaults to shown).
    pub fn show_socials(mut self, show: bool) -> Self {
        self.config.show_socials = show;
        self
    }

    /// Shows or hides locked badges (defaults to shown).
    pub fn show_locked(mut self, show: bool) -> Self {
        self.config.show_locked = show;
        self
    }

    /// Caps how many earned badges render.
    pub fn max_badges(mut self, max: usize) -> Self {
        self.config.max_badges = Some(max);
        self
    }

    /// Caps the bio length in characters.
    pub fn bio_limit(mut self, limit: usize) -> Self {
        self.config.bio_limit = Some(limit);
        self
    }

    /// Registers a callback fired after every successful render.
    pub fn on_load(mut self, callback: impl Fn(&WidgetData) + Send + Sync + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Registers a callback fired after every failed fetch.
    pub fn on_error(mut self, callback: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Builds the widget in its `Unmounted` state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the address is empty, or when a
    /// category widget has no category key.
    pub fn build(self) -> Result<Widget> {
        if self.config.address.trim().is_empty() {
            return Err(Error::Config(
                "a widget needs a non-empty address".to_string(),
            ));
        }
        if self.kind == WidgetKind::Category
            && self
                .config
                .category
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        {
            return Err(Error::Config(
                "a category widget needs a category key".to_string(),
            ));
        }
        Ok(Widget {
            client: self.client,
            kind: self.kind,
            on_load: self.on_load,
            on_error: self.on_error,
            inner: Mutex::new(WidgetInner {
                config: self.config,
                state: WidgetState::Unmounted,
                destroyed: false,
                container: None,
                cancel: None,
                epoch: 0,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    fn client() -> Client {
        Client::new("pk_test_abc").unwrap()
    }

    #[test]
    fn test_builder_requires_address() {
        let err = Widget::builder(client(), WidgetKind::Reputation)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Widget::builder(client(), WidgetKind::Reputation)
            .address("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_category_widget_requires_category_key() {
        let err = Widget::builder(client(), WidgetKind::Category)
            .address(ADDR)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let widget = Widget::builder(client(), WidgetKind::Category)
            .address(ADDR)
            .category("governance")
            .build()
            .unwrap();
        assert_eq!(widget.state(), WidgetState::Unmounted);
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let mut config = WidgetConfig::new(ADDR);
        config.max_badges = Some(10);

        let update = WidgetUpdate::new()
            .theme(Theme::Dark)
            .show_details(false)
            .max_badges(Some(3));
        update.apply_to(&mut config);

        assert_eq!(config.theme, Theme::Dark);
        assert!(!config.show_details);
        assert_eq!(config.max_badges, Some(3));
        assert_eq!(config.address, ADDR);
        assert!(config.show_locked);

        WidgetUpdate::new().max_badges(None).apply_to(&mut config);
        assert_eq!(config.max_badges, None);
    }

    #[test]
    fn test_debug_output_names_the_kind() {
        let widget = Widget::builder(client(), WidgetKind::Badges)
            .address(ADDR)
            .build()
            .unwrap();
        assert_eq!(format!("{widget:?}"), "Widget { kind: Badges, .. }");
    }

    #[test]
    fn test_html_buffer_shares_storage_across_clones() {
        let buffer = HtmlBuffer::new();
        let clone = buffer.clone();
        clone.set_html("<p>hi</p>");
        assert_eq!(buffer.html(), "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_lifecycle_methods_fail_after_destroy() {
        let widget = Widget::builder(client(), WidgetKind::Badges)
            .address(ADDR)
            .build()
            .unwrap();

        widget.destroy().unwrap();
        assert_eq!(widget.state(), WidgetState::Unmounted);

        assert!(matches!(widget.destroy(), Err(Error::Lifecycle(_))));
        assert!(matches!(
            widget.mount(HtmlBuffer::new()).await,
            Err(Error::Lifecycle(_))
        ));
        assert!(matches!(
            widget.update(WidgetUpdate::new()).await,
            Err(Error::Lifecycle(_))
        ));
        assert!(matches!(widget.refresh().await, Err(Error::Lifecycle(_))));
    }

    #[tokio::test]
    async fn test_update_and_refresh_require_mount() {
        let widget = Widget::builder(client(), WidgetKind::Profile)
            .address(ADDR)
            .build()
            .unwrap();

        assert!(matches!(
            widget.update(WidgetUpdate::new()).await,
            Err(Error::Lifecycle(_))
        ));
        assert!(matches!(widget.refresh().await, Err(Error::Lifecycle(_))));
    }
}
