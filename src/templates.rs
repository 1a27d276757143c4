//! HTML templates for the Polkascore widgets.
//!
//! Every function in this module is pure: a data record and a
//! [`WidgetConfig`] go in, an HTML string comes out. The widget controller
//! decides *when* to render; these functions only decide *what* the markup
//! looks like.
//!
//! All user-controlled text (display names, bios, social handles, titles
//! coming back from the API) passes through [`escape_html`] before it is
//! interpolated. Rendering unescaped API data into a page is an injection
//! vector, so the escaping here is a correctness requirement rather than
//! cosmetics.
//!
//! The markup carries its own `<style>` block and uses CSS custom properties
//! throughout, so a host page can restyle widgets by overriding
//! `--ps-*` variables. Dark mode is a single class (`ps-dark`) on the
//! widget root.
//!
//! # Examples
//!
//! ```
//! use polkascore::templates::{escape_html, format_number};
//!
//! assert_eq!(escape_html("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
//! assert_eq!(format_number(1234.5), "1,234.5");
//! ```

use crate::types::{UserProfile, UserScores, WidgetBadges, WidgetCategory};
use crate::widget::{Theme, WidgetConfig};

/// Stylesheet embedded in every rendered widget.
///
/// Kept in one place so all four widgets share a palette. Hosts override the
/// custom properties to restyle; `ps-dark` swaps the palette wholesale.
const WIDGET_STYLE: &str = "\
.ps-widget{--ps-bg:#ffffff;--ps-fg:#1a1a2e;--ps-muted:#6b7280;--ps-accent:#e6007a;\
--ps-border:#e5e7eb;--ps-track:#f3f4f6;\
background:var(--ps-bg);color:var(--ps-fg);border:1px solid var(--ps-border);\
border-radius:12px;padding:16px;font-family:-apple-system,'Segoe UI',Roboto,sans-serif;\
font-size:14px;line-height:1.4;max-width:360px}\
.ps-widget.ps-dark{--ps-bg:#16161e;--ps-fg:#e5e7eb;--ps-muted:#9ca3af;\
--ps-border:#2d2d3a;--ps-track:#24242e}\
.ps-header{display:flex;justify-content:space-between;align-items:baseline;margin-bottom:8px}\
.ps-title{font-weight:600}\
.ps-address{color:var(--ps-muted);font-size:12px;font-family:monospace}\
.ps-score{font-size:32px;font-weight:700;color:var(--ps-accent)}\
.ps-rank{color:var(--ps-muted);font-size:12px;margin-bottom:12px}\
.ps-category{margin-top:8px}\
.ps-category-row{display:flex;justify-content:space-between;font-size:13px}\
.ps-bar{height:6px;background:var(--ps-track);border-radius:3px;margin-top:2px}\
.ps-bar-fill{height:100%;background:var(--ps-accent);border-radius:3px}\
.ps-badges{display:flex;flex-wrap:wrap;gap:8px}\
.ps-badge{display:flex;flex-direction:column;align-items:center;width:72px;\
padding:8px 4px;border:1px solid var(--ps-border);border-radius:8px;text-align:center}\
.ps-badge-icon{font-size:20px}\
.ps-badge-title{font-size:11px;margin-top:4px}\
.ps-badge-locked{opacity:0.45}\
.ps-more{align-self:center;color:var(--ps-muted);font-size:12px}\
.ps-avatar{width:48px;height:48px;border-radius:50%;object-fit:cover}\
.ps-name{font-weight:600;font-size:16px;margin-top:8px}\
.ps-verified{color:var(--ps-accent);margin-left:4px}\
.ps-bio{margin-top:8px}\
.ps-socials{margin-top:8px;display:flex;flex-wrap:wrap;gap:8px;font-size:12px;color:var(--ps-muted)}\
.ps-nfts{margin-top:8px;font-size:12px;color:var(--ps-muted)}\
.ps-description{color:var(--ps-muted);font-size:13px;margin-top:4px}\
.ps-reasons{list-style:none;margin:8px 0 0;padding:0}\
.ps-reason{display:flex;justify-content:space-between;padding:4px 0;\
border-top:1px solid var(--ps-border);font-size:13px}\
.ps-points{color:var(--ps-accent);font-weight:600}\
.ps-loading{display:flex;align-items:center;gap:8px;color:var(--ps-muted)}\
.ps-spinner{width:14px;height:14px;border:2px solid var(--ps-track);\
border-top-color:var(--ps-accent);border-radius:50%;animation:ps-spin 0.8s linear infinite}\
@keyframes ps-spin{to{transform:rotate(360deg)}}\
.ps-error{color:var(--ps-muted);text-align:center;padding:12px 0}";

/// Escapes the HTML-significant characters of `input`.
///
/// Covers `&`, `<`, `>`, `"` and `'`, which is sufficient for text nodes
/// and quoted attribute values, the only positions templates interpolate
/// into.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a score for display: thousands separators, at most one decimal
/// place, and no trailing `.0`.
///
/// Grouping follows the `en-US` convention (`1,234.5`); the API reports all
/// numbers unlocalized.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let tenths = ((abs - abs.trunc()) * 10.0).round() as u64;

    if tenths == 0 {
        format!("{sign}{}", group_thousands(whole))
    } else {
        format!("{sign}{}.{tenths}", group_thousands(whole))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Maps a badge level to its display icon.
///
/// Level 0 is the locked placeholder for badges not yet earned.
pub fn badge_icon(level: u32) -> &'static str {
    match level {
        0 => "\u{1F512}",        // 🔒
        1 => "\u{1F949}",        // 🥉
        2 => "\u{1F948}",        // 🥈
        3 => "\u{1F947}",        // 🥇
        4 => "\u{1F3C6}",        // 🏆
        _ => "\u{1F48E}",        // 💎, level 5 and up
    }
}

/// Shortens an SS58 address for display, keeping both ends readable.
pub fn truncate_address(address: &str) -> String {
    const HEAD: usize = 6;
    const TAIL: usize = 4;
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= HEAD + TAIL + 1 {
        return address.to_string();
    }
    let head: String = chars[..HEAD].iter().collect();
    let tail: String = chars[chars.len() - TAIL..].iter().collect();
    format!("{head}\u{2026}{tail}")
}

/// Truncates free-form text to `limit` characters on a char boundary.
fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}\u{2026}", cut.trim_end())
}

/// Wraps a widget body in the shared shell: stylesheet, root element, theme
/// class.
fn widget_shell(config: &WidgetConfig, body: &str) -> String {
    let theme_class = match config.theme {
        Theme::Light => "",
        Theme::Dark => " ps-dark",
    };
    format!("<style>{WIDGET_STYLE}</style><div class=\"ps-widget{theme_class}\">{body}</div>")
}

/// Renders the loading placeholder shown while a fetch is in flight.
pub fn loading_html(config: &WidgetConfig) -> String {
    widget_shell(
        config,
        "<div class=\"ps-loading\"><span class=\"ps-spinner\"></span>Loading\u{2026}</div>",
    )
}

/// Renders the in-place error state with a short message.
pub fn error_html(config: &WidgetConfig, message: &str) -> String {
    let body = format!("<div class=\"ps-error\">{}</div>", escape_html(message));
    widget_shell(config, &body)
}

/// Renders the reputation widget: total score, rank line, and one bar per
/// category.
pub fn reputation_html(scores: &UserScores, config: &WidgetConfig) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<div class=\"ps-header\"><span class=\"ps-title\">Reputation</span>\
         <span class=\"ps-address\">{}</span></div>",
        escape_html(&truncate_address(&scores.address)),
    ));
    body.push_str(&format!(
        "<div class=\"ps-score\">{}</div>",
        format_number(scores.total_score),
    ));

    if scores.rank.is_some() || scores.percentile.is_some() {
        body.push_str("<div class=\"ps-rank\">");
        if let Some(rank) = scores.rank {
            body.push_str(&format!("Rank #{}", group_thousands(rank)));
        }
        if let Some(percentile) = scores.percentile {
            if scores.rank.is_some() {
                body.push_str(" \u{00b7} ");
            }
            // The API reports "better than N% of addresses".
            let top = (100.0 - percentile).max(0.0);
            body.push_str(&format!("Top {}%", format_number(top)));
        }
        body.push_str("</div>");
    }

    if config.show_details {
        // Bars scale against the strongest category so the chart stays
        // readable whatever the absolute point values are.
        let max = scores
            .categories
            .values()
            .map(|c| c.score)
            .fold(0.0_f64, f64::max);
        for category in scores.categories.values() {
            let width = if max > 0.0 {
                (category.score / max * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };
            body.push_str(&format!(
                "<div class=\"ps-category\"><div class=\"ps-category-row\">\
                 <span>{}</span><span>{}</span></div>\
                 <div class=\"ps-bar\"><div class=\"ps-bar-fill\" style=\"width:{width:.0}%\"></div></div></div>",
                escape_html(&category.title),
                format_number(category.score),
            ));
        }
    }

    widget_shell(config, &body)
}

/// Renders the profile widget: avatar, display name, bio, socials.
pub fn profile_html(profile: &UserProfile, config: &WidgetConfig) -> String {
    let mut body = String::new();

    if config.show_avatar {
        if let Some(url) = &profile.avatar_url {
            body.push_str(&format!(
                "<img class=\"ps-avatar\" src=\"{}\" alt=\"\">",
                escape_html(url),
            ));
        }
    }

    let verified = profile.identities.iter().any(|i| i.verified);
    body.push_str(&format!(
        "<div class=\"ps-name\">{}{}</div>",
        escape_html(&profile.display_name),
        if verified {
            "<span class=\"ps-verified\" title=\"Verified on-chain identity\">\u{2713}</span>"
        } else {
            ""
        },
    ));
    body.push_str(&format!(
        "<div class=\"ps-address\">{}</div>",
        escape_html(&truncate_address(&profile.address)),
    ));

    if let Some(bio) = &profile.bio {
        let text = match config.bio_limit {
            Some(limit) => truncate_text(bio, limit),
            None => bio.clone(),
        };
        body.push_str(&format!("<div class=\"ps-bio\">{}</div>", escape_html(&text)));
    }

    if config.show_socials && !profile.socials.is_empty() {
        body.push_str("<div class=\"ps-socials\">");
        for (network, handle) in &profile.socials {
            body.push_str(&format!(
                "<span class=\"ps-social\">{}: {}</span>",
                escape_html(network),
                escape_html(handle),
            ));
        }
        body.push_str("</div>");
    }

    if let Some(count) = profile.nft_count {
        if count > 0 {
            body.push_str(&format!(
                "<div class=\"ps-nfts\">{} NFTs</div>",
                group_thousands(count),
            ));
        }
    }

    widget_shell(config, &body)
}

/// Renders the badges widget: earned badges first, then (optionally) the
/// locked ones with their first level as the next goal.
pub fn badges_html(data: &WidgetBadges, config: &WidgetConfig) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<div class=\"ps-header\"><span class=\"ps-title\">Badges</span>\
         <span class=\"ps-address\">{}</span></div>",
        escape_html(&truncate_address(&data.address)),
    ));
    body.push_str("<div class=\"ps-badges\">");

    let limit = config.max_badges.unwrap_or(usize::MAX);
    for badge in data.badges.iter().take(limit) {
        let title = data
            .definitions
            .get(&badge.badge)
            .map(|d| d.title.as_str())
            .unwrap_or(badge.badge.as_str());
        body.push_str(&format!(
            "<div class=\"ps-badge\" title=\"{}\">\
             <span class=\"ps-badge-icon\">{}</span>\
             <span class=\"ps-badge-title\">{}</span></div>",
            escape_html(&badge.level_title),
            badge_icon(badge.level),
            escape_html(title),
        ));
    }

    let hidden = data.badges.len().saturating_sub(limit);
    if hidden > 0 {
        body.push_str(&format!("<div class=\"ps-more\">+{hidden} more</div>"));
    }

    if config.show_locked {
        for (key, definition) in &data.definitions {
            if data.badges.iter().any(|b| &b.badge == key) {
                continue;
            }
            let goal = definition
                .levels
                .first()
                .map(|l| l.title.as_str())
                .unwrap_or("");
            body.push_str(&format!(
                "<div class=\"ps-badge ps-badge-locked\" title=\"Next: {}\">\
                 <span class=\"ps-badge-icon\">{}</span>\
                 <span class=\"ps-badge-title\">{}</span></div>",
                escape_html(goal),
                badge_icon(0),
                escape_html(&definition.title),
            ));
        }
    }

    body.push_str("</div>");
    widget_shell(config, &body)
}

/// Renders the single-category widget: the score plus the scoring reasons
/// from the category definition.
pub fn category_html(data: &WidgetCategory, config: &WidgetConfig) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<div class=\"ps-header\"><span class=\"ps-title\">{}</span>\
         <span class=\"ps-address\">{}</span></div>",
        escape_html(&data.definition.title),
        escape_html(&truncate_address(&data.address)),
    ));
    body.push_str(&format!(
        "<div class=\"ps-score\">{}</div>",
        format_number(data.score.score),
    ));
    if !data.score.title.is_empty() {
        body.push_str(&format!(
            "<div class=\"ps-description\">{}</div>",
            escape_html(&data.score.title),
        ));
    }

    if config.show_details && !data.definition.reasons.is_empty() {
        body.push_str("<ul class=\"ps-reasons\">");
        for reason in &data.definition.reasons {
            body.push_str(&format!(
                "<li class=\"ps-reason\"><span>{}</span>\
                 <span class=\"ps-points\">{}</span></li>",
                escape_html(&reason.title),
                format_number(reason.points),
            ));
        }
        body.push_str("</ul>");
    }

    widget_shell(config, &body)
}
