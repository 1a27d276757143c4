//! Wire records returned by the Polkascore API.
//!
//! Every record is a plain serde struct created fresh on each client call
//! (or rebuilt verbatim from the widget cache) and owned by the caller.
//! Field names follow the API's camelCase JSON; timestamps are RFC 3339.
//!
//! Badge and category *keys* are stable identifiers shared between the
//! user-scoped records and the definition metadata. They are join keys: a
//! [`UserBadge`] references its [`BadgeDefinition`] by key and never embeds
//! it by value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a record was produced.
///
/// `App` marks data precomputed by the Polkascore app pipeline; `Api` marks
/// data computed on demand by the public API. Absent on the wire defaults
/// to `Api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Precomputed by the app pipeline.
    App,
    /// Computed on demand by the API.
    #[default]
    Api,
}

/// An on-chain identity attached to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolkadotIdentity {
    /// Chain the identity was registered on, e.g. `polkadot` or `kusama`.
    pub chain: String,
    /// Display name from the identity pallet.
    pub display: String,
    /// Whether a registrar judged the identity as valid.
    #[serde(default)]
    pub verified: bool,
}

/// A user profile for one address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// The SS58 address this profile was fetched for.
    pub address: String,
    /// Display name chosen by the user or derived from on-chain identity.
    pub display_name: String,
    /// Free-form biography, if the user wrote one.
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar image URL, if set.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Social links, platform name mapped to handle or URL.
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
    /// On-chain identities registered for this address.
    #[serde(default)]
    pub identities: Vec<PolkadotIdentity>,
    /// Number of NFTs held, when the indexer has counted them.
    #[serde(default)]
    pub nft_count: Option<u64>,
    /// Provenance of this record.
    #[serde(default)]
    pub source: DataSource,
}

/// Score earned in a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    /// Points earned in this category.
    pub score: f64,
    /// Machine-readable reason code, a join key into
    /// [`CategoryDefinition::reasons`].
    pub reason: String,
    /// Human-readable title for the reason.
    pub title: String,
}

/// The full score breakdown for one address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScores {
    /// The SS58 address these scores were computed for.
    pub address: String,
    /// Sum of all category scores.
    pub total_score: f64,
    /// When the scores were last calculated.
    pub calculated_at: DateTime<Utc>,
    /// Per-category breakdown, keyed by category key.
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryScore>,
    /// Global rank of this address, when available.
    #[serde(default)]
    pub rank: Option<u64>,
    /// Percentile of this address among all scored addresses.
    #[serde(default)]
    pub percentile: Option<f64>,
    /// Provenance of this record.
    #[serde(default)]
    pub source: DataSource,
}

/// A badge an address has earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    /// Badge key, a join key into the badge definitions.
    pub badge: String,
    /// Achieved level ordinal, starting at 1.
    pub level: u32,
    /// Key of the achieved level within the definition.
    pub level_key: String,
    /// Human-readable title of the achieved level.
    pub level_title: String,
    /// When the badge was earned, if the indexer recorded it.
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}

/// All badges earned by one address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadges {
    /// The SS58 address these badges belong to.
    pub address: String,
    /// Earned badges in achievement order.
    #[serde(default)]
    pub badges: Vec<UserBadge>,
    /// Number of earned badges.
    pub count: u32,
    /// Provenance of this record.
    #[serde(default)]
    pub source: DataSource,
}

/// The earned state of a single badge for one address.
///
/// Returned by the single-badge endpoint. An unearned badge is a valid 200
/// response with `earned: false` and no level fields; only an *unknown*
/// badge key is a 404.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    /// The SS58 address queried.
    pub address: String,
    /// Badge key queried.
    pub badge: String,
    /// Whether the address has earned any level of this badge.
    pub earned: bool,
    /// Achieved level ordinal, when earned.
    #[serde(default)]
    pub level: Option<u32>,
    /// Key of the achieved level, when earned.
    #[serde(default)]
    pub level_key: Option<String>,
    /// Title of the achieved level, when earned.
    #[serde(default)]
    pub level_title: Option<String>,
    /// When the badge was earned, if recorded.
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
    /// Provenance of this record.
    #[serde(default)]
    pub source: DataSource,
}

/// One level of a badge definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeLevel {
    /// Level key, stable across metadata revisions.
    pub key: String,
    /// Human-readable level title.
    pub title: String,
    /// Points awarded for reaching this level.
    pub points: f64,
    /// How to reach this level, shown as guidance in widgets.
    #[serde(default)]
    pub advice: Option<String>,
}

/// Static metadata describing one badge.
///
/// Read-only reference data with a lifecycle independent from user data;
/// fetched from `/api/v2/metadata/badges` keyed by badge key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDefinition {
    /// Human-readable badge title.
    pub title: String,
    /// What the badge rewards.
    pub description: String,
    /// Levels in ascending order; the first level is the entry goal.
    #[serde(default)]
    pub levels: Vec<BadgeLevel>,
}

/// One scoring reason within a category definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReason {
    /// Reason code matched against [`CategoryScore::reason`].
    pub key: String,
    /// Human-readable reason title.
    pub title: String,
    /// Points granted when this reason applies.
    pub points: f64,
    /// How to improve, shown as guidance in widgets.
    #[serde(default)]
    pub advice: Option<String>,
}

/// Static metadata describing one scoring category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    /// Human-readable category title.
    pub title: String,
    /// What the category measures.
    pub description: String,
    /// The reasons a score in this category can be granted for.
    #[serde(default)]
    pub reasons: Vec<ScoreReason>,
}

/// Payload of the widget-optimized badges endpoint.
///
/// Bundles the earned badges with the full badge definitions so the badges
/// widget can render locked states without a second metadata round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBadges {
    /// The SS58 address queried.
    pub address: String,
    /// Earned badges in achievement order.
    #[serde(default)]
    pub badges: Vec<UserBadge>,
    /// All badge definitions, keyed by badge key.
    #[serde(default)]
    pub definitions: BTreeMap<String, BadgeDefinition>,
    /// Provenance of this record.
    #[serde(default)]
    pub source: DataSource,
}

/// Payload of the widget-optimized category endpoint.
///
/// Bundles the category score with its definition so the category widget
/// can render improvement guidance without a second metadata round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetCategory {
    /// The SS58 address queried.
    pub address: String,
    /// Category key queried.
    pub category: String,
    /// The score this address earned in the category.
    pub score: CategoryScore,
    /// The category's definition metadata.
    pub definition: CategoryDefinition,
    /// Provenance of this record.
    #[serde(default)]
    pub source: DataSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_decode_camel_case() {
        let json = r#"{
            "address": "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
            "totalScore": 450.0,
            "calculatedAt": "2026-05-01T12:00:00Z",
            "categories": {
                "governance": {"score": 120.0, "reason": "voted_recently", "title": "Voted recently"}
            },
            "rank": 17,
            "source": "app"
        }"#;

        let scores: UserScores = serde_json::from_str(json).unwrap();
        assert_eq!(scores.total_score, 450.0);
        assert_eq!(scores.rank, Some(17));
        assert_eq!(scores.percentile, None);
        assert_eq!(scores.source, DataSource::App);
        assert_eq!(scores.categories["governance"].title, "Voted recently");
    }

    #[test]
    fn test_source_defaults_to_api() {
        let json = r#"{"address": "5F3s", "displayName": "alice"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.source, DataSource::Api);
        assert!(profile.socials.is_empty());
        assert!(profile.identities.is_empty());
    }

    #[test]
    fn test_unearned_badge_status() {
        let json = r#"{"address": "5F3s", "badge": "validator", "earned": false}"#;
        let status: BadgeStatus = serde_json::from_str(json).unwrap();
        assert!(!status.earned);
        assert_eq!(status.level, None);
        assert_eq!(status.earned_at, None);
    }

    #[test]
    fn test_definitions_map_decodes() {
        let json = r#"{
            "validator": {
                "title": "Validator",
                "description": "Runs a validator node",
                "levels": [
                    {"key": "bronze", "title": "Bronze", "points": 10.0, "advice": "Start validating"}
                ]
            }
        }"#;

        let defs: BTreeMap<String, BadgeDefinition> = serde_json::from_str(json).unwrap();
        assert_eq!(defs["validator"].levels[0].key, "bronze");
        assert_eq!(defs["validator"].levels[0].advice.as_deref(), Some("Start validating"));
    }
}
