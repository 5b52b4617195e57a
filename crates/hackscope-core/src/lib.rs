//! Core domain model for the hackscope discovery pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CRATE_NAME: &str = "hackscope-core";

/// Closed category set offered as filter checkboxes on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    Mobile,
    #[serde(rename = "AI/ML")]
    AiMl,
    Cloud,
    Blockchain,
    #[serde(rename = "IoT")]
    Iot,
    Gaming,
    Cybersecurity,
    Healthcare,
    Education,
    Finance,
    #[serde(rename = "Social Impact")]
    SocialImpact,
    Other,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::WebDevelopment,
        Category::Mobile,
        Category::AiMl,
        Category::Cloud,
        Category::Blockchain,
        Category::Iot,
        Category::Gaming,
        Category::Cybersecurity,
        Category::Healthcare,
        Category::Education,
        Category::Finance,
        Category::SocialImpact,
        Category::Other,
    ];

    /// Display label; also the value carried by checkbox selections and
    /// matched case-insensitively against `category:` tokens.
    pub fn label(self) -> &'static str {
        match self {
            Category::WebDevelopment => "Web Development",
            Category::Mobile => "Mobile",
            Category::AiMl => "AI/ML",
            Category::Cloud => "Cloud",
            Category::Blockchain => "Blockchain",
            Category::Iot => "IoT",
            Category::Gaming => "Gaming",
            Category::Cybersecurity => "Cybersecurity",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Finance => "Finance",
            Category::SocialImpact => "Social Impact",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle phase of a hackathon relative to its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Upcoming,
    Live,
    Past,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Upcoming, Status::Live, Status::Past];

    pub fn label(self) -> &'static str {
        match self {
            Status::Upcoming => "upcoming",
            Status::Live => "live",
            Status::Past => "past",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Online,
    Offline,
    Hybrid,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Online, Mode::Offline, Mode::Hybrid];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Online => "Online",
            Mode::Offline => "Offline",
            Mode::Hybrid => "Hybrid",
        }
    }
}

/// Named ordering strategies selectable on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Latest,
    EndingSoon,
    PrizeDesc,
    PrizeAsc,
    Popular,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Latest,
        SortKey::EndingSoon,
        SortKey::PrizeDesc,
        SortKey::PrizeAsc,
        SortKey::Popular,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Latest => "latest",
            SortKey::EndingSoon => "ending-soon",
            SortKey::PrizeDesc => "prize-desc",
            SortKey::PrizeAsc => "prize-asc",
            SortKey::Popular => "popular",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Latest => "Latest",
            SortKey::EndingSoon => "Ending soon",
            SortKey::PrizeDesc => "Prize: high to low",
            SortKey::PrizeAsc => "Prize: low to high",
            SortKey::Popular => "Most popular",
        }
    }

    pub fn parse(value: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

/// One prize bracket offered as a checkbox; bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeRange {
    pub label: &'static str,
    pub min: u64,
    pub max: u64,
}

impl PrizeRange {
    pub fn contains(self, amount: u64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// Fixed, ordered prize brackets; checkbox selections refer to these by
/// index. Brackets do not overlap.
pub const PRIZE_RANGES: [PrizeRange; 5] = [
    PrizeRange { label: "Under 5k", min: 0, max: 4_999 },
    PrizeRange { label: "5k - 10k", min: 5_000, max: 9_999 },
    PrizeRange { label: "10k - 25k", min: 10_000, max: 24_999 },
    PrizeRange { label: "25k - 50k", min: 25_000, max: 49_999 },
    PrizeRange { label: "Above 50k", min: 50_000, max: u64::MAX },
];

/// One hackathon summary as supplied by the catalog collaborator. The
/// discovery pipeline treats this as immutable input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackathonRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub organizer: String,
    pub location: String,
    pub category: Category,
    pub status: Status,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub prize_amount: Option<u64>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub registrations: Option<u64>,
}

impl HackathonRecord {
    /// Prize defaulting rule: an absent amount counts as 0 for range
    /// filters and prize sorts.
    pub fn prize(&self) -> u64 {
        self.prize_amount.unwrap_or(0)
    }

    /// Registration defaulting rule: absent counts as 0 for the popular
    /// sort.
    pub fn registration_count(&self) -> u64 {
        self.registrations.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip_through_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).expect("serialize");
            assert_eq!(json, format!("\"{}\"", category.label()));
            let back: Category = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, category);
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Live).unwrap(), "\"live\"");
        let parsed: Status = serde_json::from_str("\"past\"").unwrap();
        assert_eq!(parsed, Status::Past);
    }

    #[test]
    fn sort_key_parse_round_trips() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("newest"), None);
        assert_eq!(SortKey::default(), SortKey::Latest);
    }

    #[test]
    fn prize_ranges_are_contiguous_and_inclusive() {
        assert!(PRIZE_RANGES[0].contains(0));
        assert!(PRIZE_RANGES[0].contains(4_999));
        assert!(!PRIZE_RANGES[0].contains(5_000));
        assert!(PRIZE_RANGES[1].contains(5_000));
        assert!(PRIZE_RANGES[4].contains(50_000));
        assert!(PRIZE_RANGES[4].contains(u64::MAX));
        for window in PRIZE_RANGES.windows(2) {
            assert_eq!(window[0].max + 1, window[1].min);
        }
    }

    #[test]
    fn record_accepts_sparse_camel_case_payload() {
        let json = r#"{
            "id": "6f7c9a4e-8f8e-4f0a-9f57-0e6f2d9b5a01",
            "title": "Open Data Jam",
            "description": "Civic data weekend",
            "organizer": "City Lab",
            "location": "Lisbon",
            "category": "Social Impact",
            "status": "upcoming",
            "startDate": "2026-09-01T09:00:00Z",
            "endDate": "2026-09-03T18:00:00Z"
        }"#;
        let record: HackathonRecord = serde_json::from_str(json).expect("parse");
        assert_eq!(record.category, Category::SocialImpact);
        assert!(record.difficulty.is_none());
        assert!(record.mode.is_none());
        assert!(record.tags.is_empty());
        assert_eq!(record.prize(), 0);
        assert_eq!(record.registration_count(), 0);
    }
}
