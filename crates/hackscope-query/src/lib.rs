//! Search-query tokenizer, predicate evaluator, and sort strategies for
//! the hackathon discovery listing.
//!
//! Everything here is pure, synchronous, and total over its input: the
//! caller owns a [`FilterState`], the pipeline re-derives [`ParsedTokens`]
//! from the search text on every pass, and malformed input degrades to
//! "no constraint" rather than an error.

use std::collections::BTreeSet;

use hackscope_core::{HackathonRecord, SortKey, PRIZE_RANGES};
use serde::Serialize;

pub const CRATE_NAME: &str = "hackscope-query";

/// Filter selections owned by the presentation layer. Checkbox sets hold
/// the canonical labels the UI submits; prize selections are indices into
/// [`PRIZE_RANGES`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search_text: String,
    pub selected_categories: BTreeSet<String>,
    pub selected_statuses: BTreeSet<String>,
    pub selected_difficulties: BTreeSet<String>,
    pub selected_modes: BTreeSet<String>,
    pub selected_prize_ranges: BTreeSet<usize>,
    pub sort_by: SortKey,
}

/// Comparison operator accepted by `prize:` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrizeOp {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "=")]
    Eq,
}

impl PrizeOp {
    pub fn symbol(self) -> &'static str {
        match self {
            PrizeOp::Gt => ">",
            PrizeOp::Lt => "<",
            PrizeOp::Ge => ">=",
            PrizeOp::Le => "<=",
            PrizeOp::Eq => "=",
        }
    }

    fn holds(self, amount: u64, bound: u64) -> bool {
        match self {
            PrizeOp::Gt => amount > bound,
            PrizeOp::Lt => amount < bound,
            PrizeOp::Ge => amount >= bound,
            PrizeOp::Le => amount <= bound,
            PrizeOp::Eq => amount == bound,
        }
    }
}

/// Numeric prize constraint parsed from a `prize:` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrizeFilter {
    pub op: PrizeOp,
    pub amount: u64,
}

impl PrizeFilter {
    /// Parses the value part of a `prize:` token: an optional operator
    /// (`>=` when omitted) followed by one or more digits. Anything else
    /// is rejected and the whole token is dropped by the tokenizer.
    fn parse(value: &str) -> Option<PrizeFilter> {
        let value = value.trim();
        let (op, digits) = if let Some(rest) = value.strip_prefix(">=") {
            (PrizeOp::Ge, rest)
        } else if let Some(rest) = value.strip_prefix("<=") {
            (PrizeOp::Le, rest)
        } else if let Some(rest) = value.strip_prefix('>') {
            (PrizeOp::Gt, rest)
        } else if let Some(rest) = value.strip_prefix('<') {
            (PrizeOp::Lt, rest)
        } else if let Some(rest) = value.strip_prefix('=') {
            (PrizeOp::Eq, rest)
        } else {
            (PrizeOp::Ge, value)
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(|amount| PrizeFilter { op, amount })
    }

    pub fn matches(self, amount: u64) -> bool {
        self.op.holds(amount, self.amount)
    }
}

/// Structured tokens extracted from one search string, plus the residual
/// free text. A pure function of the input; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedTokens {
    pub text: String,
    pub status: Vec<String>,
    pub category: Vec<String>,
    pub difficulty: Vec<String>,
    pub mode: Vec<String>,
    pub organizer: Vec<String>,
    pub tag: Vec<String>,
    pub prize: Option<PrizeFilter>,
}

/// Splits a raw search string into structured filter tokens and residual
/// free text.
///
/// Tokens are whitespace-separated; each is split at its first `:`.
/// Unrecognized keys keep the whole token in the residual text, in order.
/// Recognized keys with an empty value are dropped, as are malformed
/// `prize:` tokens. `org:` is an alias for `organizer:`, and when several
/// `prize:` tokens appear the last one wins.
pub fn tokenize(raw: &str) -> ParsedTokens {
    let mut tokens = ParsedTokens::default();
    let mut residual: Vec<&str> = Vec::new();

    for word in raw.split_whitespace() {
        let Some((key, value)) = word.split_once(':') else {
            residual.push(word);
            continue;
        };
        match key.to_ascii_lowercase().as_str() {
            "status" => push_value(&mut tokens.status, value),
            "category" => push_value(&mut tokens.category, value),
            "difficulty" => push_value(&mut tokens.difficulty, value),
            "mode" => push_value(&mut tokens.mode, value),
            "organizer" | "org" => push_value(&mut tokens.organizer, value),
            "tag" => push_value(&mut tokens.tag, value),
            "prize" => {
                if let Some(filter) = PrizeFilter::parse(value) {
                    tokens.prize = Some(filter);
                }
            }
            _ => residual.push(word),
        }
    }

    tokens.text = residual.join(" ");
    tokens
}

fn push_value(seq: &mut Vec<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        seq.push(trimmed.to_string());
    }
}

/// Order-preserving filter pass: a record survives only if every active
/// field constraint matches.
pub fn filter_records(
    records: &[HackathonRecord],
    state: &FilterState,
    tokens: &ParsedTokens,
) -> Vec<HackathonRecord> {
    records
        .iter()
        .filter(|record| matches_record(record, state, tokens))
        .cloned()
        .collect()
}

fn matches_record(record: &HackathonRecord, state: &FilterState, tokens: &ParsedTokens) -> bool {
    categorical_matches(
        &state.selected_categories,
        &tokens.category,
        Some(record.category.label()),
    ) && categorical_matches(
        &state.selected_statuses,
        &tokens.status,
        Some(record.status.label()),
    ) && categorical_matches(
        &state.selected_difficulties,
        &tokens.difficulty,
        record.difficulty.map(|d| d.label()),
    ) && categorical_matches(
        &state.selected_modes,
        &tokens.mode,
        record.mode.map(|m| m.label()),
    ) && residual_text_matches(record, &tokens.text)
        && organizer_matches(record, &tokens.organizer)
        && tags_match(record, &tokens.tag)
        && prize_ranges_match(record, &state.selected_prize_ranges)
        && tokens.prize.map_or(true, |p| p.matches(record.prize()))
}

/// Checkbox membership and token equality are separate clauses: when both
/// sources are supplied for one field, the record must satisfy both. A
/// record missing an optional field fails any active constraint on it.
fn categorical_matches(selected: &BTreeSet<String>, tokens: &[String], label: Option<&str>) -> bool {
    let checkbox_ok = selected.is_empty() || label.map_or(false, |l| selected.contains(l));
    let token_ok = tokens.is_empty()
        || label.map_or(false, |l| tokens.iter().any(|t| l.eq_ignore_ascii_case(t)));
    checkbox_ok && token_ok
}

fn residual_text_matches(record: &HackathonRecord, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
        || record.organizer.to_lowercase().contains(&needle)
        || record.location.to_lowercase().contains(&needle)
        || record.tags.iter().any(|tag| tag.to_lowercase() == needle)
}

fn organizer_matches(record: &HackathonRecord, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let organizer = record.organizer.to_lowercase();
    tokens.iter().any(|t| organizer.contains(&t.to_lowercase()))
}

fn tags_match(record: &HackathonRecord, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    record
        .tags
        .iter()
        .any(|tag| tokens.iter().any(|t| tag.eq_ignore_ascii_case(t)))
}

fn prize_ranges_match(record: &HackathonRecord, selected: &BTreeSet<usize>) -> bool {
    if selected.is_empty() {
        return true;
    }
    let amount = record.prize();
    selected
        .iter()
        .any(|&idx| PRIZE_RANGES.get(idx).map_or(false, |range| range.contains(amount)))
}

/// Returns a new ordering of `records` under the given strategy; the
/// input is never mutated. All strategies sort stably, so ties keep
/// their relative input order.
pub fn sort_records(records: &[HackathonRecord], key: SortKey) -> Vec<HackathonRecord> {
    let mut out = records.to_vec();
    match key {
        SortKey::Latest => out.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
        SortKey::EndingSoon => out.sort_by(|a, b| a.end_date.cmp(&b.end_date)),
        SortKey::PrizeDesc => out.sort_by(|a, b| b.prize().cmp(&a.prize())),
        SortKey::PrizeAsc => out.sort_by(|a, b| a.prize().cmp(&b.prize())),
        SortKey::Popular => out.sort_by(|a, b| b.registration_count().cmp(&a.registration_count())),
    }
    out
}

/// One discovery pass: the ordered matches plus the token state the
/// presentation layer renders as active-filter chips and result counts.
#[derive(Debug, Clone, Serialize)]
pub struct Discovery {
    pub tokens: ParsedTokens,
    pub records: Vec<HackathonRecord>,
}

pub fn discover(records: &[HackathonRecord], state: &FilterState) -> Discovery {
    let tokens = tokenize(&state.search_text);
    let filtered = filter_records(records, state, &tokens);
    let records = sort_records(&filtered, state.sort_by);
    Discovery { tokens, records }
}
