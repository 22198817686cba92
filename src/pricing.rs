//! # Pricing Module
//!
//! Static per-token prices (USD) used to estimate the cost of aggregated usage.
//!
//! Lookup order:
//! 1. Environment override, when all four of `CLAUDE_PRICE_INPUT`,
//!    `CLAUDE_PRICE_OUTPUT`, `CLAUDE_PRICE_CACHE_CREATE` and
//!    `CLAUDE_PRICE_CACHE_READ` parse
//! 2. Exact model ids
//! 3. Known variants, then family names (opus, sonnet, haiku)
//!
//! Cache writes cost 1.25x the input price and cache reads 0.1x.

use std::env;

use crate::usage::Usage;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pricing {
    pub in_per_tok: f64,
    pub out_per_tok: f64,
    pub cache_create_per_tok: f64,
    pub cache_read_per_tok: f64,
}

impl Pricing {
    /// Prices derived from input/output rates in USD per million tokens.
    pub const fn per_million(input: f64, output: f64) -> Self {
        let in_pt = input / 1e6;
        Self {
            in_per_tok: in_pt,
            out_per_tok: output / 1e6,
            cache_create_per_tok: in_pt * 1.25,
            cache_read_per_tok: in_pt * 0.1,
        }
    }

    pub fn cost(&self, usage: &Usage) -> f64 {
        usage.input_tokens as f64 * self.in_per_tok
            + usage.output_tokens as f64 * self.out_per_tok
            + usage.cache_write_tokens as f64 * self.cache_create_per_tok
            + usage.cache_read_tokens as f64 * self.cache_read_per_tok
    }
}

const OPUS: Pricing = Pricing::per_million(15.0, 75.0);
const SONNET: Pricing = Pricing::per_million(3.0, 15.0);
const HAIKU_3_5: Pricing = Pricing::per_million(0.8, 4.0);
const HAIKU_3: Pricing = Pricing::per_million(0.25, 1.25);

const EXACT: &[(&str, Pricing)] = &[
    ("claude-opus-4-1-20250805", OPUS),
    ("claude-opus-4-20250514", OPUS),
    ("claude-sonnet-4-20250514", SONNET),
    ("claude-3-7-sonnet-20250219", SONNET),
    ("claude-3-5-haiku-20241022", HAIKU_3_5),
];

fn env_override() -> Option<Pricing> {
    let var = |name: &str| env::var(name).ok()?.trim().parse::<f64>().ok();
    Some(Pricing {
        in_per_tok: var("CLAUDE_PRICE_INPUT")?,
        out_per_tok: var("CLAUDE_PRICE_OUTPUT")?,
        cache_create_per_tok: var("CLAUDE_PRICE_CACHE_CREATE")?,
        cache_read_per_tok: var("CLAUDE_PRICE_CACHE_READ")?,
    })
}

pub(crate) fn static_pricing_lookup(model_id: &str) -> Option<Pricing> {
    let m = model_id.to_lowercase();
    if let Some((_, p)) = EXACT.iter().find(|(id, _)| *id == m) {
        return Some(*p);
    }
    // Bedrock/Vertex ids wrap the same names ("us.anthropic.claude-opus-4-1-...", "...@20250514")
    if m.contains("opus-4") || m.contains("4-opus") {
        return Some(OPUS);
    }
    if m.contains("sonnet-4")
        || m.contains("4-sonnet")
        || m.contains("3-7-sonnet")
        || m.contains("3-5-sonnet")
    {
        return Some(SONNET);
    }
    if m.contains("3-5-haiku") {
        return Some(HAIKU_3_5);
    }
    None
}

pub fn pricing_for_model(model_id: &str) -> Option<Pricing> {
    if let Some(p) = env_override() {
        return Some(p);
    }
    if let Some(p) = static_pricing_lookup(model_id) {
        return Some(p);
    }
    let m = model_id.to_lowercase();
    if m.contains("opus") {
        Some(OPUS)
    } else if m.contains("sonnet") {
        Some(SONNET)
    } else if m.contains("haiku") {
        Some(HAIKU_3)
    } else {
        None
    }
}
