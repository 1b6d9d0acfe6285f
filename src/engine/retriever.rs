use greenbook_store::BusinessCatalog;
use greenbook_types::Business;
use tracing::{debug, info};

use super::EngineError;
use super::config::EngineConfig;

/// Added when the whole query appears in the business name.
const NAME_BOOST: u32 = 5;
/// Added when the whole query appears in the category name.
const CATEGORY_BOOST: u32 = 3;

/// A business paired with its keyword score for one query.
#[derive(Debug, Clone)]
pub struct ScoredBusiness<'a> {
    pub business: &'a Business,
    pub score: u32,
}

/// Lower-cased, whitespace-split, de-duplicated query tokens.
pub fn keywords(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in query.to_lowercase().split_whitespace() {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// Score one business.
///
/// +1 per keyword found anywhere in name/description/category/address,
/// +5 if the full query is inside the name, +3 if inside the category.
pub fn score_business(query_lower: &str, keywords: &[String], business: &Business) -> u32 {
    let search_text = format!(
        "{} {} {} {}",
        business.name, business.description, business.category.name, business.address
    )
    .to_lowercase();

    let mut score = keywords
        .iter()
        .filter(|k| search_text.contains(k.as_str()))
        .count() as u32;

    if business.name.to_lowercase().contains(query_lower) {
        score += NAME_BOOST;
    }
    if business.category.name.to_lowercase().contains(query_lower) {
        score += CATEGORY_BOOST;
    }

    score
}

/// Rank the corpus against `query`, best first, at most `top_k` entries.
///
/// Zero-score businesses are dropped. Equal scores keep corpus order.
/// A blank query matches nothing.
pub fn rank<'a>(query: &str, corpus: &'a [Business], top_k: usize) -> Vec<ScoredBusiness<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let keywords = keywords(query);

    let mut scored: Vec<ScoredBusiness<'a>> = corpus
        .iter()
        .map(|business| ScoredBusiness {
            business,
            score: score_business(&query_lower, &keywords, business),
        })
        .filter(|s| s.score > 0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_k);
    scored
}

/// Top-K relevant businesses for `query`, cloned out of the corpus.
pub fn score(query: &str, corpus: &[Business], top_k: usize) -> Vec<Business> {
    rank(query, corpus, top_k)
        .into_iter()
        .map(|s| s.business.clone())
        .collect()
}

/// 1. Load the full corpus
/// 2. Keyword-score it against the query
/// 3. Fall back to the first N businesses when nothing matched
pub async fn retrieve(
    query: &str,
    catalog: &dyn BusinessCatalog,
    config: &EngineConfig,
) -> Result<Vec<Business>, EngineError> {
    let corpus = catalog.list_with_category().await?;
    let matches = score(query, &corpus, config.top_k);

    if !matches.is_empty() {
        debug!(corpus = corpus.len(), matched = matches.len(), "keyword scoring");
        return Ok(matches);
    }

    info!(query, "no keyword matches, using fallback businesses");
    fallback(catalog, config.fallback_limit).await
}

/// First `limit` businesses in store order. No ranking.
pub async fn fallback(
    catalog: &dyn BusinessCatalog,
    limit: usize,
) -> Result<Vec<Business>, EngineError> {
    Ok(catalog.list_first(limit).await?)
}
