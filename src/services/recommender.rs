use crate::models::{FilterCriteria, Product, ScoredRecommendation};

/// Score attached to products that passed an active filter
const MATCH_SCORE: f64 = 0.6;
/// Score attached to unfiltered "popular choice" products
const POPULAR_SCORE: f64 = 0.5;
/// How many catalog-order products the fallback branch returns
const FALLBACK_LIMIT: usize = 10;

const MATCH_REASON: &str = "Matches your preferences";
const POPULAR_REASON: &str = "Popular choice";

/// Filters and scores catalog products against the given criteria
///
/// Two explicit branches: the filtered set (category, max-price, and brand
/// constraints applied in that order), or, when that set comes up empty, a
/// fallback slice of the first ten catalog-order products so the caller never
/// gets nothing from a non-empty catalog. The min-price bound is applied last,
/// to whichever branch was taken, and may legitimately empty the result.
///
/// Catalog order is preserved throughout; no ranking is applied. Absent or
/// malformed criteria fields simply mean "no constraint".
pub fn score_and_filter(
    products: &[Product],
    criteria: &FilterCriteria,
) -> Vec<ScoredRecommendation> {
    let filtered = filtered_set(products, criteria);
    let shaped = if filtered.is_empty() {
        fallback_set(products)
    } else {
        filtered
    };

    match criteria.min_price {
        Some(min) => shaped
            .into_iter()
            .filter(|r| r.price.map_or(true, |p| p >= min))
            .collect(),
        None => shaped,
    }
}

/// First `limit` catalog-order products shaped as baseline recommendations
///
/// The "trending" slice used when no preference data is in play.
pub fn popular_products(products: &[Product], limit: usize) -> Vec<ScoredRecommendation> {
    products
        .iter()
        .take(limit)
        .map(|p| shape(p, POPULAR_SCORE, POPULAR_REASON))
        .collect()
}

/// Upper price bound of a free-text budget, e.g. "25000" or "1000-5000"
///
/// A range yields its upper bound; anything unparseable means no bound.
pub fn parse_budget(budget_range: Option<&str>) -> Option<f64> {
    let s = budget_range?.trim();
    if let Some((_, upper)) = s.split_once('-') {
        if let Ok(max) = upper.trim().parse::<f64>() {
            return Some(max);
        }
    }
    s.parse::<f64>().ok()
}

fn filtered_set(products: &[Product], criteria: &FilterCriteria) -> Vec<ScoredRecommendation> {
    let brands: Vec<String> = criteria
        .preferred_brands
        .iter()
        .map(|b| b.to_lowercase())
        .collect();
    let filters_active = !brands.is_empty() || criteria.max_price.is_some();
    let (score, reason) = if filters_active {
        (MATCH_SCORE, MATCH_REASON)
    } else {
        (POPULAR_SCORE, POPULAR_REASON)
    };

    products
        .iter()
        .filter(|p| {
            criteria
                .category
                .as_deref()
                .map_or(true, |c| p.category == c)
        })
        .filter(|p| match (criteria.max_price, p.price) {
            (Some(max), Some(price)) => price <= max,
            _ => true,
        })
        .filter(|p| {
            brands.is_empty() || {
                let brand = p.brand.as_deref().unwrap_or("").to_lowercase();
                brands.iter().any(|b| brand.contains(b.as_str()))
            }
        })
        .map(|p| shape(p, score, reason))
        .collect()
}

fn fallback_set(products: &[Product]) -> Vec<ScoredRecommendation> {
    popular_products(products, FALLBACK_LIMIT)
}

fn shape(product: &Product, score: f64, reason: &str) -> ScoredRecommendation {
    ScoredRecommendation {
        id: product.id,
        name: product.name.clone(),
        brand: product.brand.clone(),
        category: product.category.clone(),
        price: product.price,
        score,
        reasons: vec![reason.to_string()],
        image_url: product.image_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, brand: &str, category: &str, price: Option<f64>) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: Some(brand.to_string()),
            category: category.to_string(),
            price,
            image_url: None,
        }
    }

    #[test]
    fn test_max_price_keeps_matching_products() {
        // Concrete scenario: Acme at 10 passes, Beta at 100 is excluded.
        let products = vec![
            product(1, "A", "Acme", "skincare", Some(10.0)),
            product(2, "B", "Beta", "skincare", Some(100.0)),
        ];
        let criteria = FilterCriteria {
            max_price: Some(50.0),
            ..Default::default()
        };

        let result = score_and_filter(&products, &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "A");
        assert_eq!(result[0].score, 0.6);
        assert_eq!(result[0].reasons, vec!["Matches your preferences"]);
    }

    #[test]
    fn test_over_constrained_filters_fall_back_to_popular() {
        let products = vec![product(1, "A", "Acme", "skincare", Some(200.0))];
        let criteria = FilterCriteria {
            max_price: Some(50.0),
            ..Default::default()
        };

        let result = score_and_filter(&products, &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "A");
        assert_eq!(result[0].score, 0.5);
        assert_eq!(result[0].reasons, vec!["Popular choice"]);
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let criteria = FilterCriteria {
            max_price: Some(50.0),
            ..Default::default()
        };
        assert!(score_and_filter(&[], &criteria).is_empty());
    }

    #[test]
    fn test_no_criteria_passes_everything_at_baseline_score() {
        let products = vec![
            product(1, "A", "Acme", "skincare", Some(10.0)),
            product(2, "B", "Beta", "makeup", None),
        ];

        let result = score_and_filter(&products, &FilterCriteria::default());

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.score == 0.5));
        assert!(result.iter().all(|r| r.reasons == vec!["Popular choice"]));
    }

    #[test]
    fn test_brand_match_is_case_insensitive_substring() {
        let products = vec![
            product(1, "Serum", "The Ordinary", "skincare", Some(12.0)),
            product(2, "Cream", "CeraVe", "skincare", Some(15.0)),
        ];
        let criteria = FilterCriteria {
            preferred_brands: vec!["ORDINARY".to_string()],
            ..Default::default()
        };

        let result = score_and_filter(&products, &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Serum");
        assert_eq!(result[0].score, 0.6);
    }

    #[test]
    fn test_brandless_product_fails_brand_filter() {
        let mut no_brand = product(1, "Mystery", "", "skincare", Some(9.0));
        no_brand.brand = None;
        let branded = product(2, "Serum", "Acme", "skincare", Some(9.0));
        let criteria = FilterCriteria {
            preferred_brands: vec!["acme".to_string()],
            ..Default::default()
        };

        let result = score_and_filter(&[no_brand, branded], &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_null_price_passes_max_price_filter() {
        let products = vec![product(1, "A", "Acme", "skincare", None)];
        let criteria = FilterCriteria {
            max_price: Some(1.0),
            ..Default::default()
        };

        let result = score_and_filter(&products, &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].score, 0.6);
    }

    #[test]
    fn test_category_match_is_exact_and_case_sensitive() {
        let products = vec![
            product(1, "A", "Acme", "Skincare", Some(10.0)),
            product(2, "B", "Acme", "skincare", Some(10.0)),
        ];
        let criteria = FilterCriteria {
            category: Some("skincare".to_string()),
            max_price: Some(50.0),
            ..Default::default()
        };

        let result = score_and_filter(&products, &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_min_price_post_filter_keeps_null_prices() {
        let products = vec![
            product(1, "A", "Acme", "skincare", Some(5.0)),
            product(2, "B", "Acme", "skincare", Some(20.0)),
            product(3, "C", "Acme", "skincare", None),
        ];
        let criteria = FilterCriteria {
            min_price: Some(10.0),
            max_price: Some(50.0),
            ..Default::default()
        };

        let result = score_and_filter(&products, &criteria);

        let ids: Vec<i64> = result.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_min_price_also_applies_to_fallback() {
        // Filters match nothing, fallback kicks in, then the min bound empties it.
        let products = vec![product(1, "A", "Acme", "skincare", Some(5.0))];
        let criteria = FilterCriteria {
            preferred_brands: vec!["beta".to_string()],
            min_price: Some(100.0),
            ..Default::default()
        };

        assert!(score_and_filter(&products, &criteria).is_empty());
    }

    #[test]
    fn test_fallback_is_capped_at_ten_catalog_order() {
        let products: Vec<Product> = (1..=12)
            .map(|i| product(i, &format!("P{}", i), "Acme", "skincare", Some(500.0)))
            .collect();
        let criteria = FilterCriteria {
            max_price: Some(1.0),
            ..Default::default()
        };

        let result = score_and_filter(&products, &criteria);

        assert_eq!(result.len(), 10);
        let ids: Vec<i64> = result.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    }

    #[test]
    fn test_scores_are_deterministic() {
        let products = vec![
            product(1, "A", "Acme", "skincare", Some(10.0)),
            product(2, "B", "Beta", "makeup", Some(30.0)),
        ];
        let criteria = FilterCriteria {
            preferred_brands: vec!["acme".to_string(), "beta".to_string()],
            ..Default::default()
        };

        let first = score_and_filter(&products, &criteria);
        let second = score_and_filter(&products, &criteria);
        assert_eq!(first, second);
        assert!(first.iter().all(|r| (0.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn test_popular_products_respects_limit_and_order() {
        let products: Vec<Product> = (1..=5)
            .map(|i| product(i, &format!("P{}", i), "Acme", "skincare", Some(10.0)))
            .collect();

        let result = popular_products(&products, 3);

        let ids: Vec<i64> = result.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(result.iter().all(|r| r.score == 0.5));
    }

    #[test]
    fn test_parse_budget_accepts_plain_and_range_formats() {
        assert_eq!(parse_budget(Some("25000")), Some(25000.0));
        assert_eq!(parse_budget(Some("1000-5000")), Some(5000.0));
        assert_eq!(parse_budget(Some(" 1000 - 5000 ")), Some(5000.0));
    }

    #[test]
    fn test_parse_budget_rejects_garbage() {
        assert_eq!(parse_budget(None), None);
        assert_eq!(parse_budget(Some("")), None);
        assert_eq!(parse_budget(Some("cheap")), None);
        assert_eq!(parse_budget(Some("low-high")), None);
    }
}
