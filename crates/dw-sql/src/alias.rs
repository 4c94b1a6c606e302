//! Alias resolution over compressed features

use crate::feature::{compact, Feature, FeatureKind};

/// Attach aliases to the identifier that precedes them.
///
/// `name alias` and `name AS alias` both set `alias` on `name` and consume
/// the alias (and the `AS`). A consumed alias never starts another pair.
pub fn resolve_aliases(mut features: Vec<Feature>) -> Vec<Feature> {
    let mut i = 0;
    while i + 1 < features.len() {
        if !features[i].is(&FeatureKind::Identifier) {
            i += 1;
            continue;
        }

        if features[i + 1].is(&FeatureKind::Identifier) {
            let alias = features[i + 1].text.clone();
            features[i].alias = alias;
            features[i + 1].consume();
            i += 2;
            continue;
        }

        let has_as = features[i + 1].is(&FeatureKind::Keyword) && features[i + 1].text_is("as");
        if has_as && features.get(i + 2).is_some_and(|f| f.is(&FeatureKind::Identifier)) {
            let alias = features[i + 2].text.clone();
            features[i].alias = alias;
            features[i + 1].consume();
            features[i + 2].consume();
            i += 3;
            continue;
        }

        i += 1;
    }
    compact(features)
}

#[cfg(test)]
#[path = "alias_test.rs"]
mod tests;
