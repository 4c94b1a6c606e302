//! Fusion of dotted identifiers
//!
//! `db . schema . table` arrives as five features whose grouping depends on
//! how the parser nested them. Fusing adjacent `identifier dot identifier`
//! triples until nothing changes yields one identifier per qualified name
//! regardless of that nesting.

use crate::feature::{compact, Feature, FeatureKind};

/// One left-to-right fusion pass followed by compaction
fn compress_pass(mut features: Vec<Feature>) -> Vec<Feature> {
    let mut i = 0;
    while i + 2 < features.len() {
        let fusable = features[i].is(&FeatureKind::Identifier)
            && features[i + 1].is(&FeatureKind::Dot)
            && features[i + 2].is(&FeatureKind::Identifier);

        if fusable {
            let fused = format!("{}.{}", features[i].text, features[i + 2].text);
            let head = &mut features[i];
            head.path = fused.clone();
            head.alias = fused.clone();
            head.text = fused;
            features[i + 1].consume();
            features[i + 2].consume();
            i += 3;
        } else {
            i += 1;
        }
    }
    compact(features)
}

/// Run fusion passes until the feature count stops shrinking.
///
/// Every pass either removes features or leaves the sequence unchanged, so
/// the loop terminates.
pub fn compress_identifiers(mut features: Vec<Feature>) -> Vec<Feature> {
    loop {
        let before = features.len();
        features = compress_pass(features);
        if features.len() == before {
            return features;
        }
    }
}

#[cfg(test)]
#[path = "compress_test.rs"]
mod tests;
