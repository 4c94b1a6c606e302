//! Collapsing of computed expressions
//!
//! `CASE ... END` and `FUNCTION ( ... )` spans become a single identifier
//! feature carrying the expression text and the columns it reads. CASE runs
//! first so that a CASE nested in a function call is already collapsed when
//! the function span absorbs it.

use indexmap::IndexSet;

use crate::feature::{compact, Feature, FeatureKind};

/// Absorb `features[start..]` into the span opened at `open`, up to and
/// including the first feature matching `is_end`. Without a terminator the
/// span runs to the end of the sequence.
fn absorb_span(
    features: &mut [Feature],
    open: usize,
    start: usize,
    is_end: impl Fn(&Feature) -> bool,
) {
    let mut text = vec![features[open].text.clone()];
    let mut refs: IndexSet<String> = IndexSet::new();

    for feature in features[start..].iter_mut() {
        if feature.is_consumed() {
            continue;
        }

        if feature.is_transformation() {
            text.push(feature.transformation_text.clone());
            refs.extend(feature.transformation_refs.iter().cloned());
        } else {
            text.push(feature.text.clone());
            if feature.kind == FeatureKind::Identifier {
                refs.insert(feature.text.clone());
            }
        }

        let done = is_end(feature);
        feature.consume();
        if done {
            break;
        }
    }

    let head = &mut features[open];
    head.kind = FeatureKind::Identifier;
    head.path = head.text.clone();
    head.transformation_text = text.join(" ");
    head.transformation_refs = refs.into_iter().collect();
}

/// Collapse every `CASE ... END` span. The closing `END` is the first one at
/// the depth of the opening `CASE`.
pub fn collapse_case(mut features: Vec<Feature>) -> Vec<Feature> {
    for i in 0..features.len() {
        if !(features[i].is(&FeatureKind::Keyword) && features[i].text_is("case")) {
            continue;
        }
        let depth = features[i].depth();
        absorb_span(&mut features, i, i + 1, |f| {
            f.depth() == depth && f.text_is("end")
        });
    }
    compact(features)
}

/// Collapse every `name ( ... )` call. The closing bracket is the first end
/// bracket at the depth of the opening one.
pub fn collapse_functions(mut features: Vec<Feature>) -> Vec<Feature> {
    for i in 0..features.len() {
        let is_call = features[i].is(&FeatureKind::FunctionName)
            && features
                .get(i + 1)
                .is_some_and(|f| f.is(&FeatureKind::StartBracket));
        if !is_call {
            continue;
        }
        let depth = features[i + 1].depth();
        absorb_span(&mut features, i, i + 1, |f| {
            f.kind == FeatureKind::EndBracket && f.depth() == depth
        });
    }
    compact(features)
}

/// CASE pass then FUNCTION pass
pub fn extract_transformations(features: Vec<Feature>) -> Vec<Feature> {
    collapse_functions(collapse_case(features))
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
