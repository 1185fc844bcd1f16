use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::core::distance::display_distance_km;
use crate::models::{Candidate, Coordinate, RankedCandidate, SortKey};

/// Attach the display distance to every candidate
///
/// The distance is `None` when either the origin or the candidate's
/// coordinate is unknown.
pub fn annotate<A: Clone>(
    candidates: &[Candidate<A>],
    origin: Option<Coordinate>,
) -> Vec<RankedCandidate<A>> {
    candidates
        .iter()
        .map(|candidate| {
            let distance_km = match (origin, candidate.coordinate) {
                (Some(origin), Some(coordinate)) => Some(display_distance_km(origin, coordinate)),
                _ => None,
            };

            RankedCandidate {
                candidate: candidate.clone(),
                distance_km,
            }
        })
        .collect()
}

/// Annotate and order candidates by the given key
///
/// `sort_by` is stable, so candidates that compare equal under `key`
/// keep their input order.
pub fn rank<A: Clone>(
    candidates: &[Candidate<A>],
    origin: Option<Coordinate>,
    key: SortKey,
) -> Vec<RankedCandidate<A>> {
    let mut ranked = annotate(candidates, origin);

    match key {
        SortKey::Distance => ranked.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km)),
        SortKey::Rating => {
            ranked.sort_by(|a, b| compare_rating(a.candidate.rating, b.candidate.rating))
        }
        SortKey::Name => ranked.sort_by(|a, b| compare_name(&a.candidate.name, &b.candidate.name)),
    }

    ranked
}

/// Nearest first; unknown distances after every known one
#[inline]
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Highest first; unrated after every rated one, including an explicit 0
#[inline]
fn compare_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Alphabetical order in the style of a locale collator
///
/// Names compare on their base letters first, ignoring case and accents,
/// so "Éclair" sorts among the e's. Names with the same base letters are
/// then ordered by accents, unaccented first. Case alone never separates
/// two names.
fn compare_name(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}
