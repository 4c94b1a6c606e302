//! Short-name resolution against catalog paths

/// Resolve a possibly partially qualified object name to a catalog path.
///
/// A name with two dots must match a path exactly. Anything shorter matches
/// a path under `<database>.` whose trailing segments equal the name; an
/// empty `database` leaves the search unscoped. The first match in `paths`
/// order wins, so an ambiguous short name resolves to the earliest candidate.
/// Returns an empty string when nothing matches.
///
/// Matching is by whole segments, unlike a plain string suffix: `t` matches
/// `db.s.t` but not `db.s.at`.
pub fn resolve_name<S: AsRef<str>>(name: &str, database: &str, paths: &[S]) -> String {
    candidates(name, database, paths)
        .first()
        .map(|p| p.to_string())
        .unwrap_or_default()
}

/// Every path `name` matches, in `paths` order. More than one entry means the
/// name is ambiguous and [`resolve_name`] picked the first.
pub fn candidates<'a, S: AsRef<str>>(name: &str, database: &str, paths: &'a [S]) -> Vec<&'a str> {
    if name.is_empty() {
        return Vec::new();
    }

    let exact = name.matches('.').count() == 2;
    let scope = format!("{}.", database);
    let suffix = format!(".{}", name);

    paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| {
            if exact {
                *p == name
            } else {
                (database.is_empty() || p.starts_with(&scope)) && p.ends_with(&suffix)
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
