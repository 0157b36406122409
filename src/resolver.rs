use crate::concept::ConceptRef;
use crate::node::Node;

/// Find the concept a link points to.
///
/// This is a loose heuristic: the first candidate whose `code` occurs anywhere
/// in the raw destination wins, so candidate order matters when codes overlap
/// (`abc` vs `abcd`). Destinations are not parsed as URIs.
pub fn resolve<'a>(link: &Node, candidates: &'a [ConceptRef]) -> Option<&'a ConceptRef> {
    resolve_destination(link.destination()?, candidates)
}

/// Same scan as [`resolve`], over a bare destination string.
pub fn resolve_destination<'a>(
    destination: &str,
    candidates: &'a [ConceptRef],
) -> Option<&'a ConceptRef> {
    if destination.is_empty() {
        return None;
    }

    // An empty code is a substring of everything
    let target = candidates
        .iter()
        .find(|concept| !concept.code.is_empty() && destination.contains(concept.code.as_str()));

    match target {
        Some(concept) => tracing::trace!(destination, code = %concept.code, "resolved link"),
        None => tracing::trace!(destination, "link matches no related concept"),
    }
    target
}
