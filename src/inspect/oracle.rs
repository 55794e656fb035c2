//! The structural emptiness test.
//!
//! Epistemic foundation:
//! - K_i: Total over every finite-depth view - no I/O, no failure modes
//! - K_i: Precedence is fixed: declared predicate, then reference, then shape
//! - B_i: Unclassifiable kinds might carry data, so they count as non-empty

use crate::inspect::view::{Inspect, View};

/// Decide whether `value` is structurally empty: whether omitting it from
/// a serialized document would lose no information.
///
/// Evaluation order, first match wins:
/// 1. a declared [`SelfEmpty`] predicate, unless the value is a reference;
/// 2. references: absent is empty, present delegates to the referent;
/// 3. strings by length;
/// 4. sequences and mappings by length alone, elements are never visited;
/// 5. numerics by exact zero;
/// 6. booleans by falseness;
/// 7. records by recursion over visible fields, hidden fields are skipped,
///    so a record with no visible fields is empty;
/// 8. anything else is non-empty.
///
/// [`SelfEmpty`]: crate::inspect::SelfEmpty
pub fn is_empty<T>(value: &T) -> bool
where
    T: Inspect + ?Sized,
{
    view_is_empty(value.view())
}

fn view_is_empty(view: View<'_>) -> bool {
    match view {
        View::Custom(predicate) => predicate.is_empty(),
        View::Reference(None) => true,
        View::Reference(Some(referent)) => view_is_empty(referent.view()),
        View::Text(text) => text.is_empty(),
        View::Sequence { len } | View::Mapping { len } => len == 0,
        View::Signed(n) => n == 0,
        View::Unsigned(n) => n == 0,
        View::Float(x) => x == 0.0,
        View::Boolean(b) => !b,
        View::Record(fields) => fields
            .iter()
            .filter(|field| field.is_visible())
            .all(|field| view_is_empty(field.value.view())),
        View::Opaque => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::view::{FieldView, SelfEmpty};
    use std::collections::{BTreeMap, HashMap};

    /// Zero is a legitimate value for this type; it is never empty.
    struct Epoch(i64);

    impl SelfEmpty for Epoch {
        fn is_empty(&self) -> bool {
            false
        }
    }

    impl Inspect for Epoch {
        fn view(&self) -> View<'_> {
            View::Custom(self)
        }
    }

    /// Structurally opaque enum with a declared predicate.
    enum Phase {
        Unset,
        Active,
    }

    impl SelfEmpty for Phase {
        fn is_empty(&self) -> bool {
            matches!(self, Phase::Unset)
        }
    }

    impl Inspect for Phase {
        fn view(&self) -> View<'_> {
            View::Custom(self)
        }
    }

    /// Record with one visible and one hidden field.
    struct Tagged {
        label: String,
        revision: u64,
    }

    impl Inspect for Tagged {
        fn view(&self) -> View<'_> {
            View::Record(vec![
                FieldView::visible("label", &self.label),
                FieldView::hidden("revision", &self.revision),
            ])
        }
    }

    /// Record whose fields are all hidden bookkeeping.
    struct Ledger {
        counter: u64,
    }

    impl Inspect for Ledger {
        fn view(&self) -> View<'_> {
            View::Record(vec![FieldView::hidden("counter", &self.counter)])
        }
    }

    /// Recursive record, nested through an optional box.
    struct Node {
        label: String,
        next: Option<Box<Node>>,
    }

    impl Inspect for Node {
        fn view(&self) -> View<'_> {
            View::Record(vec![
                FieldView::visible("label", &self.label),
                FieldView::visible("next", &self.next),
            ])
        }
    }

    /// Kind with no defined emptiness.
    struct Callback;

    impl Inspect for Callback {
        fn view(&self) -> View<'_> {
            View::Opaque
        }
    }

    #[test]
    fn strings_are_empty_iff_zero_length() {
        assert!(is_empty(""));
        assert!(is_empty(&String::new()));
        assert!(!is_empty("x"));
        assert!(!is_empty(&" ".to_string()));
    }

    #[test]
    fn numerics_are_empty_iff_exactly_zero() {
        assert!(is_empty(&0i64));
        assert!(is_empty(&0u32));
        assert!(is_empty(&0.0f64));
        assert!(is_empty(&0.0f32));
        assert!(!is_empty(&-1i32));
        assert!(!is_empty(&1u64));
        assert!(!is_empty(&0.1f64));
        assert!(!is_empty(&f64::EPSILON));
        assert!(!is_empty(&f64::NAN));
    }

    #[test]
    fn booleans_are_empty_iff_false() {
        assert!(is_empty(&false));
        assert!(!is_empty(&true));
    }

    #[test]
    fn containers_are_judged_by_length_alone() {
        assert!(is_empty(&Vec::<String>::new()));
        assert!(is_empty(&BTreeMap::<String, u64>::new()));
        assert!(is_empty(&HashMap::<String, String>::new()));

        // One element suffices, even when that element is itself empty.
        assert!(!is_empty(&vec![String::new()]));
        let mut map = BTreeMap::new();
        map.insert("rule".to_string(), String::new());
        assert!(!is_empty(&map));
    }

    #[test]
    fn absent_reference_is_empty_regardless_of_referent_type() {
        assert!(is_empty(&Option::<Epoch>::None));
        assert!(is_empty(&Option::<String>::None));
    }

    #[test]
    fn present_reference_delegates_to_the_referent() {
        // The referent's declared predicate wins over its structural zero.
        assert!(!is_empty(&Some(Epoch(0))));
        // Structural referents recurse as usual.
        assert!(is_empty(&Some(0u64)));
        assert!(!is_empty(&Some(7i32)));
    }

    #[test]
    fn declared_predicate_replaces_structural_recursion() {
        assert!(!is_empty(&Epoch(0)));
        assert!(is_empty(&Phase::Unset));
        assert!(!is_empty(&Phase::Active));
    }

    #[test]
    fn hidden_fields_never_influence_the_result() {
        let quiet = Tagged {
            label: String::new(),
            revision: 42,
        };
        assert!(is_empty(&quiet));

        let labeled = Tagged {
            label: "edge".to_string(),
            revision: 0,
        };
        assert!(!is_empty(&labeled));
    }

    #[test]
    fn record_with_only_hidden_fields_is_empty() {
        assert!(is_empty(&Ledger { counter: 7 }));
    }

    #[test]
    fn records_recurse_through_visible_fields() {
        let leaf = Node {
            label: String::new(),
            next: None,
        };
        assert!(is_empty(&leaf));

        let chain = Node {
            label: String::new(),
            next: Some(Box::new(Node {
                label: "tail".to_string(),
                next: None,
            })),
        };
        assert!(!is_empty(&chain));
    }

    #[test]
    fn unclassifiable_kinds_are_conservatively_non_empty() {
        assert!(!is_empty(&Callback));
    }
}
