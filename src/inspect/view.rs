//! Structural views over inspectable values.
//!
//! Epistemic foundation:
//! - K_i: The set of structural kinds is closed - `View` enumerates every
//!   shape the emptiness oracle can reason about
//! - K_i: Hidden fields are declared in the schema, not inferred from naming
//! - I^R: Types opt out of structural recursion by presenting `View::Custom`

use std::collections::{BTreeMap, HashMap};

/// Declared-emptiness capability: a type that carries its own predicate
/// instead of being judged by shape.
///
/// A reference holding no referent is empty regardless of any predicate;
/// a present referent is judged by the predicate the referent declares.
pub trait SelfEmpty {
    /// True when omitting this value from a serialized document loses
    /// no information.
    fn is_empty(&self) -> bool;
}

/// Whether a record field participates in emptiness evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Part of the serialized document; inspected during recursion.
    Visible,
    /// Internal bookkeeping; never inspected, never serialized.
    Hidden,
}

/// One named field of a record, as exposed to the oracle.
pub struct FieldView<'a> {
    /// Field name, for diagnostics only
    pub name: &'static str,
    /// Visibility tag checked while enumerating fields
    pub visibility: Visibility,
    /// The field value
    pub value: &'a dyn Inspect,
}

impl<'a> FieldView<'a> {
    /// A field that participates in emptiness evaluation.
    pub fn visible(name: &'static str, value: &'a dyn Inspect) -> Self {
        Self {
            name,
            visibility: Visibility::Visible,
            value,
        }
    }

    /// An internal bookkeeping field the oracle must skip.
    pub fn hidden(name: &'static str, value: &'a dyn Inspect) -> Self {
        Self {
            name,
            visibility: Visibility::Hidden,
            value,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// Structural view of a value: the closed set of kinds the emptiness
/// oracle inspects.
///
/// Sequences and mappings expose only their length. Their elements are
/// never visited, so element types need not implement [`Inspect`] at all.
pub enum View<'a> {
    /// The value declares its own predicate; structure is not consulted.
    Custom(&'a dyn SelfEmpty),
    /// Optional indirection: absence is itself empty.
    Reference(Option<&'a dyn Inspect>),
    /// String-like value, judged by length.
    Text(&'a str),
    /// Ordered collection, judged by length alone.
    Sequence { len: usize },
    /// Associative collection, judged by length alone.
    Mapping { len: usize },
    /// Signed integer, widened.
    Signed(i64),
    /// Unsigned integer, widened.
    Unsigned(u64),
    /// Floating point, widened.
    Float(f64),
    Boolean(bool),
    /// Named fields, each tagged visible or hidden.
    Record(Vec<FieldView<'a>>),
    /// No defined emptiness; conservatively treated as non-empty.
    Opaque,
}

/// A value the emptiness oracle can inspect.
///
/// Views borrow from `self`, so producing one never allocates beyond the
/// field list of a record and never clones the underlying data.
///
/// Implementations must present finite-depth structure. The oracle does
/// not guard against reference cycles; none of the impls in this crate
/// can produce one.
pub trait Inspect {
    /// Expose the structural view of this value.
    fn view(&self) -> View<'_>;
}

impl Inspect for String {
    fn view(&self) -> View<'_> {
        View::Text(self)
    }
}

impl Inspect for str {
    fn view(&self) -> View<'_> {
        View::Text(self)
    }
}

impl Inspect for bool {
    fn view(&self) -> View<'_> {
        View::Boolean(*self)
    }
}

macro_rules! inspect_signed {
    ($($ty:ty)*) => {$(
        impl Inspect for $ty {
            fn view(&self) -> View<'_> {
                View::Signed(i64::from(*self))
            }
        }
    )*};
}

macro_rules! inspect_unsigned {
    ($($ty:ty)*) => {$(
        impl Inspect for $ty {
            fn view(&self) -> View<'_> {
                View::Unsigned(u64::from(*self))
            }
        }
    )*};
}

inspect_signed!(i8 i16 i32 i64);
inspect_unsigned!(u8 u16 u32 u64);

impl Inspect for f32 {
    fn view(&self) -> View<'_> {
        View::Float(f64::from(*self))
    }
}

impl Inspect for f64 {
    fn view(&self) -> View<'_> {
        View::Float(*self)
    }
}

/// `Option` is the canonical reference kind. It always views as a
/// reference, so a present referent with a declared predicate is still
/// reached through the reference rule first.
impl<T: Inspect> Inspect for Option<T> {
    fn view(&self) -> View<'_> {
        View::Reference(self.as_ref().map(|value| value as &dyn Inspect))
    }
}

/// Owned indirection is transparent: a box always holds its referent.
impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn view(&self) -> View<'_> {
        (**self).view()
    }
}

impl<T> Inspect for Vec<T> {
    fn view(&self) -> View<'_> {
        View::Sequence { len: self.len() }
    }
}

impl<K, V> Inspect for BTreeMap<K, V> {
    fn view(&self) -> View<'_> {
        View::Mapping { len: self.len() }
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S> {
    fn view(&self) -> View<'_> {
        View::Mapping { len: self.len() }
    }
}
