// THEORY:
// Comparison of loosely typed values. A `Primitive` is a tagged union over the
// scalar kinds a caller may mix in one collection; comparing two values of the
// same kind uses that kind's natural order, while comparing across kinds is a
// caller error that is logged and treated as a tie so sorting can continue.
//
// `ArrayComparator` orders whole sequences: longer sequences first, then by the
// net result of element-wise comparison.

use std::cmp::Ordering;
use std::fmt;
use tracing::warn;

/// A single scalar value of one of the supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Str(String),
}

impl Primitive {
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Bool(_) => "bool",
            Primitive::Byte(_) => "byte",
            Primitive::Short(_) => "short",
            Primitive::Int(_) => "int",
            Primitive::Long(_) => "long",
            Primitive::Float(_) => "float",
            Primitive::Double(_) => "double",
            Primitive::Char(_) => "char",
            Primitive::Str(_) => "string",
        }
    }

    pub fn same_kind(&self, other: &Primitive) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(v) => write!(f, "{}", v),
            Primitive::Byte(v) => write!(f, "{}", v),
            Primitive::Short(v) => write!(f, "{}", v),
            Primitive::Int(v) => write!(f, "{}", v),
            Primitive::Long(v) => write!(f, "{}", v),
            Primitive::Float(v) => write!(f, "{}", v),
            Primitive::Double(v) => write!(f, "{}", v),
            Primitive::Char(v) => write!(f, "{}", v),
            Primitive::Str(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! primitive_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(value: $ty) -> Self {
                    Primitive::$variant(value.into())
                }
            }
        )*
    };
}

primitive_from!(
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => Str,
    &str => Str,
);

/// Compares two primitives of the same kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedComparator;

impl TypedComparator {
    /// Natural order within a kind. Floats use the IEEE total order, so NaN
    /// sorts after every number. Mismatched kinds compare equal.
    pub fn compare(&self, a: &Primitive, b: &Primitive) -> Ordering {
        use Primitive::*;
        match (a, b) {
            (Bool(x), Bool(y)) => x.cmp(y),
            (Byte(x), Byte(y)) => x.cmp(y),
            (Short(x), Short(y)) => x.cmp(y),
            (Int(x), Int(y)) => x.cmp(y),
            (Long(x), Long(y)) => x.cmp(y),
            (Float(x), Float(y)) => x.total_cmp(y),
            (Double(x), Double(y)) => x.total_cmp(y),
            (Char(x), Char(y)) => x.cmp(y),
            (Str(x), Str(y)) => x.cmp(y),
            _ => {
                warn!(
                    left = a.kind(),
                    right = b.kind(),
                    "comparison between non-matching kinds, treating as equal"
                );
                Ordering::Equal
            }
        }
    }
}

/// Compares sequences of primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayComparator;

impl ArrayComparator {
    /// Longer sequences order first. Equal lengths whose first elements differ
    /// in kind compare equal; otherwise the result is the sign of the summed
    /// element-wise comparisons.
    pub fn compare(&self, a: &[Primitive], b: &[Primitive]) -> Ordering {
        match b.len().cmp(&a.len()) {
            Ordering::Equal => {}
            longer => return longer,
        }
        let (Some(first_a), Some(first_b)) = (a.first(), b.first()) else {
            return Ordering::Equal;
        };
        if !first_a.same_kind(first_b) {
            warn!(
                left = first_a.kind(),
                right = first_b.kind(),
                "array comparison between non-matching kinds, treating as equal"
            );
            return Ordering::Equal;
        }
        let net: i64 = a
            .iter()
            .zip(b)
            .map(|(x, y)| TypedComparator.compare(x, y) as i64)
            .sum();
        net.cmp(&0)
    }
}

/// Natural order for any totally ordered type.
pub fn natural_order<T: Ord + ?Sized>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::sorting::{MergeSort, Sorter};

    #[test]
    fn same_kind_uses_natural_order() {
        let c = TypedComparator;
        assert_eq!(c.compare(&3i32.into(), &5i32.into()), Ordering::Less);
        assert_eq!(c.compare(&"pear".into(), &"apple".into()), Ordering::Greater);
        assert_eq!(c.compare(&true.into(), &false.into()), Ordering::Greater);
        assert_eq!(c.compare(&'a'.into(), &'a'.into()), Ordering::Equal);
        assert_eq!(
            c.compare(&Primitive::Double(f64::NAN), &Primitive::Double(1.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn mixed_kinds_compare_equal() {
        let c = TypedComparator;
        assert_eq!(c.compare(&1i32.into(), &1i64.into()), Ordering::Equal);
        assert_eq!(c.compare(&"1".into(), &1.0f64.into()), Ordering::Equal);
    }

    #[test]
    fn longer_arrays_order_first() {
        let c = ArrayComparator;
        let short: Vec<Primitive> = vec![Primitive::Int(9)];
        let long: Vec<Primitive> = vec![Primitive::Int(1), Primitive::Int(1)];
        assert_eq!(c.compare(&long, &short), Ordering::Less);
        assert_eq!(c.compare(&short, &long), Ordering::Greater);
    }

    #[test]
    fn equal_length_arrays_use_net_comparison() {
        let c = ArrayComparator;
        let a: Vec<Primitive> = vec![1i32.into(), 5i32.into(), 7i32.into()];
        let b: Vec<Primitive> = vec![2i32.into(), 4i32.into(), 6i32.into()];
        // one loss, two wins
        assert_eq!(c.compare(&a, &b), Ordering::Greater);
        assert_eq!(c.compare(&b, &a), Ordering::Less);
        assert_eq!(c.compare(&a, &a), Ordering::Equal);

        let strings: Vec<Primitive> = vec!["x".into(), "y".into(), "z".into()];
        assert_eq!(c.compare(&a, &strings), Ordering::Equal);
        assert_eq!(c.compare(&[], &[]), Ordering::Equal);
    }

    #[test]
    fn primitives_sort_with_a_comparator() {
        let mut values: Vec<Primitive> = vec![2.5f64.into(), (-1.0f64).into(), 0.0f64.into()];
        MergeSort.sort_by(&mut values, |a, b| TypedComparator.compare(a, b));
        assert_eq!(values, vec![Primitive::Double(-1.0), Primitive::Double(0.0), Primitive::Double(2.5)]);

        let mut words = vec!["b", "c", "a"];
        MergeSort.sort_by(&mut words, |a, b| natural_order(a, b));
        assert_eq!(words, ["a", "b", "c"]);
    }
}
