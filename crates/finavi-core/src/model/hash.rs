use std::hash::{Hash, Hasher};

/// Hashing for wire-model fields, including floats.
///
/// Floats hash by bit pattern with `-0.0` folded into `0.0`, which keeps
/// `a == b => hash(a) == hash(b)` for every value JSON can carry.
pub(crate) trait StableHash {
    fn stable_hash<H: Hasher>(&self, state: &mut H);
}

impl StableHash for f64 {
    fn stable_hash<H: Hasher>(&self, state: &mut H) {
        let normalized = if *self == 0.0 { 0.0_f64 } else { *self };
        normalized.to_bits().hash(state);
    }
}

impl<T: StableHash> StableHash for Option<T> {
    fn stable_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            None => state.write_u8(0),
            Some(value) => {
                state.write_u8(1);
                value.stable_hash(state);
            }
        }
    }
}

impl<T: StableHash> StableHash for Vec<T> {
    fn stable_hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.stable_hash(state);
        }
    }
}

macro_rules! stable_hash_via_hash {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::model::hash::StableHash for $ty {
                fn stable_hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                    ::std::hash::Hash::hash(self, state);
                }
            }
        )+
    };
}

pub(crate) use stable_hash_via_hash;

stable_hash_via_hash!(i64, bool, String);

/// Feed each field through [`StableHash`] in order.
macro_rules! hash_fields {
    ($state:expr; $($field:expr),+ $(,)?) => {
        $( $crate::model::hash::StableHash::stable_hash($field, $state); )+
    };
}

pub(crate) use hash_fields;

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn digest<T: StableHash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.stable_hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn signed_zero_hashes_like_zero() {
        assert_eq!(digest(&-0.0_f64), digest(&0.0_f64));
    }

    #[test]
    fn none_and_empty_vec_are_distinct() {
        assert_ne!(digest(&None::<Vec<f64>>), digest(&Some(Vec::<f64>::new())));
    }
}
