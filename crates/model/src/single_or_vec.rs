//! One-or-many container.

/// A value that may be given either once or as a sequence.
///
/// Repeated fields and wildcard content accept both forms. The renderer
/// normalizes every field value through this type before iterating, so a single
/// value behaves exactly like a one-element sequence. When decoding JSON, a
/// scalar or object becomes a single item and an array becomes the sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleOrVec<T>(Vec<T>);

impl<T> SingleOrVec<T> {
    pub fn single(value: T) -> Self {
        SingleOrVec(vec![value])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> AsRef<[T]> for SingleOrVec<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for SingleOrVec<T> {
    #[inline]
    fn from(values: Vec<T>) -> Self {
        SingleOrVec(values)
    }
}

impl<T> From<SingleOrVec<T>> for Vec<T> {
    #[inline]
    fn from(wrapper: SingleOrVec<T>) -> Self {
        wrapper.0
    }
}

impl<T> Default for SingleOrVec<T> {
    #[inline]
    fn default() -> Self {
        SingleOrVec(Vec::new())
    }
}

impl<T> IntoIterator for SingleOrVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SingleOrVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de, T> serde::Deserialize<'de> for SingleOrVec<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::value::{
            BoolDeserializer, F64Deserializer, I64Deserializer, MapAccessDeserializer,
            SeqAccessDeserializer, StrDeserializer, U64Deserializer,
        };

        struct SingleOrVecVisitor<T>(std::marker::PhantomData<T>);

        impl<'de, T> serde::de::Visitor<'de> for SingleOrVecVisitor<T>
        where
            T: serde::Deserialize<'de>,
        {
            type Value = SingleOrVec<T>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a single value or a sequence")
            }

            fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let values = serde::Deserialize::deserialize(SeqAccessDeserializer::new(seq))?;
                Ok(SingleOrVec(values))
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: serde::de::MapAccess<'de>,
            {
                let value = T::deserialize(MapAccessDeserializer::new(map))?;
                Ok(SingleOrVec::single(value))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SingleOrVec::single(T::deserialize(StrDeserializer::<E>::new(v))?))
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SingleOrVec::single(T::deserialize(BoolDeserializer::<E>::new(v))?))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SingleOrVec::single(T::deserialize(I64Deserializer::<E>::new(v))?))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SingleOrVec::single(T::deserialize(U64Deserializer::<E>::new(v))?))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SingleOrVec::single(T::deserialize(F64Deserializer::<E>::new(v))?))
            }
        }

        deserializer.deserialize_any(SingleOrVecVisitor(std::marker::PhantomData))
    }
}
