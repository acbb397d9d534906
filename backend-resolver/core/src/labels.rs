use std::{collections::BTreeMap, sync::Arc};

/// A pod's labels.
///
/// Labels are shared between the snapshot index and the resolvers, so clones only bump a
/// reference count.
#[derive(Clone, Debug, Eq, Default)]
pub struct Labels(Arc<Map>);

pub type Map = BTreeMap<String, String>;

// === Labels ===

impl Labels {
    /// Indicates whether the label `name` is set to exactly `value`.
    #[inline]
    pub fn has(&self, name: &str, value: &str) -> bool {
        self.0.get(name).map(String::as_str) == Some(value)
    }
}

impl From<Map> for Labels {
    #[inline]
    fn from(labels: Map) -> Self {
        Self(Arc::new(labels))
    }
}

impl From<Option<Map>> for Labels {
    #[inline]
    fn from(labels: Option<Map>) -> Self {
        labels.unwrap_or_default().into()
    }
}

impl AsRef<Map> for Labels {
    #[inline]
    fn as_ref(&self) -> &Map {
        self.0.as_ref()
    }
}

impl<T: AsRef<Map>> std::cmp::PartialEq<T> for Labels {
    #[inline]
    fn eq(&self, t: &T) -> bool {
        self.0.as_ref().eq(t.as_ref())
    }
}

impl std::iter::FromIterator<(String, String)> for Labels {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

impl std::iter::FromIterator<(&'static str, &'static str)> for Labels {
    fn from_iter<T: IntoIterator<Item = (&'static str, &'static str)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::FromIterator;

    #[test]
    fn test_has() {
        for (labels, (name, value), matches, msg) in &[
            (Labels::default(), ("app", "d01"), false, "empty labels"),
            (
                Labels::from_iter(Some(("app", "d01"))),
                ("app", "d01"),
                true,
                "exact label match",
            ),
            (
                Labels::from_iter(vec![("app", "d01"), ("v", "1")]),
                ("v", "1"),
                true,
                "one of many labels",
            ),
            (
                Labels::from_iter(Some(("v", "1"))),
                ("v", "2"),
                false,
                "value mismatch",
            ),
            (
                Labels::from_iter(Some(("v", ""))),
                ("v", ""),
                true,
                "empty value",
            ),
        ] {
            assert_eq!(labels.has(name, value), *matches, "{}", msg);
        }
    }
}
