//! Priority families and the partial order between them
//!
//! Every bidding phase declares its own family of named priority levels with
//! [`priority_family!`](crate::priority_family). Levels within a family are
//! totally ordered, earlier declarations ranking higher. Levels from different
//! families only compare through a [`PartialOrdering`].

use crate::error::ConfigError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A named, ordered list of priority levels.
#[derive(Debug)]
pub struct Family {
    pub name: &'static str,
    pub levels: &'static [&'static str],
}

/// One level of one family.
#[derive(Debug, Clone, Copy)]
pub struct Priority {
    family: &'static Family,
    ordinal: u16,
}

impl Priority {
    pub const fn new(family: &'static Family, ordinal: u16) -> Self {
        Self { family, ordinal }
    }

    pub fn family(&self) -> &'static Family {
        self.family
    }

    pub fn ordinal(&self) -> u16 {
        self.ordinal
    }

    pub fn level_name(&self) -> &'static str {
        self.family
            .levels
            .get(usize::from(self.ordinal))
            .copied()
            .unwrap_or("?")
    }

    pub fn same_family(&self, other: &Priority) -> bool {
        self.family.name == other.family.name
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.same_family(other) && self.ordinal == other.ordinal
    }
}

impl Eq for Priority {}

impl Hash for Priority {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.name.hash(state);
        self.ordinal.hash(state);
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.family.name, self.level_name())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Declare a priority family as a plain enum convertible into [`Priority`].
///
/// ```ignore
/// priority_family! {
///     pub enum OpeningPriority: "opening" { StrongTwoClubs, NoTrumpOpening }
/// }
/// ```
#[macro_export]
macro_rules! priority_family {
    (
        $vis:vis enum $ty:ident : $family:literal {
            $( $level:ident ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $ty {
            $( $level ),+
        }

        impl $ty {
            pub fn family() -> &'static $crate::dsl::Family {
                static FAMILY: $crate::dsl::Family = $crate::dsl::Family {
                    name: $family,
                    levels: &[ $( stringify!($level) ),+ ],
                };
                &FAMILY
            }
        }

        impl From<$ty> for $crate::dsl::Priority {
            fn from(level: $ty) -> Self {
                $crate::dsl::Priority::new(<$ty>::family(), level as u16)
            }
        }
    };
}

/// A strict partial order over families, closed under transitivity.
#[derive(Debug, Clone, Default)]
pub struct PartialOrdering {
    index: HashMap<&'static str, usize>,
    /// `less[a][b]` holds when every level of family `a` ranks below family `b`.
    less: Vec<Vec<bool>>,
}

impl PartialOrdering {
    /// Build from `(lower, higher)` family pairs.
    pub fn new(
        edges: impl IntoIterator<Item = (&'static Family, &'static Family)>,
    ) -> Result<Self, ConfigError> {
        let mut index = HashMap::new();
        let mut pairs = Vec::new();
        for (lower, higher) in edges {
            let mut slot = |family: &'static Family| {
                let next = index.len();
                *index.entry(family.name).or_insert(next)
            };
            pairs.push((slot(lower), slot(higher)));
        }

        let n = index.len();
        let mut less = vec![vec![false; n]; n];
        for (lower, higher) in pairs {
            less[lower][higher] = true;
        }
        for k in 0..n {
            for i in 0..n {
                if less[i][k] {
                    for j in 0..n {
                        if less[k][j] {
                            less[i][j] = true;
                        }
                    }
                }
            }
        }

        let ordering = Self { index, less };
        if let Some((&name, _)) = ordering.index.iter().find(|(_, &i)| ordering.less[i][i]) {
            return Err(ConfigError::OrderingCycle(name));
        }
        Ok(ordering)
    }

    /// `Greater` when `a` outranks `b`, `None` when unrelated.
    pub fn compare(&self, a: &Priority, b: &Priority) -> Option<Ordering> {
        if a.same_family(b) {
            return Some(b.ordinal.cmp(&a.ordinal));
        }
        let i = *self.index.get(a.family.name)?;
        let j = *self.index.get(b.family.name)?;
        if self.less[i][j] {
            Some(Ordering::Less)
        } else if self.less[j][i] {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    pub fn is_less(&self, a: &Priority, b: &Priority) -> bool {
        self.compare(a, b) == Some(Ordering::Less)
    }
}
