use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Closed set of public sort keys for one entity.
pub trait SortKey: Copy + PartialEq + 'static {
    const DEFAULT: Self;
    const ALL: &'static [Self];

    /// Public name accepted in the `sort` query parameter.
    fn name(self) -> &'static str;

    /// Column or output alias used in `ORDER BY`.
    fn column(self) -> &'static str;

    fn default_direction(self) -> Direction {
        Direction::Asc
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid sort key '{key}', expected one of: {}", .allowed.join(", "))]
pub struct InvalidSortKey {
    pub key: String,
    pub allowed: Vec<&'static str>,
}

const REVERSE_MARKER: char = '-';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sorting<K> {
    pub key: K,
    pub reversed: bool,
}

impl<K: SortKey> Default for Sorting<K> {
    fn default() -> Self {
        Self {
            key: K::DEFAULT,
            reversed: false,
        }
    }
}

impl<K: SortKey> Sorting<K> {
    /// Resolves `name` or `-name`. A missing or blank value yields the
    /// entity's default ordering.
    pub fn parse(raw: Option<&str>) -> Result<Self, InvalidSortKey> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(raw) => raw,
        };

        let (name, reversed) = match raw.strip_prefix(REVERSE_MARKER) {
            Some(rest) => (rest, true),
            None => (raw, false),
        };

        K::ALL
            .iter()
            .copied()
            .find(|key| key.name() == name)
            .map(|key| Self { key, reversed })
            .ok_or_else(|| InvalidSortKey {
                key: raw.to_string(),
                allowed: K::ALL.iter().map(|key| key.name()).collect(),
            })
    }

    pub fn direction(&self) -> Direction {
        let direction = self.key.default_direction();
        if self.reversed {
            direction.reverse()
        } else {
            direction
        }
    }

    pub fn order_by(&self) -> String {
        format!("{} {}", self.key.column(), self.direction().as_sql())
    }
}

macro_rules! sort_keys {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($public:literal, $column:literal)),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl SortKey for $name {
            const DEFAULT: Self = $name::$default;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $public),+
                }
            }

            fn column(self) -> &'static str {
                match self {
                    $($name::$variant => $column),+
                }
            }
        }
    };
}

sort_keys! {
    CitySort {
        Id => ("id", "c.id"),
        Name => ("name", "c.name"),
    } default Id
}

sort_keys! {
    MallSort {
        Id => ("id", "m.id"),
        Name => ("name", "m.name"),
        ShopsCount => ("shops_count", "m.shops_count"),
    } default Id
}

sort_keys! {
    ShopSort {
        Id => ("id", "s.id"),
        Name => ("name", "s.name"),
        Score => ("score", "s.score"),
        MallsCount => ("malls_count", "s.malls_count"),
    } default Id
}

sort_keys! {
    CategorySort {
        Id => ("id", "c.id"),
        Name => ("name", "c.name"),
        ShopsCount => ("shops_count", "c.shops_count"),
    } default Id
}

sort_keys! {
    /// `distance` refers to the output alias of the search query and is
    /// only meaningful when the caller sent a location.
    SearchSort {
        MallId => ("mall_id", "m.id"),
        MallName => ("mall_name", "m.name"),
        ShopsCount => ("shops_count", "m.shops_count"),
        Distance => ("distance", "distance"),
    } default MallId
}
