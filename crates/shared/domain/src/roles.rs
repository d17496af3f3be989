use crate::constants::{ARTIST, COMEDIANS, MUSICIANS, PODCASTERS};
use bitflags::bitflags;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Roles assigned to a session or permitted on a route.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct RoleSet: u32 {
        const PODCASTERS = 1 << 0;
        const COMEDIANS = 1 << 1;
        const MUSICIANS = 1 << 2;
        const ARTIST = 1 << 3;

        const ALL = Self::PODCASTERS.bits()
            | Self::COMEDIANS.bits()
            | Self::MUSICIANS.bits()
            | Self::ARTIST.bits();
    }
}

const NAMED: [(RoleSet, &str); 4] = [
    (RoleSet::PODCASTERS, PODCASTERS),
    (RoleSet::COMEDIANS, COMEDIANS),
    (RoleSet::MUSICIANS, MUSICIANS),
    (RoleSet::ARTIST, ARTIST),
];

impl RoleSet {
    /// Wire names of the contained roles, in declaration order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMED.into_iter().filter(move |(role, _)| self.contains(*role)).map(|(_, name)| name)
    }
}

impl From<&str> for RoleSet {
    fn from(s: &str) -> Self {
        match s {
            PODCASTERS => Self::PODCASTERS,
            COMEDIANS => Self::COMEDIANS,
            MUSICIANS => Self::MUSICIANS,
            ARTIST => Self::ARTIST,
            _ => Self::empty(),
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |acc, name| acc | Self::from(name.as_ref()))
    }
}

impl Serialize for RoleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for name in self.names() {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RoleNames;

        impl<'de> Visitor<'de> for RoleNames {
            type Value = RoleSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of role names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RoleSet, A::Error> {
                let mut roles = RoleSet::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    roles |= RoleSet::from(name.as_str());
                }
                Ok(roles)
            }
        }

        deserializer.deserialize_seq(RoleNames)
    }
}
