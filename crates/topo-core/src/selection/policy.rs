// ── Form field policy ──
//
// Which fields a creation form starts with enabled, and which must be
// filled before it can be submitted, per form mode.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// What a creation form creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FormMode {
    Site,
    Environment,
    Cluster,
    SyncCluster,
}

/// The six inputs of a creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FormField {
    Site,
    Environment,
    Cluster,
    Name,
    EnvironmentType,
    ClusterType,
}

impl FormField {
    const fn bit(self) -> u8 {
        match self {
            Self::Site => 1,
            Self::Environment => 1 << 1,
            Self::Cluster => 1 << 2,
            Self::Name => 1 << 3,
            Self::EnvironmentType => 1 << 4,
            Self::ClusterType => 1 << 5,
        }
    }
}

/// Compact set of form fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet(u8);

impl FieldSet {
    pub const EMPTY: Self = Self(0);

    pub const fn of(fields: &[FormField]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < fields.len() {
            bits |= fields[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, field: FormField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn insert(&mut self, field: FormField) {
        self.0 |= field.bit();
    }

    pub fn remove(&mut self, field: FormField) {
        self.0 &= !field.bit();
    }

    pub fn set(&mut self, field: FormField, on: bool) {
        if on {
            self.insert(field);
        } else {
            self.remove(field);
        }
    }

    pub fn iter(self) -> impl Iterator<Item = FormField> {
        FormField::iter().filter(move |f| self.contains(*f))
    }
}

/// Initial enabled fields and required fields for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub enabled: FieldSet,
    pub required: FieldSet,
}

impl FieldPolicy {
    pub const fn for_mode(mode: FormMode) -> Self {
        use FormField::{Cluster, ClusterType, Environment, EnvironmentType, Name, Site};

        match mode {
            FormMode::Site => Self {
                enabled: FieldSet::of(&[Name]),
                required: FieldSet::of(&[Name]),
            },
            FormMode::Environment => Self {
                enabled: FieldSet::of(&[Site, Name, EnvironmentType]),
                required: FieldSet::of(&[Site, Name, EnvironmentType]),
            },
            FormMode::Cluster => Self {
                enabled: FieldSet::of(&[Site, Name, ClusterType]),
                required: FieldSet::of(&[Environment, Name, ClusterType]),
            },
            FormMode::SyncCluster => Self {
                enabled: FieldSet::of(&[Site, Name]),
                required: FieldSet::of(&[Cluster, Name]),
            },
        }
    }
}
