//! Static tiler factory table.
//!
//! Tilers are named in the config; the registry resolves those names to
//! constructors once at config-load time. No dynamic loading.

use std::collections::HashMap;

use retile_common::TilingError;

use crate::horizontal::HorizontalTiler;
use crate::tiler::Tiler;
use crate::vertical::VerticalTiler;

type TilerFactory = fn() -> Box<dyn Tiler>;

pub struct TilerRegistry {
    factories: HashMap<String, TilerFactory>,
}

fn builtin_factories() -> HashMap<String, TilerFactory> {
    let mut table: HashMap<String, TilerFactory> = HashMap::new();
    table.insert("vertical".into(), || Box::new(VerticalTiler::default()));
    table.insert("horizontal".into(), || Box::new(HorizontalTiler::default()));
    table
}

impl TilerRegistry {
    /// A registry offering every built-in tiler.
    pub fn builtin() -> Self {
        Self {
            factories: builtin_factories(),
        }
    }

    /// Build a registry restricted to the named tilers.
    ///
    /// Unknown names are a config error; an empty list is too.
    pub fn from_names(names: &[String]) -> Result<Self, TilingError> {
        if names.is_empty() {
            return Err(TilingError::NoTilers);
        }

        let builtin = builtin_factories();
        let mut factories = HashMap::new();
        for name in names {
            let factory = builtin
                .get(name.as_str())
                .ok_or_else(|| TilingError::UnknownTiler(name.clone()))?;
            factories.insert(name.clone(), *factory);
        }

        Ok(Self { factories })
    }

    /// Instantiate a tiler by name.
    pub fn create(&self, name: &str) -> Result<Box<dyn Tiler>, TilingError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| TilingError::UnknownTiler(name.into()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
