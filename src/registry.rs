// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! A write-once map from locales to their alphabets.
//!
//! [`AlphabetRegistry`] is an ordinary value: start-up code creates it, registers
//! one [`RangeSet`] per locale, and then shares it read-only. There is no hidden
//! global state; an application that wants a process-wide registry puts the
//! populated value behind a one-time initialization barrier.
//!
//! ```
//! use alphabets::rangeset::RangeSet;
//! use alphabets::registry::AlphabetRegistry;
//! use icu_locale_core::langid;
//! use std::sync::OnceLock;
//!
//! fn alphabets() -> &'static AlphabetRegistry<'static> {
//!     static REGISTRY: OnceLock<AlphabetRegistry<'static>> = OnceLock::new();
//!     REGISTRY.get_or_init(|| {
//!         let mut registry = AlphabetRegistry::new();
//!         let english = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap();
//!         registry.register(&langid!("en"), english).unwrap();
//!         registry
//!     })
//! }
//!
//! let english = alphabets().lookup(&langid!("en")).unwrap();
//! assert!(english.contains_all("Smith"));
//! assert!(alphabets().lookup(&langid!("fr")).is_none());
//! ```

use alloc::string::{String, ToString};
use displaydoc::Display;
use icu_locale_core::LanguageIdentifier;
use litemap::{Entry, LiteMap};

use crate::log;
use crate::rangeset::RangeSet;

/// An [`AlphabetRegistry`] operation failed.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// The locale already has an alphabet; entries are never replaced.
    #[displaydoc("An alphabet is already registered for {0}")]
    AlreadyRegistered(LanguageIdentifier),
}

impl core::error::Error for RegistryError {}

/// Alphabets keyed by [`LanguageIdentifier`].
///
/// Each locale is registered at most once. Once populated, the registry is only
/// read, and it is [`Sync`] so any number of threads can query it without locking.
#[derive(Debug, Default, Clone)]
pub struct AlphabetRegistry<'data> {
    // Keyed by the BCP-47 form of the identifier, which gives a total order
    alphabets: LiteMap<String, RangeSet<'data>>,
}

impl<'data> AlphabetRegistry<'data> {
    /// Returns an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the alphabet of `locale` and returns a reference to it.
    ///
    /// Fails with [`RegistryError::AlreadyRegistered`] if `locale` already has an
    /// alphabet; the existing entry is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    /// use alphabets::registry::{AlphabetRegistry, RegistryError};
    /// use icu_locale_core::langid;
    ///
    /// let mut registry = AlphabetRegistry::new();
    /// let latin = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap();
    ///
    /// let registered = registry.register(&langid!("en"), latin.clone()).unwrap();
    /// assert!(registered.contains('q'));
    ///
    /// assert_eq!(
    ///     registry.register(&langid!("en"), RangeSet::empty()),
    ///     Err(RegistryError::AlreadyRegistered(langid!("en")))
    /// );
    /// assert_eq!(registry.lookup(&langid!("en")), Some(&latin));
    /// ```
    pub fn register(
        &mut self,
        locale: &LanguageIdentifier,
        alphabet: RangeSet<'data>,
    ) -> Result<&RangeSet<'data>, RegistryError> {
        match self.alphabets.entry(locale.to_string()) {
            Entry::Occupied(_) => {
                log::warn!("Ignoring second alphabet registered for {locale}");
                Err(RegistryError::AlreadyRegistered(locale.clone()))
            }
            Entry::Vacant(entry) => Ok(&*entry.insert(alphabet)),
        }
    }

    /// Returns the alphabet registered for exactly `locale`.
    pub fn lookup(&self, locale: &LanguageIdentifier) -> Option<&RangeSet<'data>> {
        self.alphabets
            .get_by(|key| locale.strict_cmp(key.as_bytes()).reverse())
    }

    /// Returns the alphabet of `locale` or of its closest registered ancestor.
    ///
    /// Tries `locale`, then its language, script and region, then its language and
    /// script, then its language alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    /// use alphabets::registry::AlphabetRegistry;
    /// use icu_locale_core::langid;
    ///
    /// let mut registry = AlphabetRegistry::new();
    /// let cyrillic = RangeSet::try_from_ranges(&[(0x400, 0x45F)]).unwrap();
    /// let latin = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A), (0x106, 0x17E)])
    ///     .unwrap();
    /// registry.register(&langid!("sr"), cyrillic.clone()).unwrap();
    /// registry.register(&langid!("sr-Latn"), latin.clone()).unwrap();
    ///
    /// assert_eq!(registry.lookup_with_fallback(&langid!("sr-RS")), Some(&cyrillic));
    /// assert_eq!(registry.lookup_with_fallback(&langid!("sr-Latn-RS")), Some(&latin));
    /// assert_eq!(registry.lookup_with_fallback(&langid!("hr")), None);
    /// ```
    pub fn lookup_with_fallback(&self, locale: &LanguageIdentifier) -> Option<&RangeSet<'data>> {
        if let Some(alphabet) = self.lookup(locale) {
            return Some(alphabet);
        }
        let language = locale.language;
        [
            (language, locale.script, locale.region),
            (language, locale.script, None),
            (language, None, None),
        ]
        .into_iter()
        .map(LanguageIdentifier::from)
        .filter(|candidate| candidate != locale)
        .find_map(|candidate| self.lookup(&candidate))
    }

    /// Returns the number of registered locales.
    pub fn len(&self) -> usize {
        self.alphabets.len()
    }

    /// Returns whether no locale is registered.
    pub fn is_empty(&self) -> bool {
        self.alphabets.is_empty()
    }

    /// Yields the registered locales, as BCP-47 strings, with their alphabets.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RangeSet<'data>)> + '_ {
        self.alphabets
            .iter()
            .map(|(locale, alphabet)| (locale.as_str(), alphabet))
    }
}

#[cfg(test)]
mod tests {
    use super::{AlphabetRegistry, RegistryError};
    use crate::rangeset::RangeSet;
    use icu_locale_core::{langid, LanguageIdentifier};
    use std::vec::Vec;

    fn latin() -> RangeSet<'static> {
        RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap()
    }

    fn greek() -> RangeSet<'static> {
        RangeSet::try_from_ranges(&[(0x391, 0x3A9), (0x3B1, 0x3C9)]).unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = AlphabetRegistry::new();
        assert!(registry.is_empty());
        registry.register(&langid!("en"), latin()).unwrap();
        registry.register(&langid!("el"), greek()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup(&langid!("en")), Some(&latin()));
        assert_eq!(registry.lookup(&langid!("el")), Some(&greek()));
        assert_eq!(registry.lookup(&langid!("de")), None);
        assert_eq!(registry.lookup(&langid!("en-US")), None);
    }

    #[test]
    fn test_register_is_write_once() {
        let mut registry = AlphabetRegistry::new();
        registry.register(&langid!("en"), latin()).unwrap();
        assert_eq!(
            registry.register(&langid!("en"), greek()),
            Err(RegistryError::AlreadyRegistered(langid!("en")))
        );
        assert_eq!(registry.lookup(&langid!("en")), Some(&latin()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_is_case_normalized() {
        let mut registry = AlphabetRegistry::new();
        let parsed: LanguageIdentifier = "SR-latn-rs".parse().unwrap();
        registry.register(&parsed, latin()).unwrap();
        assert!(registry.lookup(&langid!("sr-Latn-RS")).is_some());
    }

    #[test]
    fn test_lookup_with_fallback() {
        let mut registry = AlphabetRegistry::new();
        registry.register(&langid!("de"), latin()).unwrap();
        registry.register(&langid!("de-CH"), greek()).unwrap();
        assert_eq!(registry.lookup_with_fallback(&langid!("de-CH")), Some(&greek()));
        assert_eq!(registry.lookup_with_fallback(&langid!("de-AT")), Some(&latin()));
        assert_eq!(
            registry.lookup_with_fallback(&langid!("de-CH-1996")),
            Some(&greek())
        );
        assert_eq!(registry.lookup_with_fallback(&langid!("fr-CH")), None);
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut registry = AlphabetRegistry::new();
        registry.register(&langid!("el"), greek()).unwrap();
        registry.register(&langid!("de"), latin()).unwrap();
        registry.register(&langid!("en"), latin()).unwrap();
        let locales: Vec<&str> = registry.iter().map(|(locale, _)| locale).collect();
        assert_eq!(locales, ["de", "el", "en"]);
    }

    #[test]
    fn test_registry_is_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AlphabetRegistry<'static>>();
    }
}
