//! Shareable location: the path-plus-query string that deep links a card.
//!
//! `/?card=rag` opens the RAG card. The `card` query parameter is the only
//! one the application reads or writes; every other parameter, the path and
//! the fragment pass through untouched.

use crate::model::CardId;
use std::fmt;
use url::form_urlencoded;

/// Query parameter naming the open card.
pub const CARD_PARAM: &str = "card";

/// Parsed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Everything before `?`, including any scheme and host.
    path: String,
    /// Decoded query pairs in source order.
    query: Vec<(String, String)>,
    fragment: Option<String>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            query: Vec::new(),
            fragment: None,
        }
    }
}

impl Location {
    /// Parse a location. Never fails: anything unparseable is kept as path.
    pub fn parse(raw: &str) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (raw, None),
        };
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        let query = form_urlencoded::parse(query.as_bytes()).into_owned().collect();

        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query,
            fragment,
        }
    }

    /// Root location with the `card` parameter set.
    pub fn with_card(id: &CardId) -> Self {
        let mut location = Self::default();
        location.replace_card_param(Some(id));
        location
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of a query parameter (first occurrence).
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `card` parameter as an id. Empty values count as absent.
    pub fn card_param(&self) -> Option<CardId> {
        self.param(CARD_PARAM).and_then(|raw| CardId::new(raw).ok())
    }

    /// Set or remove the `card` parameter in place.
    ///
    /// Setting replaces the first existing occurrence (keeping its position)
    /// and drops any duplicates; a missing parameter is appended.
    pub fn replace_card_param(&mut self, id: Option<&CardId>) {
        let Some(id) = id else {
            self.query.retain(|(key, _)| key != CARD_PARAM);
            return;
        };

        let mut replaced = false;
        self.query.retain_mut(|(key, value)| {
            if key != CARD_PARAM {
                return true;
            }
            if replaced {
                return false;
            }
            *value = id.as_str().to_string();
            replaced = true;
            true
        });
        if !replaced {
            self.query.push((CARD_PARAM.to_string(), id.as_str().to_string()));
        }
    }

    /// Serialize back to a location string.
    pub fn to_url(&self) -> String {
        let mut url = self.path.clone();
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(
                &form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&self.query)
                    .finish(),
            );
        }
        if let Some(fragment) = &self.fragment {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}
