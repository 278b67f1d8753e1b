/* ------------------------------------------------------------------ */
/* Vocabulary: sorted token set with index maps                      */
/* ------------------------------------------------------------------ */
//
// Built once from the corpus and never mutated afterwards. Ids follow the
// sorted order of the unique tokens, so the same text always yields the
// same assignment.
//
// Saved/loaded as JSON; only the ordered token list is stored, the
// reverse map is rebuilt on load.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Serialize, Deserialize)]
struct VocabFile {
    tokens: Vec<String>, // id → token
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    id_to_token: Vec<String>,
    token_to_id: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from any token stream; duplicates collapse, order is sorted.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
        Self::from_sorted(unique.into_iter().collect())
    }

    fn from_sorted(id_to_token: Vec<String>) -> Self {
        let token_to_id = id_to_token
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { id_to_token, token_to_id }
    }

    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token_to_id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id_to_token.get(id).map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.id_to_token
    }

    // ── Save / Load ───────────────────────────────────────────────────

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = VocabFile { tokens: self.id_to_token.clone() };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a saved vocabulary. The stored order is trusted as-is.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let file: VocabFile = serde_json::from_str(&json)?;
        Ok(Self::from_sorted(file.tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_sorted_order() {
        let v = Vocabulary::from_tokens(["the", "cat", ",", "the", "sat"]);
        assert_eq!(v.tokens(), &[",", "cat", "sat", "the"]);
        assert_eq!(v.id(","), Some(0));
        assert_eq!(v.id("the"), Some(3));
        assert_eq!(v.token(2), Some("sat"));
        assert_eq!(v.id("dog"), None);
        assert_eq!(v.token(4), None);
    }

    #[test]
    fn empty_stream_gives_empty_vocabulary() {
        let v = Vocabulary::from_tokens(Vec::<String>::new());
        assert!(v.is_empty());
        assert_eq!(v.len(), 0);
    }

    #[test]
    fn save_then_load_preserves_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        let v = Vocabulary::from_tokens(["queen", "alice", "!", "“"]);
        v.save(&path).unwrap();
        let loaded = Vocabulary::load(&path).unwrap();
        assert_eq!(loaded, v);
        assert_eq!(loaded.id("alice"), v.id("alice"));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Vocabulary::load(&path), Err(crate::Error::Json(_))));
    }
}
