use hashbrown::HashMap;

use super::*;

/// Ordered list of known card faces; pair `i` of a round uses face `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceCatalog {
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl FaceCatalog {
    pub fn new<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            if index.insert(key.clone(), i).is_some() {
                return Err(GameError::InvalidConfiguration(ConfigIssue::DuplicateFace(
                    key.clone(),
                )));
            }
        }
        Ok(Self { keys, index })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_faces_by_key() {
        let catalog = FaceCatalog::new(["cat", "dog", "owl"]).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.position("owl"), Some(2));
        assert!(catalog.contains("dog"));
        assert!(!catalog.contains("emu"));
    }

    #[test]
    fn rejects_duplicate_faces() {
        assert_eq!(
            FaceCatalog::new(["cat", "dog", "cat"]),
            Err(GameError::InvalidConfiguration(ConfigIssue::DuplicateFace(
                "cat".to_string()
            )))
        );
    }
}
