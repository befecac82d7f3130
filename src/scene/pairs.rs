use uuid::Uuid;

use crate::foundation::error::{RevealError, RevealResult};

/// One segment's visual content. Either side may be empty until assigned.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhotoPair {
    /// Stable opaque identity.
    pub id: Uuid,
    /// Top-layer image source (revealed by the mask).
    pub top: Option<String>,
    /// Bottom-layer image source (always full frame).
    pub bottom: Option<String>,
}

impl PhotoPair {
    fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            top: None,
            bottom: None,
        }
    }

    /// `true` when both sides have an image.
    pub fn is_complete(&self) -> bool {
        self.top.is_some() && self.bottom.is_some()
    }
}

/// Ordered photo pairs; always holds at least one pair.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PairList {
    pairs: Vec<PhotoPair>,
}

impl Default for PairList {
    fn default() -> Self {
        Self::new()
    }
}

impl PairList {
    /// A list with one empty pair.
    pub fn new() -> Self {
        Self {
            pairs: vec![PhotoPair::empty()],
        }
    }

    /// Pairs in segment order.
    pub fn pairs(&self) -> &[PhotoPair] {
        &self.pairs
    }

    /// Number of pairs (segments).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append an empty pair and return its id.
    pub fn add_pair(&mut self) -> Uuid {
        let pair = PhotoPair::empty();
        let id = pair.id;
        self.pairs.push(pair);
        id
    }

    /// Assign the top image of pair `id`.
    pub fn set_top(&mut self, id: Uuid, src: impl Into<String>) -> RevealResult<()> {
        self.get_mut(id)?.top = Some(src.into());
        Ok(())
    }

    /// Assign the bottom image of pair `id`.
    pub fn set_bottom(&mut self, id: Uuid, src: impl Into<String>) -> RevealResult<()> {
        self.get_mut(id)?.bottom = Some(src.into());
        Ok(())
    }

    /// Remove the top image of pair `id`.
    pub fn clear_top(&mut self, id: Uuid) -> RevealResult<()> {
        self.get_mut(id)?.top = None;
        Ok(())
    }

    /// Remove the bottom image of pair `id`.
    pub fn clear_bottom(&mut self, id: Uuid) -> RevealResult<()> {
        self.get_mut(id)?.bottom = None;
        Ok(())
    }

    /// Remove pair `id`. The last remaining pair cannot be removed.
    pub fn remove_pair(&mut self, id: Uuid) -> RevealResult<PhotoPair> {
        if self.pairs.len() <= 1 {
            return Err(RevealError::invalid_payload(
                "at least one photo pair must remain",
            ));
        }
        let idx = self.index_of(id)?;
        Ok(self.pairs.remove(idx))
    }

    /// Flatten to parallel `(top_images, bottom_images)` arrays; missing images become `""`.
    pub fn flatten(&self) -> (Vec<String>, Vec<String>) {
        self.pairs
            .iter()
            .map(|p| {
                (
                    p.top.clone().unwrap_or_default(),
                    p.bottom.clone().unwrap_or_default(),
                )
            })
            .unzip()
    }

    fn index_of(&self, id: Uuid) -> RevealResult<usize> {
        self.pairs
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RevealError::invalid_payload(format!("unknown photo pair '{id}'")))
    }

    fn get_mut(&mut self, id: Uuid) -> RevealResult<&mut PhotoPair> {
        let idx = self.index_of(id)?;
        Ok(&mut self.pairs[idx])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/pairs.rs"]
mod tests;
