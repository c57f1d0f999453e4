use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Serialize, Serializer};

use crate::{BlockHeight, BlockKey, VaaKey};

/// The messages found in one scanned block range, grouped by block.
///
/// Built fresh for every scan and never merged with the result of a previous
/// one. Only blocks which contained at least one message are present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VaasByBlock {
    blocks: BTreeMap<BlockKey, Vec<VaaKey>>,
    truncation: Option<Truncation>,
}

/// Marks a scan which could only retrieve the upper part of the requested
/// range because the chain no longer serves the older history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Truncation {
    pub requested_from: BlockHeight,
    pub requested_to: BlockHeight,
    /// Lowest height that was retrieved. `None` if not even the upper bound
    /// was available.
    pub retrieved_from: Option<BlockHeight>,
}

impl Truncation {
    /// The heights which were requested but not scanned.
    pub fn missing(&self) -> RangeInclusive<BlockHeight> {
        let to = match self.retrieved_from.and_then(|h| h.parent()) {
            Some(below) => below,
            None if self.retrieved_from.is_some() => self.requested_from,
            None => self.requested_to,
        };
        self.requested_from..=to
    }
}

impl VaasByBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `vaa` to the list of `block`, keeping discovery order.
    pub fn push(&mut self, block: BlockKey, vaa: VaaKey) {
        self.blocks.entry(block).or_default().push(vaa);
    }

    pub fn get(&self, block: &BlockKey) -> Option<&[VaaKey]> {
        self.blocks.get(block).map(Vec::as_slice)
    }

    /// Iterates over the blocks in ascending height order.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockKey, &[VaaKey])> {
        self.blocks.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn vaa_count(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }

    pub fn truncation(&self) -> Option<&Truncation> {
        self.truncation.as_ref()
    }

    pub fn set_truncation(&mut self, truncation: Truncation) {
        self.truncation = Some(truncation);
    }

    /// `false` if part of the requested range could not be scanned.
    pub fn is_complete(&self) -> bool {
        self.truncation.is_none()
    }
}

/// Serializes as `{ "<block key>": ["<vaa key>", ..] }`. The truncation marker
/// is not part of the stored representation.
impl Serialize for VaasByBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.blocks.serialize(serializer)
    }
}
