//! Named code blocks with symbolic labels.
//!
//! Code is emitted into [`BlockBuilder`]s. A label operand is written as a
//! four-byte placeholder and recorded as a patch. [`Builder::build`] lays
//! the blocks out in creation order and overwrites every patch with the
//! absolute offset of its target, which is either another block's name or a
//! label marked inside the same block.

use rustc_hash::FxHashMap;

use crate::{LinkError, Opcode};

/// Index of a block inside its [`Builder`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BlockId(usize);

#[derive(Debug, Default)]
pub struct Builder {
    blocks: Vec<BlockBuilder>,
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Append an empty block. Blocks are laid out in creation order.
    pub fn create_block(&mut self, name: impl Into<String>) -> BlockId {
        self.add_block(BlockBuilder::new(name))
    }

    /// Append a block that was filled in elsewhere.
    pub fn add_block(&mut self, block: BlockBuilder) -> BlockId {
        self.blocks.push(block);
        BlockId(self.blocks.len() - 1)
    }

    /// The block behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different builder.
    pub fn block(&mut self, id: BlockId) -> &mut BlockBuilder {
        &mut self.blocks[id.0]
    }

    pub fn blocks(&self) -> &[BlockBuilder] {
        &self.blocks
    }

    /// Start offset of every block, keyed by block name.
    fn block_offsets(&self) -> FxHashMap<&str, usize> {
        let mut offsets = FxHashMap::default();
        let mut offset = 0;
        for block in &self.blocks {
            offsets.insert(block.name.as_str(), offset);
            offset += block.size();
        }
        offsets
    }

    /// Concatenate all blocks and resolve every label.
    #[tracing::instrument(level = "debug", skip_all, fields(blocks = self.blocks.len()))]
    pub fn build(&self) -> Result<Vec<u8>, LinkError> {
        let offsets = self.block_offsets();
        let mut bytes = Vec::with_capacity(self.blocks.iter().map(BlockBuilder::size).sum());
        for block in &self.blocks {
            let base = bytes.len();
            bytes.extend(block.link(base, &offsets)?);
        }
        Ok(bytes)
    }
}

/// Code for one block: bytes, pending label patches and local labels.
#[derive(Debug)]
pub struct BlockBuilder {
    name: String,
    code: Vec<u8>,
    patches: Vec<(usize, String)>,
    labels: FxHashMap<String, usize>,
}

impl BlockBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        BlockBuilder {
            name: name.into(),
            code: Vec::new(),
            patches: Vec::new(),
            labels: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes emitted so far.
    #[inline]
    pub fn size(&self) -> usize {
        self.code.len()
    }

    pub fn write_opcode(&mut self, opcode: Opcode) {
        self.code.push(opcode.byte());
    }

    pub fn write_int(&mut self, value: i32) {
        self.code.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a placeholder that linking replaces with the offset of `label`.
    pub fn write_label(&mut self, label: impl Into<String>) {
        self.patches.push((self.code.len(), label.into()));
        self.write_int(0);
    }

    /// Bind `label` to the current position.
    pub fn mark_label(&mut self, label: impl Into<String>) -> Result<(), LinkError> {
        let label = label.into();
        if self.labels.contains_key(&label) {
            return Err(LinkError::DuplicateLabel {
                block: self.name.clone(),
                label,
            });
        }
        self.labels.insert(label, self.code.len());
        Ok(())
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    /// The block's bytes with every patch resolved, assuming the block
    /// starts at `base`.
    fn link(&self, base: usize, blocks: &FxHashMap<&str, usize>) -> Result<Vec<u8>, LinkError> {
        let mut code = self.code.clone();
        for (at, label) in &self.patches {
            let target = match blocks.get(label.as_str()) {
                Some(offset) => *offset,
                None => match self.labels.get(label) {
                    Some(local) => base + local,
                    None => {
                        return Err(LinkError::UnknownLabel {
                            block: self.name.clone(),
                            label: label.clone(),
                        })
                    }
                },
            };
            let operand =
                i32::try_from(target).map_err(|_| LinkError::OffsetOverflow { offset: target })?;
            tracing::trace!(block = %self.name, %label, target, "patch");
            code[*at..*at + 4].copy_from_slice(&operand.to_le_bytes());
        }
        Ok(code)
    }
}
